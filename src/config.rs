//! Partition engine configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file is valid.
//!
//! ```
//! use hearth_partition::config::PartitionConfig;
//! use hearth_partition::partition::PrecedencePolicy;
//!
//! let config = PartitionConfig::from_toml_str(r#"
//!     precedence = "exclusions_first"
//!     cache_capacity = 4
//!
//!     [view_cell]
//!     upgrade_slots = 2
//! "#).expect("valid config");
//!
//! assert_eq!(config.precedence, PrecedencePolicy::ExclusionsFirst);
//! assert_eq!(config.view_cell.config_slots, 63);
//! ```

use crate::constants;
use crate::error::{EngineError, EngineResult};
use crate::partition::{FuzzyMode, PrecedencePolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Slot layout of a view cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewCellLimits {
    pub upgrade_slots: usize,
    pub config_slots: usize,
}

impl Default for ViewCellLimits {
    fn default() -> Self {
        Self {
            upgrade_slots: constants::view_cell::UPGRADE_SLOTS,
            config_slots: constants::view_cell::CONFIG_SLOTS,
        }
    }
}

/// Engine-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionConfig {
    /// Resolution of overlapping inclusive and exclusive cells
    pub precedence: PrecedencePolicy,
    /// Built partitions kept per cache before it is flushed
    pub cache_capacity: usize,
    /// Mode used when a view cell never had one set
    pub default_fuzzy_mode: FuzzyMode,
    pub view_cell: ViewCellLimits,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            precedence: PrecedencePolicy::default(),
            cache_capacity: constants::cache::DEFAULT_CAPACITY,
            default_fuzzy_mode: FuzzyMode::default(),
            view_cell: ViewCellLimits::default(),
        }
    }
}

impl PartitionConfig {
    /// Parse and validate a TOML string
    pub fn from_toml_str(s: &str) -> EngineResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| EngineError::IoError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> EngineResult<String> {
        toml::to_string(self).map_err(|e| EngineError::ConfigParse {
            context: "serialize".to_string(),
            error: e.to_string(),
        })
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.cache_capacity == 0 {
            return Err(EngineError::InvalidConfig {
                field: "cache_capacity".to_string(),
                value: "0".to_string(),
                reason: "must hold at least one partition".to_string(),
            });
        }
        Ok(())
    }
}
