//! Error handling for Hearth Partition
//!
//! Matching itself never fails: every malformed filter degrades to
//! "contributes nothing". Errors only surface at setup time (material
//! registration, configuration loading).

use std::error::Error as StdError;
use std::fmt;

use crate::partition::TagFilterError;

/// Main error type for Hearth Partition
#[derive(Debug)]
pub enum EngineError {
    // Registration Errors
    SlotOverlap {
        slot: u16,
        existing: String,
        incoming: String,
    },
    DuplicateMaterial {
        name: String,
    },

    // Filter Errors
    InvalidTagFilter {
        filter: String,
        error: String,
    },

    // Configuration Errors
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },
    ConfigParse {
        context: String,
        error: String,
    },

    // System Errors
    IoError {
        path: String,
        error: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::SlotOverlap {
                slot,
                existing,
                incoming,
            } => write!(
                f,
                "Slot overlap detected: slot {} already holds '{}', cannot register '{}'",
                slot, existing, incoming
            ),
            EngineError::DuplicateMaterial { name } => {
                write!(f, "Cannot create the same material twice: {}", name)
            }

            EngineError::InvalidTagFilter { filter, error } => {
                write!(f, "Invalid tag filter '{}': {}", filter, error)
            }

            EngineError::InvalidConfig {
                field,
                value,
                reason,
            } => write!(f, "Invalid config: {} = {} ({})", field, value, reason),
            EngineError::ConfigParse { context, error } => {
                write!(f, "Config parse error in {}: {}", context, error)
            }

            EngineError::IoError { path, error } => write!(f, "IO error for {}: {}", path, error),
        }
    }
}

impl StdError for EngineError {}

/// Type alias for Results in Hearth Partition
pub type EngineResult<T> = Result<T, EngineError>;

// Conversion traits for common error types

impl From<toml::de::Error> for EngineError {
    fn from(error: toml::de::Error) -> Self {
        EngineError::ConfigParse {
            context: "toml".to_string(),
            error: error.to_string(),
        }
    }
}

impl From<TagFilterError> for EngineError {
    fn from(error: TagFilterError) -> Self {
        let filter = match &error {
            TagFilterError::InvalidCharacter { token, .. } => token.clone(),
            TagFilterError::InvalidPattern { pattern, .. } => pattern.clone(),
        };
        EngineError::InvalidTagFilter {
            filter,
            error: error.to_string(),
        }
    }
}
