//! View Cell Data - Pure DOP
//!
//! What a view cell looks like to the partition engine. No behaviour here;
//! reading snapshots and building partitions live in view_cell_operations.rs

use crate::item::ItemIdentity;
use crate::partition::FuzzyMode;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Upgrade card types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    Capacity,
    Fuzzy,
    Redstone,
    Speed,
    SuperSpeed,
    SuperluminalSpeed,
    Inverter,
    Crafting,
    PatternCapacity,
    PatternRefiller,
    OreFilter,
    AdvancedBlocking,
    LockCrafting,
    FakeCrafting,
    Sticky,
    VoidOverflow,
    Distribution,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 17] = [
        UpgradeKind::Capacity,
        UpgradeKind::Fuzzy,
        UpgradeKind::Redstone,
        UpgradeKind::Speed,
        UpgradeKind::SuperSpeed,
        UpgradeKind::SuperluminalSpeed,
        UpgradeKind::Inverter,
        UpgradeKind::Crafting,
        UpgradeKind::PatternCapacity,
        UpgradeKind::PatternRefiller,
        UpgradeKind::OreFilter,
        UpgradeKind::AdvancedBlocking,
        UpgradeKind::LockCrafting,
        UpgradeKind::FakeCrafting,
        UpgradeKind::Sticky,
        UpgradeKind::VoidOverflow,
        UpgradeKind::Distribution,
    ];
}

/// Modifiers that change how a view cell filters.
/// Resolved once when a snapshot is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default)]
    pub fuzzy: bool,
    #[serde(default)]
    pub inverter: bool,
    #[serde(default)]
    pub tag_filter: bool,
}

impl Capabilities {
    /// Fold installed upgrade cards into capability flags.
    /// Cards that do not affect filtering are ignored.
    pub fn from_upgrades<I: IntoIterator<Item = UpgradeKind>>(upgrades: I) -> Self {
        let mut caps = Self::default();
        for upgrade in upgrades {
            match upgrade {
                UpgradeKind::Fuzzy => caps.fuzzy = true,
                UpgradeKind::Inverter => caps.inverter = true,
                UpgradeKind::OreFilter => caps.tag_filter = true,
                _ => {}
            }
        }
        caps
    }
}

/// Filter configuration of one view cell, as the builder consumes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewCellConfig {
    #[serde(default = "enabled")]
    pub active: bool,
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(default)]
    pub fuzzy_mode: FuzzyMode,
    #[serde(default)]
    pub tag_filter: String,
    #[serde(default)]
    pub examples: Vec<ItemIdentity>,
}

fn enabled() -> bool {
    true
}

impl Default for ViewCellConfig {
    fn default() -> Self {
        Self {
            active: true,
            capabilities: Capabilities::default(),
            fuzzy_mode: FuzzyMode::default(),
            tag_filter: String::new(),
            examples: Vec::new(),
        }
    }
}

impl ViewCellConfig {
    /// Feed every field into `state`, including example tolerance tags
    pub fn fingerprint<H: Hasher>(&self, state: &mut H) {
        self.active.hash(state);
        self.capabilities.hash(state);
        self.fuzzy_mode.hash(state);
        self.tag_filter.hash(state);
        self.examples.len().hash(state);
        for example in &self.examples {
            example.fingerprint(state);
        }
    }
}

/// Raw view cell state as stored on the host item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewCellSnapshot {
    /// Absent means the cell has never been toggled, which is enabled
    #[serde(default)]
    pub view_mode: Option<bool>,
    #[serde(default)]
    pub upgrades: Vec<Option<ItemIdentity>>,
    #[serde(default)]
    pub config: Vec<Option<ItemIdentity>>,
    #[serde(default)]
    pub fuzzy_mode: Option<FuzzyMode>,
    #[serde(default)]
    pub ore_filter: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHasher;

    #[test]
    fn test_capabilities_from_upgrades() {
        let caps = Capabilities::from_upgrades([
            UpgradeKind::Speed,
            UpgradeKind::Inverter,
            UpgradeKind::OreFilter,
        ]);
        assert!(!caps.fuzzy);
        assert!(caps.inverter);
        assert!(caps.tag_filter);
        assert_eq!(
            Capabilities::from_upgrades(Vec::<UpgradeKind>::new()),
            Capabilities::default()
        );
    }

    #[test]
    fn test_config_defaults_from_toml() {
        let cell: ViewCellConfig = toml::from_str("tag_filter = \"logWood\"").expect("parses");
        assert!(cell.active);
        assert_eq!(cell.fuzzy_mode, FuzzyMode::IgnoreAll);
        assert!(cell.examples.is_empty());
    }

    #[test]
    fn test_fingerprint_sees_tolerance_tag() {
        use crate::item::ItemKind;

        let mut a = ViewCellConfig::default();
        a.examples.push(ItemIdentity::damageable(ItemKind(257), 3, 250));
        let mut b = a.clone();
        b.examples[0] = ItemIdentity::damageable(ItemKind(257), 3, 59);

        let hash = |cell: &ViewCellConfig| {
            let mut hasher = FxHasher::default();
            cell.fingerprint(&mut hasher);
            hasher.finish()
        };
        assert_ne!(hash(&a), hash(&b));
    }
}
