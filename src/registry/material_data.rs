//! Material Registry Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in material_operations.rs

use super::features::Feature;
use crate::cell::UpgradeKind;
use crate::item::{ItemIdentity, ItemKind};
use rustc_hash::{FxHashMap, FxHashSet};

/// Static description of one material variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialDefinition {
    pub name: &'static str,
    /// Sub-variant slot the material occupies on the multi-material item
    pub slot: u16,
    /// Every feature must be enabled for the material to register
    pub features: &'static [Feature],
    /// Tag names the material is published under
    pub tags: &'static [&'static str],
    /// Upgrade card this material acts as, if any
    pub upgrade: Option<UpgradeKind>,
}

/// Material registration data
#[derive(Debug, Clone)]
pub struct MaterialRegistration {
    pub identity: ItemIdentity,
    pub definition: MaterialDefinition,
}

/// Registry data for the variants of one multi-material item
pub struct MaterialRegistryData {
    /// Item kind every variant shares
    pub item: ItemKind,
    /// Map from slot to index in `registrations`
    pub slots: FxHashMap<u16, usize>,
    /// Map from material name to index in `registrations`
    pub name_to_index: FxHashMap<&'static str, usize>,
    /// Every material name offered so far, feature-gated ones included
    pub seen: FxHashSet<&'static str>,
    /// All registered materials, in registration order
    pub registrations: Vec<MaterialRegistration>,
}

const CORE: &[Feature] = &[Feature::Core];
const CORE_CELLS: &[Feature] = &[Feature::Core, Feature::StorageCells];
const CORE_CRAFTING: &[Feature] = &[Feature::Core, Feature::Crafting];

const fn material(
    name: &'static str,
    slot: u16,
    features: &'static [Feature],
    tags: &'static [&'static str],
) -> MaterialDefinition {
    MaterialDefinition {
        name,
        slot,
        features,
        tags,
        upgrade: None,
    }
}

const fn card(name: &'static str, slot: u16, upgrade: UpgradeKind) -> MaterialDefinition {
    MaterialDefinition {
        name,
        slot,
        features: CORE,
        tags: &[],
        upgrade: Some(upgrade),
    }
}

/// Built-in materials of the multi-material item
pub const MATERIALS: &[MaterialDefinition] = &[
    material("certus_quartz_crystal", 0, CORE, &["crystalCertusQuartz"]),
    material("certus_quartz_crystal_charged", 1, CORE, &[]),
    material("certus_quartz_dust", 2, CORE, &["dustCertusQuartz"]),
    material("nether_quartz_dust", 3, CORE, &["dustNetherQuartz"]),
    material("flour", 4, CORE, &["dustWheat"]),
    material("gold_dust", 51, CORE, &["dustGold"]),
    material("iron_dust", 49, CORE, &["dustIron"]),
    material("silicon", 5, CORE, &["itemSilicon"]),
    material("matter_ball", 6, CORE, &[]),
    material("fluix_crystal", 7, CORE, &["crystalFluix"]),
    material("fluix_dust", 8, CORE, &["dustFluix"]),
    material("fluix_pearl", 9, CORE, &["pearlFluix"]),
    material("cell_1k_part", 35, CORE_CELLS, &[]),
    material("cell_4k_part", 36, CORE_CELLS, &[]),
    material("cell_16k_part", 37, CORE_CELLS, &[]),
    material("cell_64k_part", 38, CORE_CELLS, &[]),
    material("blank_pattern", 52, CORE_CRAFTING, &[]),
    card("card_redstone", 25, UpgradeKind::Redstone),
    card("card_capacity", 27, UpgradeKind::Capacity),
    card("card_fuzzy", 29, UpgradeKind::Fuzzy),
    card("card_speed", 30, UpgradeKind::Speed),
    card("card_inverter", 31, UpgradeKind::Inverter),
    card("card_crafting", 53, UpgradeKind::Crafting),
    card("card_pattern_capacity", 54, UpgradeKind::PatternCapacity),
    card("card_ore_filter", 55, UpgradeKind::OreFilter),
    card("card_sticky", 56, UpgradeKind::Sticky),
    card("card_super_speed", 57, UpgradeKind::SuperSpeed),
    card("card_pattern_refiller", 58, UpgradeKind::PatternRefiller),
    card("card_void_overflow", 59, UpgradeKind::VoidOverflow),
    card("card_advanced_blocking", 60, UpgradeKind::AdvancedBlocking),
    card("card_lock_crafting", 61, UpgradeKind::LockCrafting),
    card("card_fake_crafting", 62, UpgradeKind::FakeCrafting),
    card("card_superluminal_speed", 63, UpgradeKind::SuperluminalSpeed),
    card("card_distribution", 64, UpgradeKind::Distribution),
];
