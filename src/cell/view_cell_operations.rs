//! View Cell Operations
//!
//! Reading host snapshots into configurations, and folding configurations
//! into one partition.

use super::view_cell_data::{Capabilities, ViewCellConfig, ViewCellSnapshot};
use crate::config::PartitionConfig;
use crate::error::EngineResult;
use crate::item::ItemIdentity;
use crate::partition::{
    FuzzyMatcher, LeafMatcher, MergedPartitionList, PartitionResult, PrecedencePolicy,
    PreciseMatcher, TagExpandedMatcher, TagFilter,
};
use crate::registry::{upgrade_for, MaterialRegistryData, TagRegistry};
use std::sync::Arc;

/// Turn raw host state into a view cell configuration.
///
/// Slots beyond the configured limits are ignored, as are upgrade slots
/// holding anything that is not a registered upgrade card.
pub fn read_view_cell(
    snapshot: &ViewCellSnapshot,
    materials: &MaterialRegistryData,
    config: &PartitionConfig,
) -> ViewCellConfig {
    let limits = &config.view_cell;

    let capabilities = Capabilities::from_upgrades(
        snapshot
            .upgrades
            .iter()
            .take(limits.upgrade_slots)
            .flatten()
            .filter_map(|card| upgrade_for(materials, card)),
    );

    let examples: Vec<ItemIdentity> = snapshot
        .config
        .iter()
        .take(limits.config_slots)
        .flatten()
        .copied()
        .collect();

    ViewCellConfig {
        active: snapshot.view_mode.unwrap_or(true),
        capabilities,
        fuzzy_mode: snapshot.fuzzy_mode.unwrap_or(config.default_fuzzy_mode),
        tag_filter: snapshot.ore_filter.clone(),
        examples,
    }
}

/// Read every occupied slot of a view cell terminal, skipping empty ones
pub fn read_view_cells(
    snapshots: &[Option<ViewCellSnapshot>],
    materials: &MaterialRegistryData,
    config: &PartitionConfig,
) -> Vec<ViewCellConfig> {
    snapshots
        .iter()
        .flatten()
        .map(|snapshot| read_view_cell(snapshot, materials, config))
        .collect()
}

/// Assembles partitions from view cell configurations
#[derive(Clone)]
pub struct PartitionBuilder {
    registry: Arc<dyn TagRegistry>,
    policy: PrecedencePolicy,
}

impl PartitionBuilder {
    pub fn new(registry: Arc<dyn TagRegistry>) -> Self {
        Self {
            registry,
            policy: PrecedencePolicy::default(),
        }
    }

    pub fn from_config(config: &PartitionConfig, registry: Arc<dyn TagRegistry>) -> Self {
        Self::new(registry).with_policy(config.precedence)
    }

    pub fn with_policy(mut self, policy: PrecedencePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> PrecedencePolicy {
        self.policy
    }

    pub fn registry(&self) -> &Arc<dyn TagRegistry> {
        &self.registry
    }

    /// Fold `cells` into one partition, in the order given.
    ///
    /// Inactive cells and cells with nothing to filter on are skipped. When no
    /// cell contributes, the result is `Unrestricted`.
    pub fn build(&self, cells: &[ViewCellConfig]) -> PartitionResult {
        let mut merged = MergedPartitionList::with_policy(self.policy);

        for (index, cell) in cells.iter().enumerate() {
            if !cell.active {
                log::trace!("View cell {} disabled, skipped", index);
                continue;
            }

            let Some(leaf) = self.matcher_for(cell) else {
                log::debug!("View cell {} has nothing to filter on", index);
                continue;
            };

            let inclusive = !cell.capabilities.inverter;
            log::trace!(
                "View cell {} adds {} matcher ({})",
                index,
                leaf.strategy(),
                if inclusive { "inclusive" } else { "exclusive" }
            );
            merged.add_leaf(leaf, inclusive);
        }

        if merged.is_empty() {
            PartitionResult::Unrestricted
        } else {
            log::debug!(
                "Built partition with {} entries from {} view cells",
                merged.len(),
                cells.len()
            );
            PartitionResult::Restricted(merged)
        }
    }

    /// Reject active cells whose tag filter cannot be parsed.
    ///
    /// `build` quietly drops such cells; this lets a host surface the
    /// problem to whoever configured the terminal.
    pub fn validate(&self, cells: &[ViewCellConfig]) -> EngineResult<()> {
        for cell in cells.iter().filter(|cell| cell.active) {
            if cell.capabilities.tag_filter && !cell.tag_filter.is_empty() {
                TagFilter::parse(&cell.tag_filter)?;
            }
        }
        Ok(())
    }

    /// Pick the single strategy a view cell contributes, if any
    pub fn matcher_for(&self, cell: &ViewCellConfig) -> Option<LeafMatcher> {
        if cell.capabilities.tag_filter && !cell.tag_filter.is_empty() {
            let filter = TagFilter::parse_lenient(&cell.tag_filter);
            if filter.is_empty() {
                return None;
            }
            return Some(TagExpandedMatcher::new(filter, Arc::clone(&self.registry)).into());
        }

        if cell.examples.is_empty() {
            return None;
        }

        let examples = cell.examples.iter().copied();
        if cell.capabilities.fuzzy {
            Some(FuzzyMatcher::from_items(examples, cell.fuzzy_mode).into())
        } else {
            Some(PreciseMatcher::from_items(examples).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::UpgradeKind;
    use crate::error::EngineError;
    use crate::item::ItemKind;
    use crate::partition::FuzzyMode;
    use crate::registry::{
        create_material_registry, identity_of, register_all, FeatureFlags, InMemoryTagRegistry,
        MATERIALS,
    };

    const MULTI_MATERIAL: ItemKind = ItemKind(4000);
    const COBBLE: ItemIdentity = ItemIdentity::new(ItemKind(4), 0);

    fn materials() -> MaterialRegistryData {
        let mut data = create_material_registry(MULTI_MATERIAL);
        register_all(&mut data, MATERIALS, &FeatureFlags::all()).expect("built-ins register");
        data
    }

    fn card(data: &MaterialRegistryData, name: &str) -> Option<ItemIdentity> {
        Some(identity_of(data, name).expect("card registered"))
    }

    #[test]
    fn test_read_resolves_upgrade_cards() {
        let data = materials();
        let snapshot = ViewCellSnapshot {
            upgrades: vec![card(&data, "card_fuzzy"), card(&data, "card_inverter")],
            config: vec![None, Some(COBBLE)],
            fuzzy_mode: Some(FuzzyMode::Percent25),
            ..Default::default()
        };

        let cell = read_view_cell(&snapshot, &data, &PartitionConfig::default());
        assert!(cell.active);
        assert_eq!(
            cell.capabilities,
            Capabilities::from_upgrades([UpgradeKind::Fuzzy, UpgradeKind::Inverter])
        );
        assert_eq!(cell.fuzzy_mode, FuzzyMode::Percent25);
        assert_eq!(cell.examples, vec![COBBLE]);
    }

    #[test]
    fn test_read_ignores_slots_beyond_limits() {
        let data = materials();
        let snapshot = ViewCellSnapshot {
            upgrades: vec![None, None, card(&data, "card_inverter")],
            ..Default::default()
        };
        let cell = read_view_cell(&snapshot, &data, &PartitionConfig::default());
        assert!(!cell.capabilities.inverter);
    }

    #[test]
    fn test_read_ignores_non_card_upgrades() {
        let data = materials();
        let snapshot = ViewCellSnapshot {
            upgrades: vec![Some(COBBLE), card(&data, "card_speed")],
            ..Default::default()
        };
        let cell = read_view_cell(&snapshot, &data, &PartitionConfig::default());
        assert_eq!(cell.capabilities, Capabilities::default());
    }

    #[test]
    fn test_read_view_mode() {
        let data = materials();
        let disabled = ViewCellSnapshot {
            view_mode: Some(false),
            ..Default::default()
        };
        assert!(!read_view_cell(&disabled, &data, &PartitionConfig::default()).active);
        let untouched = ViewCellSnapshot::default();
        assert!(read_view_cell(&untouched, &data, &PartitionConfig::default()).active);
    }

    #[test]
    fn test_read_view_cells_skips_empty_slots() {
        let data = materials();
        let cells = read_view_cells(
            &[None, Some(ViewCellSnapshot::default()), None],
            &data,
            &PartitionConfig::default(),
        );
        assert_eq!(cells.len(), 1);
    }

    #[test]
    fn test_matcher_selection() {
        let builder = PartitionBuilder::new(Arc::new(InMemoryTagRegistry::new()));
        let mut cell = ViewCellConfig {
            examples: vec![COBBLE],
            tag_filter: "cobblestone".to_string(),
            ..Default::default()
        };

        let strategy = |builder: &PartitionBuilder, cell: &ViewCellConfig| {
            builder.matcher_for(cell).map(|m| m.strategy())
        };

        assert_eq!(strategy(&builder, &cell), Some("precise"));

        cell.capabilities.fuzzy = true;
        assert_eq!(strategy(&builder, &cell), Some("fuzzy"));

        cell.capabilities.tag_filter = true;
        assert_eq!(strategy(&builder, &cell), Some("tag"));

        cell.tag_filter.clear();
        assert_eq!(strategy(&builder, &cell), Some("fuzzy"));

        cell.examples.clear();
        assert_eq!(strategy(&builder, &cell), None);
    }

    #[test]
    fn test_malformed_tag_filter_contributes_nothing() {
        let builder = PartitionBuilder::new(Arc::new(InMemoryTagRegistry::new()));
        let cell = ViewCellConfig {
            capabilities: Capabilities {
                tag_filter: true,
                ..Default::default()
            },
            tag_filter: "ingot(Iron)".to_string(),
            examples: vec![COBBLE],
            ..Default::default()
        };
        assert!(builder.matcher_for(&cell).is_none());
        assert!(builder.build(&[cell]).is_unrestricted());
    }

    #[test]
    fn test_validate_reports_malformed_tag_filter() {
        let builder = PartitionBuilder::new(Arc::new(InMemoryTagRegistry::new()));
        let tag_cell = |filter: &str, active: bool| ViewCellConfig {
            active,
            capabilities: Capabilities {
                tag_filter: true,
                ..Default::default()
            },
            tag_filter: filter.to_string(),
            ..Default::default()
        };

        builder
            .validate(&[tag_cell("dust*, ingotIron", true)])
            .expect("well-formed filter passes");
        builder
            .validate(&[tag_cell("ingot(Iron)", false)])
            .expect("inactive cells are not checked");

        let err = builder
            .validate(&[tag_cell("dustGold", true), tag_cell("ingot(Iron)", true)])
            .expect_err("malformed filter is reported");
        assert!(matches!(
            err,
            EngineError::InvalidTagFilter { ref filter, .. } if filter == "ingot(Iron)"
        ));
    }

    #[test]
    fn test_builder_uses_configured_policy() {
        let config = PartitionConfig {
            precedence: PrecedencePolicy::ExclusionsFirst,
            ..Default::default()
        };
        let builder = PartitionBuilder::from_config(&config, Arc::new(InMemoryTagRegistry::new()));
        let result = builder.build(&[ViewCellConfig {
            examples: vec![COBBLE],
            ..Default::default()
        }]);
        assert_eq!(
            result.as_list().map(|l| l.policy()),
            Some(PrecedencePolicy::ExclusionsFirst)
        );
    }
}
