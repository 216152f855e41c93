//! Per-thread partition cache
//!
//! Rebuilding a partition for every query batch is wasteful when the view
//! cells have not changed. The cache keys a built partition by the full
//! content of every view cell, the precedence policy, and the tag registry
//! generation. A change in any of them forces a rebuild.
//!
//! Not shared between threads: each worker owns its own cache.

use crate::cell::{PartitionBuilder, ViewCellConfig};
use crate::config::PartitionConfig;
use crate::partition::{PartitionResult, PrecedencePolicy};
use rustc_hash::{FxHashMap, FxHasher};
use std::collections::hash_map::Entry;
use std::hash::{Hash, Hasher};

struct CachedPartition {
    cells: Vec<ViewCellConfig>,
    policy: PrecedencePolicy,
    generation: u64,
    result: PartitionResult,
}

impl CachedPartition {
    fn build(builder: &PartitionBuilder, cells: &[ViewCellConfig], generation: u64) -> Self {
        Self {
            cells: cells.to_vec(),
            policy: builder.policy(),
            generation,
            result: builder.build(cells),
        }
    }

    fn is_current(
        &self,
        policy: PrecedencePolicy,
        generation: u64,
        cells: &[ViewCellConfig],
    ) -> bool {
        self.generation == generation
            && self.policy == policy
            && self.cells.len() == cells.len()
            && self
                .cells
                .iter()
                .zip(cells)
                .all(|(cached, cell)| same_content(cached, cell))
    }
}

/// Field-wise comparison that also checks example tolerance tags,
/// which `ItemIdentity` equality ignores
fn same_content(a: &ViewCellConfig, b: &ViewCellConfig) -> bool {
    a == b
        && a.examples
            .iter()
            .zip(&b.examples)
            .all(|(x, y)| x.max_damage() == y.max_damage())
}

/// Cache of built partitions
pub struct PartitionCache {
    capacity: usize,
    entries: FxHashMap<u64, CachedPartition>,
    hits: u64,
    misses: u64,
}

impl PartitionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: FxHashMap::default(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn from_config(config: &PartitionConfig) -> Self {
        Self::new(config.cache_capacity)
    }

    fn key(policy: PrecedencePolicy, cells: &[ViewCellConfig]) -> u64 {
        let mut hasher = FxHasher::default();
        policy.hash(&mut hasher);
        cells.len().hash(&mut hasher);
        for cell in cells {
            cell.fingerprint(&mut hasher);
        }
        hasher.finish()
    }

    /// Cached partition for `cells`, building it if missing or stale
    pub fn get_or_build(
        &mut self,
        builder: &PartitionBuilder,
        cells: &[ViewCellConfig],
    ) -> &PartitionResult {
        let policy = builder.policy();
        let generation = builder.registry().generation();
        let key = Self::key(policy, cells);

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            log::debug!(
                "Partition cache full ({} entries), flushing",
                self.entries.len()
            );
            self.entries.clear();
        }

        let cached = match self.entries.entry(key) {
            Entry::Occupied(occupied) => {
                let cached = occupied.into_mut();
                if cached.is_current(policy, generation, cells) {
                    self.hits += 1;
                } else {
                    log::trace!("Partition cache entry stale, rebuilding");
                    self.misses += 1;
                    *cached = CachedPartition::build(builder, cells, generation);
                }
                cached
            }
            Entry::Vacant(vacant) => {
                self.misses += 1;
                vacant.insert(CachedPartition::build(builder, cells, generation))
            }
        };

        &cached.result
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Capabilities;
    use crate::item::{ItemIdentity, ItemKind};
    use crate::registry::InMemoryTagRegistry;
    use std::sync::Arc;

    const LOG: ItemIdentity = ItemIdentity::new(ItemKind(17), 0);
    const STONE: ItemIdentity = ItemIdentity::new(ItemKind(1), 0);

    fn precise_cell(item: ItemIdentity) -> ViewCellConfig {
        ViewCellConfig {
            examples: vec![item],
            ..Default::default()
        }
    }

    #[test]
    fn test_hit_on_unchanged_cells() {
        let builder = PartitionBuilder::new(Arc::new(InMemoryTagRegistry::new()));
        let mut cache = PartitionCache::new(4);
        let cells = vec![precise_cell(STONE)];

        assert!(cache.get_or_build(&builder, &cells).matches(&STONE));
        assert!(cache.get_or_build(&builder, &cells).matches(&STONE));
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_config_change_rebuilds() {
        let builder = PartitionBuilder::new(Arc::new(InMemoryTagRegistry::new()));
        let mut cache = PartitionCache::new(4);
        let mut cells = vec![precise_cell(STONE)];
        assert!(cache.get_or_build(&builder, &cells).matches(&STONE));

        cells[0].capabilities.inverter = true;
        assert!(!cache.get_or_build(&builder, &cells).matches(&STONE));

        cells[0].active = false;
        assert!(cache.get_or_build(&builder, &cells).is_unrestricted());
        assert_eq!(cache.misses(), 3);
    }

    #[test]
    fn test_registry_change_rebuilds() {
        let tags = Arc::new(InMemoryTagRegistry::new());
        let builder = PartitionBuilder::new(tags.clone());
        let mut cache = PartitionCache::new(4);
        let cells = vec![ViewCellConfig {
            capabilities: Capabilities {
                tag_filter: true,
                ..Default::default()
            },
            tag_filter: "logWood".to_string(),
            ..Default::default()
        }];

        assert!(!cache.get_or_build(&builder, &cells).matches(&LOG));
        tags.register("logWood", LOG);
        assert!(cache.get_or_build(&builder, &cells).matches(&LOG));
        assert_eq!(cache.misses(), 2);
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn test_policy_is_part_of_key() {
        let registry: Arc<InMemoryTagRegistry> = Arc::new(InMemoryTagRegistry::new());
        let first = PartitionBuilder::new(registry.clone());
        let exclusions = PartitionBuilder::new(registry).with_policy(PrecedencePolicy::ExclusionsFirst);
        let mut cache = PartitionCache::new(4);

        let mut excluded = precise_cell(STONE);
        excluded.capabilities.inverter = true;
        let cells = vec![excluded];

        assert!(!cache.get_or_build(&first, &cells).matches(&LOG));
        assert!(cache.get_or_build(&exclusions, &cells).matches(&LOG));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_tolerance_tag_change_rebuilds() {
        let builder = PartitionBuilder::new(Arc::new(InMemoryTagRegistry::new()));
        let mut cache = PartitionCache::new(4);
        let pick = ItemKind(257);

        let mut cells = vec![ViewCellConfig {
            capabilities: Capabilities {
                fuzzy: true,
                ..Default::default()
            },
            fuzzy_mode: crate::partition::FuzzyMode::Percent50,
            examples: vec![ItemIdentity::damageable(pick, 10, 100)],
            ..Default::default()
        }];
        cache.get_or_build(&builder, &cells);
        cells[0].examples[0] = ItemIdentity::damageable(pick, 10, 11);
        cache.get_or_build(&builder, &cells);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn test_flush_when_full() {
        let builder = PartitionBuilder::new(Arc::new(InMemoryTagRegistry::new()));
        let mut cache = PartitionCache::new(2);
        for kind in 0..3 {
            cache.get_or_build(&builder, &[precise_cell(ItemIdentity::new(ItemKind(kind), 0))]);
        }
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
