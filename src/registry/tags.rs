//! Tag registry
//!
//! Maps tag names (ore dictionary style: `ingotCopper`, `logWood`) to the
//! item identities registered under them. Contents change at runtime as other
//! subsystems register items, so matchers query it live.

use crate::item::ItemIdentity;
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::atomic::{AtomicU64, Ordering};

/// Read side of a tag registry as seen by the partition engine.
///
/// Lookups never fail: unknown tags and untagged items resolve to empty
/// results.
pub trait TagRegistry: Send + Sync {
    /// Identities currently registered under `tag`
    fn resolve(&self, tag: &str) -> Vec<ItemIdentity>;

    /// Tags currently carried by `id`
    fn tags_of(&self, id: &ItemIdentity) -> Vec<String>;

    /// Whether `id` is registered under `tag`
    fn is_tagged(&self, tag: &str, id: &ItemIdentity) -> bool {
        self.resolve(tag).contains(id)
    }

    /// Bumped on every change to the registry contents
    fn generation(&self) -> u64;
}

#[derive(Default)]
struct TagTables {
    by_tag: FxHashMap<String, FxHashSet<ItemIdentity>>,
    by_item: FxHashMap<ItemIdentity, Vec<String>>,
}

/// Thread-safe in-memory tag registry
#[derive(Default)]
pub struct InMemoryTagRegistry {
    tables: RwLock<TagTables>,
    generation: AtomicU64,
}

impl InMemoryTagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` under `tag`. Returns false if it already was.
    pub fn register(&self, tag: &str, id: ItemIdentity) -> bool {
        let mut tables = self.tables.write();
        let inserted = tables.by_tag.entry(tag.to_string()).or_default().insert(id);
        if inserted {
            tables.by_item.entry(id).or_default().push(tag.to_string());
            self.generation.fetch_add(1, Ordering::Release);
            log::trace!("Tagged {} as '{}'", id, tag);
        }
        inserted
    }

    /// Remove `id` from `tag`. Returns false if it was not registered.
    pub fn unregister(&self, tag: &str, id: &ItemIdentity) -> bool {
        let mut tables = self.tables.write();
        let removed = match tables.by_tag.get_mut(tag) {
            Some(members) => members.remove(id),
            None => false,
        };
        if !removed {
            return false;
        }

        if tables.by_tag.get(tag).is_some_and(|m| m.is_empty()) {
            tables.by_tag.remove(tag);
        }
        if let Some(tags) = tables.by_item.get_mut(id) {
            tags.retain(|t| t != tag);
            if tags.is_empty() {
                tables.by_item.remove(id);
            }
        }
        self.generation.fetch_add(1, Ordering::Release);
        true
    }

    /// All known tag names, sorted
    pub fn tag_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().by_tag.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tables.read().by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TagRegistry for InMemoryTagRegistry {
    fn resolve(&self, tag: &str) -> Vec<ItemIdentity> {
        self.tables
            .read()
            .by_tag
            .get(tag)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    fn tags_of(&self, id: &ItemIdentity) -> Vec<String> {
        self.tables
            .read()
            .by_item
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    fn is_tagged(&self, tag: &str, id: &ItemIdentity) -> bool {
        self.tables
            .read()
            .by_tag
            .get(tag)
            .is_some_and(|members| members.contains(id))
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}
