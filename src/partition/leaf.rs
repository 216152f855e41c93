//! Leaf matchers
//!
//! Each strategy answers one question: is this identity in my set?

use super::fuzzy::{fuzzy_bucket, FuzzyBucket, FuzzyMode};
use super::tag_filter::TagFilter;
use crate::item::{ItemIdentity, ItemKind};
use crate::registry::TagRegistry;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::sync::Arc;

/// Exact set membership
#[derive(Debug, Clone, Default)]
pub struct PreciseMatcher {
    items: FxHashSet<ItemIdentity>,
}

impl PreciseMatcher {
    /// An empty iterator gives a matcher that matches nothing
    pub fn from_items<I: IntoIterator<Item = ItemIdentity>>(items: I) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: &ItemIdentity) -> bool {
        self.items.contains(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Tolerant membership: same kind, same durability bucket
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    mode: FuzzyMode,
    buckets: FxHashMap<ItemKind, FxHashSet<FuzzyBucket>>,
}

impl FuzzyMatcher {
    /// Buckets are computed once here so `contains` is two hash lookups
    pub fn from_items<I: IntoIterator<Item = ItemIdentity>>(items: I, mode: FuzzyMode) -> Self {
        let mut buckets: FxHashMap<ItemKind, FxHashSet<FuzzyBucket>> = FxHashMap::default();
        for item in items {
            buckets
                .entry(item.kind())
                .or_default()
                .insert(fuzzy_bucket(mode, &item));
        }
        Self { mode, buckets }
    }

    pub fn mode(&self) -> FuzzyMode {
        self.mode
    }

    pub fn contains(&self, id: &ItemIdentity) -> bool {
        self.buckets
            .get(&id.kind())
            .is_some_and(|buckets| buckets.contains(&fuzzy_bucket(self.mode, id)))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Membership resolved through the tag registry at every call
#[derive(Clone)]
pub struct TagExpandedMatcher {
    filter: TagFilter,
    registry: Arc<dyn TagRegistry>,
}

impl TagExpandedMatcher {
    pub fn new(filter: TagFilter, registry: Arc<dyn TagRegistry>) -> Self {
        Self { filter, registry }
    }

    /// Parse `filter`; an unparsable string matches nothing
    pub fn parse(filter: &str, registry: Arc<dyn TagRegistry>) -> Self {
        Self::new(TagFilter::parse_lenient(filter), registry)
    }

    pub fn filter(&self) -> &TagFilter {
        &self.filter
    }

    pub fn contains(&self, id: &ItemIdentity) -> bool {
        if self
            .filter
            .exact_names()
            .any(|tag| self.registry.is_tagged(tag, id))
        {
            return true;
        }

        if !self.filter.has_wildcards() {
            return false;
        }
        let tags = self.registry.tags_of(id);
        self.filter
            .any_wildcard_matches(tags.iter().map(String::as_str))
    }
}

impl fmt::Debug for TagExpandedMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagExpandedMatcher")
            .field("filter", &self.filter.source())
            .finish_non_exhaustive()
    }
}

/// One matching strategy
#[derive(Debug, Clone)]
pub enum LeafMatcher {
    Precise(PreciseMatcher),
    Fuzzy(FuzzyMatcher),
    TagExpanded(TagExpandedMatcher),
}

impl LeafMatcher {
    pub fn contains(&self, id: &ItemIdentity) -> bool {
        match self {
            LeafMatcher::Precise(m) => m.contains(id),
            LeafMatcher::Fuzzy(m) => m.contains(id),
            LeafMatcher::TagExpanded(m) => m.contains(id),
        }
    }

    /// Short name for logging
    pub fn strategy(&self) -> &'static str {
        match self {
            LeafMatcher::Precise(_) => "precise",
            LeafMatcher::Fuzzy(_) => "fuzzy",
            LeafMatcher::TagExpanded(_) => "tag",
        }
    }
}

impl From<PreciseMatcher> for LeafMatcher {
    fn from(m: PreciseMatcher) -> Self {
        LeafMatcher::Precise(m)
    }
}

impl From<FuzzyMatcher> for LeafMatcher {
    fn from(m: FuzzyMatcher) -> Self {
        LeafMatcher::Fuzzy(m)
    }
}

impl From<TagExpandedMatcher> for LeafMatcher {
    fn from(m: TagExpandedMatcher) -> Self {
        LeafMatcher::TagExpanded(m)
    }
}
