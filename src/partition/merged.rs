//! Merged partition lists
//!
//! An ordered stack of matchers, each tagged inclusive or exclusive. Lists
//! nest: a merged list can sit inside another one as a single entry.

use super::leaf::LeafMatcher;
use crate::item::ItemIdentity;
use serde::{Deserialize, Serialize};

/// How overlapping inclusive and exclusive entries are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecedencePolicy {
    /// The earliest entry containing the identity decides.
    /// Nothing contains it: rejected.
    #[default]
    FirstMatch,
    /// Any exclusive hit rejects. Otherwise an inclusive entry must contain
    /// the identity, unless the list has no inclusive entries at all.
    ExclusionsFirst,
}

/// Entry payload: a leaf strategy or a nested list
#[derive(Debug, Clone)]
pub enum Matcher {
    Leaf(LeafMatcher),
    Merged(MergedPartitionList),
}

impl Matcher {
    /// A nested list contains an identity when it accepts it
    pub fn contains(&self, id: &ItemIdentity) -> bool {
        match self {
            Matcher::Leaf(leaf) => leaf.contains(id),
            Matcher::Merged(list) => list.matches(id),
        }
    }
}

impl From<LeafMatcher> for Matcher {
    fn from(leaf: LeafMatcher) -> Self {
        Matcher::Leaf(leaf)
    }
}

impl From<MergedPartitionList> for Matcher {
    fn from(list: MergedPartitionList) -> Self {
        Matcher::Merged(list)
    }
}

#[derive(Debug, Clone)]
pub struct PartitionEntry {
    pub matcher: Matcher,
    pub inclusive: bool,
}

/// Ordered composition of matchers
#[derive(Debug, Clone, Default)]
pub struct MergedPartitionList {
    entries: Vec<PartitionEntry>,
    policy: PrecedencePolicy,
}

impl MergedPartitionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: PrecedencePolicy) -> Self {
        Self {
            entries: Vec::new(),
            policy,
        }
    }

    /// Append an entry. Insertion order is evaluation priority.
    pub fn add(&mut self, matcher: impl Into<Matcher>, inclusive: bool) {
        self.entries.push(PartitionEntry {
            matcher: matcher.into(),
            inclusive,
        });
    }

    pub fn add_leaf(&mut self, leaf: impl Into<LeafMatcher>, inclusive: bool) {
        self.add(Matcher::Leaf(leaf.into()), inclusive);
    }

    pub fn add_list(&mut self, list: MergedPartitionList, inclusive: bool) {
        self.add(Matcher::Merged(list), inclusive);
    }

    pub fn matches(&self, id: &ItemIdentity) -> bool {
        match self.policy {
            PrecedencePolicy::FirstMatch => self
                .deciding_entry(id)
                .is_some_and(|index| self.entries[index].inclusive),
            PrecedencePolicy::ExclusionsFirst => self.matches_exclusions_first(id),
        }
    }

    /// Index of the first entry containing `id`
    pub fn deciding_entry(&self, id: &ItemIdentity) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.matcher.contains(id))
    }

    fn matches_exclusions_first(&self, id: &ItemIdentity) -> bool {
        let mut has_inclusive = false;
        let mut included = false;

        for entry in &self.entries {
            if entry.inclusive {
                has_inclusive = true;
                if !included && entry.matcher.contains(id) {
                    included = true;
                }
            } else if entry.matcher.contains(id) {
                return false;
            }
        }

        !has_inclusive || included
    }

    pub fn policy(&self) -> PrecedencePolicy {
        self.policy
    }

    pub fn entries(&self) -> &[PartitionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
