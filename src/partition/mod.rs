//! Partition matching
//!
//! Decides whether an item identity passes a composite filter.
//!
//! - **Leaf matchers**: precise, fuzzy and tag-expanded membership tests
//! - **Merged lists**: ordered inclusive/exclusive stacks of matchers
//! - **Results**: a built list, or the unrestricted sentinel
//!
//! Evaluation is synchronous and never fails. A built list holds no
//! reference to the view cells it came from.

pub mod fuzzy;
pub mod leaf;
pub mod merged;
pub mod result;
pub mod tag_filter;

pub use fuzzy::{fuzzy_bucket, FuzzyBucket, FuzzyMode};
pub use leaf::{FuzzyMatcher, LeafMatcher, PreciseMatcher, TagExpandedMatcher};
pub use merged::{Matcher, MergedPartitionList, PartitionEntry, PrecedencePolicy};
pub use result::PartitionResult;
pub use tag_filter::{TagFilter, TagFilterError, TagPattern};
