// Hearth Partition - view cell filtering for item terminals
//
// Decides which items a terminal shows, given the view cells installed in it.
// - item: quantity-free item identities
// - partition: leaf matchers, merged lists, the unrestricted sentinel
// - cell: reading view cells and building partitions from them
// - registry: tag registry, material slots, feature gates
// - cache / query: reuse built partitions and run them over listings
//
// Matching is pure and synchronous. Registries are passed in explicitly;
// nothing here reaches for global state.

// Constants module
pub mod constants;

// Core modules
pub mod config;
pub mod error;

// Essential systems
pub mod cell;
pub mod item;
pub mod partition;
pub mod registry;

// Utilities
pub mod cache;
pub mod query;

pub use cache::PartitionCache;
pub use cell::{
    read_view_cell, read_view_cells, Capabilities, PartitionBuilder, UpgradeKind, ViewCellConfig,
    ViewCellSnapshot,
};
pub use config::{PartitionConfig, ViewCellLimits};
pub use error::{EngineError, EngineResult};
pub use item::{ItemIdentity, ItemKind, ItemStack};
pub use partition::{
    FuzzyMatcher, FuzzyMode, LeafMatcher, Matcher, MergedPartitionList, PartitionResult,
    PrecedencePolicy, PreciseMatcher, TagExpandedMatcher, TagFilter,
};
pub use query::{PartitionQuery, QueryResult};
pub use registry::{FeatureFlags, InMemoryTagRegistry, TagRegistry};
