//! Shared constants for the partition engine.

/// View cell slot layout
pub mod view_cell {
    /// Upgrade slots on a single view cell
    pub const UPGRADE_SLOTS: usize = 2;
    /// Example item slots on a single view cell
    pub const CONFIG_SLOTS: usize = 63;
}

/// Partition cache defaults
pub mod cache {
    /// Built partitions kept per thread before the cache is flushed
    pub const DEFAULT_CAPACITY: usize = 16;
}

/// Fuzzy matching resolution
pub mod fuzzy {
    /// Finest bucket count; every coarser mode must divide it
    pub const MAX_BUCKETS: u32 = 100;
}
