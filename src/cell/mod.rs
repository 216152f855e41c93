//! View cells
//!
//! A view cell is a filter item placed in a terminal. Each one carries example
//! items, an optional tag filter and up to two upgrade cards. The terminal
//! combines all of its cells into one partition.

// Data structures
pub mod view_cell_data;
// Operations
pub mod view_cell_operations;

pub use view_cell_data::{Capabilities, UpgradeKind, ViewCellConfig, ViewCellSnapshot};
pub use view_cell_operations::{read_view_cell, read_view_cells, PartitionBuilder};
