//! Partition Query System
//!
//! Runs a built partition over a whole listing at once, the way a terminal
//! refreshes its item view. Accepted entries are tracked in a bitset and
//! collected into indices at the end.
use crate::item::{ItemIdentity, ItemStack};
use crate::partition::PartitionResult;
use bit_vec::BitVec;

/// Query result with indices
pub struct QueryResult {
    /// Accepted listing indices
    pub indices: Vec<usize>,
    /// Total entries checked
    pub total_checked: usize,
    /// Query execution time
    pub execution_time_us: u64,
}

/// Query executor
pub struct PartitionQuery<'a> {
    partition: &'a PartitionResult,
}

impl<'a> PartitionQuery<'a> {
    pub fn new(partition: &'a PartitionResult) -> Self {
        Self { partition }
    }

    /// Acceptance bitset for `items`
    pub fn mask(&self, items: &[ItemIdentity]) -> BitVec {
        if self.partition.is_unrestricted() {
            return BitVec::from_elem(items.len(), true);
        }

        let mut matches = BitVec::from_elem(items.len(), false);
        for (i, item) in items.iter().enumerate() {
            if self.partition.matches(item) {
                matches.set(i, true);
            }
        }
        matches
    }

    /// Execute a query
    pub fn execute(&self, items: &[ItemIdentity]) -> QueryResult {
        let start = std::time::Instant::now();

        let matches = self.mask(items);
        let indices: Vec<usize> = matches
            .iter()
            .enumerate()
            .filter_map(|(i, matches)| if matches { Some(i) } else { None })
            .collect();

        QueryResult {
            indices,
            total_checked: items.len(),
            execution_time_us: start.elapsed().as_micros() as u64,
        }
    }

    /// Count accepted items (without collecting indices)
    pub fn count(&self, items: &[ItemIdentity]) -> usize {
        self.mask(items).iter().filter(|&m| m).count()
    }

    /// Stacks the partition lets through, in listing order
    pub fn visible<'s>(&self, stacks: &'s [ItemStack]) -> Vec<&'s ItemStack> {
        stacks
            .iter()
            .filter(|stack| self.partition.matches(&ItemIdentity::from_stack(stack)))
            .collect()
    }
}
