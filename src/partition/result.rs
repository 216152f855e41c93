use super::merged::MergedPartitionList;
use crate::item::ItemIdentity;

/// Outcome of building a partition from view cells
#[derive(Debug, Clone)]
pub enum PartitionResult {
    /// No active view cell contributed a filter: accept everything
    Unrestricted,
    Restricted(MergedPartitionList),
}

impl PartitionResult {
    pub fn matches(&self, id: &ItemIdentity) -> bool {
        match self {
            PartitionResult::Unrestricted => true,
            PartitionResult::Restricted(list) => list.matches(id),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, PartitionResult::Unrestricted)
    }

    pub fn as_list(&self) -> Option<&MergedPartitionList> {
        match self {
            PartitionResult::Unrestricted => None,
            PartitionResult::Restricted(list) => Some(list),
        }
    }

    /// Wrap a list, keeping an empty one distinct from `Unrestricted`
    pub fn restricted(list: MergedPartitionList) -> Self {
        PartitionResult::Restricted(list)
    }
}
