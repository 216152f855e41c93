//! Fuzzy tolerance buckets
//!
//! Damageable items are grouped by how much durability they have left.
//! Bucket counts form a divisor chain (1 | 2 | 4 | 20 | 100), so a finer mode
//! only ever splits the buckets of a coarser one.

use crate::constants::fuzzy::MAX_BUCKETS;
use crate::item::ItemIdentity;
use serde::{Deserialize, Serialize};

/// Tolerance level used by fuzzy view cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuzzyMode {
    /// Any variant of the kind matches
    #[default]
    IgnoreAll,
    /// Above / below half durability
    Percent50,
    /// Quarters of durability
    Percent25,
    /// 5% steps
    Percent5,
    /// 1% steps
    Percent1,
}

impl FuzzyMode {
    pub const ALL: [FuzzyMode; 5] = [
        FuzzyMode::IgnoreAll,
        FuzzyMode::Percent50,
        FuzzyMode::Percent25,
        FuzzyMode::Percent5,
        FuzzyMode::Percent1,
    ];

    /// Number of durability buckets this mode splits a kind into
    pub const fn buckets(self) -> u32 {
        match self {
            FuzzyMode::IgnoreAll => 1,
            FuzzyMode::Percent50 => 2,
            FuzzyMode::Percent25 => 4,
            FuzzyMode::Percent5 => 20,
            FuzzyMode::Percent1 => MAX_BUCKETS,
        }
    }
}

/// Equivalence class of an identity under a [`FuzzyMode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuzzyBucket {
    /// Every identity of the kind
    Any,
    /// Durability bucket, 0 is the most worn
    Durability(u32),
    /// Non-damageable items only match their own sub-variant
    Variant(u16),
}

/// Bucket of `id` under `mode`. Total over every damage value, including
/// damage beyond the durability span.
pub fn fuzzy_bucket(mode: FuzzyMode, id: &ItemIdentity) -> FuzzyBucket {
    if mode == FuzzyMode::IgnoreAll {
        return FuzzyBucket::Any;
    }

    match id.max_damage() {
        Some(max) if max > 0 => {
            let max = u32::from(max);
            let remaining = max - u32::from(id.damage()).min(max);
            let n = mode.buckets();
            FuzzyBucket::Durability((remaining * n / max).min(n - 1))
        }
        _ => FuzzyBucket::Variant(id.damage()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;

    const SWORD: ItemKind = ItemKind(267);

    #[test]
    fn test_ignore_all_is_single_bucket() {
        let fresh = ItemIdentity::damageable(SWORD, 0, 250);
        let broken = ItemIdentity::damageable(SWORD, 249, 250);
        let plain = ItemIdentity::new(SWORD, 999);
        assert_eq!(fuzzy_bucket(FuzzyMode::IgnoreAll, &fresh), FuzzyBucket::Any);
        assert_eq!(fuzzy_bucket(FuzzyMode::IgnoreAll, &broken), FuzzyBucket::Any);
        assert_eq!(fuzzy_bucket(FuzzyMode::IgnoreAll, &plain), FuzzyBucket::Any);
    }

    #[test]
    fn test_half_split() {
        let fresh = ItemIdentity::damageable(SWORD, 0, 100);
        let worn = ItemIdentity::damageable(SWORD, 40, 100);
        let broken = ItemIdentity::damageable(SWORD, 60, 100);
        assert_eq!(fuzzy_bucket(FuzzyMode::Percent50, &fresh), FuzzyBucket::Durability(1));
        assert_eq!(fuzzy_bucket(FuzzyMode::Percent50, &worn), FuzzyBucket::Durability(1));
        assert_eq!(fuzzy_bucket(FuzzyMode::Percent50, &broken), FuzzyBucket::Durability(0));
    }

    #[test]
    fn test_total_past_max_damage() {
        let over = ItemIdentity::damageable(SWORD, u16::MAX, 10);
        for mode in FuzzyMode::ALL {
            let bucket = fuzzy_bucket(mode, &over);
            if mode != FuzzyMode::IgnoreAll {
                assert_eq!(bucket, FuzzyBucket::Durability(0));
            }
        }
    }

    #[test]
    fn test_non_damageable_uses_variant() {
        let a = ItemIdentity::new(ItemKind(35), 4);
        assert_eq!(fuzzy_bucket(FuzzyMode::Percent25, &a), FuzzyBucket::Variant(4));
        let zero_span = ItemIdentity::damageable(ItemKind(35), 4, 0);
        assert_eq!(fuzzy_bucket(FuzzyMode::Percent25, &zero_span), FuzzyBucket::Variant(4));
    }

    #[test]
    fn test_finer_modes_never_merge_coarser_buckets() {
        for max in [1u16, 3, 7, 100, 250, 1561] {
            for a in 0..=max {
                for b in [0, max / 3, max / 2, max] {
                    let ia = ItemIdentity::damageable(SWORD, a, max);
                    let ib = ItemIdentity::damageable(SWORD, b, max);
                    for (i, coarse) in FuzzyMode::ALL.iter().enumerate() {
                        for fine in &FuzzyMode::ALL[i..] {
                            let fine_same = fuzzy_bucket(*fine, &ia) == fuzzy_bucket(*fine, &ib);
                            let coarse_same =
                                fuzzy_bucket(*coarse, &ia) == fuzzy_bucket(*coarse, &ib);
                            assert!(
                                !fine_same || coarse_same,
                                "{:?} merged {} and {} which {:?} separates",
                                fine,
                                ia,
                                ib,
                                coarse
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_bucket_counts_divide_max() {
        for mode in FuzzyMode::ALL {
            assert_eq!(MAX_BUCKETS % mode.buckets(), 0);
        }
    }
}
