//! Feature gates for registrable content
//!
//! The host decides which features are on; the registry only asks.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Optional content groups a material can depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Core,
    StorageCells,
    Crafting,
    QuartzTools,
    Channels,
}

/// Set of enabled features
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    enabled: FxHashSet<Feature>,
}

impl FeatureFlags {
    /// Nothing enabled
    pub fn none() -> Self {
        Self::default()
    }

    /// Every feature enabled
    pub fn all() -> Self {
        [
            Feature::Core,
            Feature::StorageCells,
            Feature::Crafting,
            Feature::QuartzTools,
            Feature::Channels,
        ]
        .into_iter()
        .collect()
    }

    pub fn enable(&mut self, feature: Feature) -> &mut Self {
        self.enabled.insert(feature);
        self
    }

    pub fn disable(&mut self, feature: Feature) -> &mut Self {
        self.enabled.remove(&feature);
        self
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.enabled.contains(&feature)
    }

    /// True when every feature in `required` is enabled
    pub fn all_enabled(&self, required: &[Feature]) -> bool {
        required.iter().all(|f| self.is_enabled(*f))
    }
}

impl FromIterator<Feature> for FeatureFlags {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self {
            enabled: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_enabled() {
        let mut flags = FeatureFlags::none();
        flags.enable(Feature::Core).enable(Feature::Crafting);
        assert!(flags.all_enabled(&[Feature::Core, Feature::Crafting]));
        assert!(!flags.all_enabled(&[Feature::Core, Feature::Channels]));
        assert!(flags.all_enabled(&[]));

        flags.disable(Feature::Crafting);
        assert!(!flags.is_enabled(Feature::Crafting));
    }
}
