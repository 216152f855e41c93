//! Registries the partition engine reads from
//!
//! - **Tags**: live tag name to identity mapping used by tag filters
//! - **Materials**: variant slots of the multi-material item, including the
//!   upgrade cards view cells accept
//! - **Features**: host-supplied gates for optional content

pub mod features;
// Data structures
pub mod material_data;
// Pure functions
pub mod material_operations;
pub mod tags;

pub use features::{Feature, FeatureFlags};
pub use material_data::{MaterialDefinition, MaterialRegistration, MaterialRegistryData, MATERIALS};
pub use material_operations::{
    create_material_registry, identity_of, material_for, publish_tags, register_all,
    register_material, registered_identities, upgrade_for,
};
pub use tags::{InMemoryTagRegistry, TagRegistry};
