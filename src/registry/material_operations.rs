//! Material Registry Operations - Pure DOP Functions
//!
//! All functions take data and return results.
//! No methods, no self, just transformations.

use super::features::FeatureFlags;
use super::material_data::{MaterialDefinition, MaterialRegistration, MaterialRegistryData};
use super::tags::InMemoryTagRegistry;
use crate::cell::UpgradeKind;
use crate::error::{EngineError, EngineResult};
use crate::item::{ItemIdentity, ItemKind};
use rustc_hash::{FxHashMap, FxHashSet};

/// Create new material registry data for the item `item`
pub fn create_material_registry(item: ItemKind) -> MaterialRegistryData {
    MaterialRegistryData {
        item,
        slots: FxHashMap::default(),
        name_to_index: FxHashMap::default(),
        seen: FxHashSet::default(),
        registrations: Vec::new(),
    }
}

/// Register a material variant.
///
/// Returns `Ok(None)` when one of the material's features is disabled. A
/// material offered twice (even when its features are off), or a slot claimed
/// by two materials, is a setup error and leaves the registry unchanged.
pub fn register_material(
    data: &mut MaterialRegistryData,
    definition: &MaterialDefinition,
    features: &FeatureFlags,
) -> EngineResult<Option<ItemIdentity>> {
    if data.seen.contains(definition.name) {
        return Err(EngineError::DuplicateMaterial {
            name: definition.name.to_string(),
        });
    }

    if !features.all_enabled(definition.features) {
        data.seen.insert(definition.name);
        log::info!(
            "Material '{}' disabled by features {:?}",
            definition.name,
            definition.features
        );
        return Ok(None);
    }

    if let Some(&index) = data.slots.get(&definition.slot) {
        return Err(EngineError::SlotOverlap {
            slot: definition.slot,
            existing: data.registrations[index].definition.name.to_string(),
            incoming: definition.name.to_string(),
        });
    }

    let identity = ItemIdentity::new(data.item, definition.slot);
    let index = data.registrations.len();
    data.registrations.push(MaterialRegistration {
        identity,
        definition: *definition,
    });
    data.slots.insert(definition.slot, index);
    data.name_to_index.insert(definition.name, index);
    data.seen.insert(definition.name);

    log::debug!(
        "Registered material '{}' in slot {} of {}",
        definition.name,
        definition.slot,
        data.item
    );

    Ok(Some(identity))
}

/// Register every definition in order, stopping at the first setup error
pub fn register_all(
    data: &mut MaterialRegistryData,
    definitions: &[MaterialDefinition],
    features: &FeatureFlags,
) -> EngineResult<Vec<ItemIdentity>> {
    let mut registered = Vec::with_capacity(definitions.len());
    for definition in definitions {
        if let Some(identity) = register_material(data, definition, features)? {
            registered.push(identity);
        }
    }

    log::info!(
        "Registered {} of {} materials for {}",
        registered.len(),
        definitions.len(),
        data.item
    );

    Ok(registered)
}

/// Registration backing `id`, if it is one of this item's variants
pub fn material_for<'a>(
    data: &'a MaterialRegistryData,
    id: &ItemIdentity,
) -> Option<&'a MaterialRegistration> {
    if id.kind() != data.item {
        return None;
    }
    data.slots
        .get(&id.damage())
        .map(|&index| &data.registrations[index])
}

/// Upgrade card type of `id`, if it is a registered card
pub fn upgrade_for(data: &MaterialRegistryData, id: &ItemIdentity) -> Option<UpgradeKind> {
    material_for(data, id).and_then(|registration| registration.definition.upgrade)
}

/// Look up a registered material by name
pub fn identity_of(data: &MaterialRegistryData, name: &str) -> Option<ItemIdentity> {
    data.name_to_index
        .get(name)
        .map(|&index| data.registrations[index].identity)
}

/// Registered identities sorted by material name
pub fn registered_identities(data: &MaterialRegistryData) -> Vec<ItemIdentity> {
    let mut registrations: Vec<&MaterialRegistration> = data.registrations.iter().collect();
    registrations.sort_by_key(|r| r.definition.name);
    registrations.into_iter().map(|r| r.identity).collect()
}

/// Publish every registered material under its tag names.
/// Returns the number of new tag entries.
pub fn publish_tags(data: &MaterialRegistryData, tags: &InMemoryTagRegistry) -> usize {
    let mut published = 0;
    for registration in &data.registrations {
        for tag in registration.definition.tags {
            if tags.register(tag, registration.identity) {
                published += 1;
            }
        }
    }
    published
}
