//! View cell filtering walkthrough
//!
//! Registers the built-in materials, publishes their tags, then filters a
//! small terminal listing through view cells described in TOML.
//!
//! Run with `RUST_LOG=debug cargo run --example view_cells` to see the
//! builder's decisions.

use hearth_partition::{
    read_view_cell,
    registry::{create_material_registry, identity_of, publish_tags, register_all, MATERIALS},
    FeatureFlags, InMemoryTagRegistry, ItemIdentity, ItemKind, ItemStack, PartitionBuilder,
    PartitionCache, PartitionConfig, PartitionQuery, ViewCellConfig, ViewCellSnapshot,
};
use serde::Deserialize;
use std::sync::Arc;

const MULTI_MATERIAL: ItemKind = ItemKind(4000);

const TERMINAL: &str = r#"
[[cells]]
capabilities = { tag_filter = true, inverter = true }
tag_filter = "dustGold, dust*Quartz"

[[cells]]
examples = [{ kind = 4000, damage = 7 }, { kind = 4000, damage = 51 }]

[[cells]]
active = false
examples = [{ kind = 4000, damage = 0 }]
"#;

#[derive(Deserialize)]
struct Terminal {
    cells: Vec<ViewCellConfig>,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    println!("View Cell Filtering Example");
    println!("===========================");

    let config = PartitionConfig::default();

    let mut materials = create_material_registry(MULTI_MATERIAL);
    let registered = register_all(&mut materials, MATERIALS, &FeatureFlags::all())?;
    println!("Registered {} materials", registered.len());

    let tags = Arc::new(InMemoryTagRegistry::new());
    println!("Published {} tag entries", publish_tags(&materials, &tags));

    let mut cells = toml::from_str::<Terminal>(TERMINAL)?.cells;

    // A fourth cell read from raw host state, with a fuzzy card installed
    let fuzzy_card = identity_of(&materials, "card_fuzzy");
    cells.push(read_view_cell(
        &ViewCellSnapshot {
            upgrades: vec![fuzzy_card],
            config: vec![Some(ItemIdentity::damageable(ItemKind(257), 0, 250))],
            ..Default::default()
        },
        &materials,
        &config,
    ));

    let listing: Vec<ItemStack> = registered
        .iter()
        .map(|id| ItemStack::new(id.kind(), id.damage(), 64))
        .chain([
            ItemStack::damageable(ItemKind(257), 120, 250, 1),
            ItemStack::damageable(ItemKind(258), 0, 250, 1),
        ])
        .collect();

    let builder = PartitionBuilder::from_config(&config, tags);
    builder.validate(&cells)?;
    let mut cache = PartitionCache::from_config(&config);

    for pass in 1..=2 {
        let partition = cache.get_or_build(&builder, &cells);
        let visible = PartitionQuery::new(partition).visible(&listing);
        println!("\nPass {}: {} of {} stacks visible", pass, visible.len(), listing.len());
        for stack in visible {
            println!("  {} x{}", ItemIdentity::from_stack(stack), stack.count);
        }
    }

    println!("\nCache: {} hits, {} misses", cache.hits(), cache.misses());

    Ok(())
}
