//! Built-in tile set used when no prefab manifest is configured.
//!
//! Three variants in ascending noise order: bare earth with a rock, forest,
//! and grass. Each is a hex base slab plus decorative props standing on it.

use glam::{DQuat, DVec3};
use hexisle_terrain::{Aabb, NodeDescriptor, PartTransform, PrefabError, PrefabRegistry};

/// Flat-to-flat depth of the hex base for a unit corner-to-corner width.
const HEX_DEPTH: f64 = 0.866;

/// Height of the hex base slab.
const SLAB_HEIGHT: f64 = 0.1;

/// Register the built-in variants into a registry using `base_marker`.
pub fn builtin_registry(base_marker: &str) -> Result<PrefabRegistry, PrefabError> {
    let mut registry = PrefabRegistry::with_base_marker(base_marker)?;
    let base = format!("tilehex_{base_marker}");

    registry.register(
        "tilehex_earth",
        &NodeDescriptor::group("tilehex_earth", vec![hex_base(&base), rock()]),
    )?;
    registry.register(
        "tilehex_tree",
        &NodeDescriptor::group("tilehex_tree", vec![hex_base(&base), tree()]),
    )?;
    registry.register(
        "tilehex",
        &NodeDescriptor::group("tilehex", vec![hex_base(&base), grass()]),
    )?;

    Ok(registry)
}

fn hex_base(name: &str) -> NodeDescriptor {
    NodeDescriptor::mesh(
        name,
        Aabb::new(
            DVec3::new(-0.5, 0.0, -HEX_DEPTH / 2.0),
            DVec3::new(0.5, SLAB_HEIGHT, HEX_DEPTH / 2.0),
        ),
        PartTransform::IDENTITY,
    )
}

fn on_slab(x: f64, z: f64) -> PartTransform {
    PartTransform::from_translation(DVec3::new(x, SLAB_HEIGHT, z))
}

fn rock() -> NodeDescriptor {
    let mut transform = on_slab(0.15, -0.1);
    transform.rotation = DQuat::from_rotation_y(0.6);
    NodeDescriptor::mesh(
        "rock",
        Aabb::new(DVec3::new(-0.12, 0.0, -0.1), DVec3::new(0.12, 0.14, 0.1)),
        transform,
    )
}

fn tree() -> NodeDescriptor {
    // Leaves hang off the trunk, so they inherit its placement.
    let mut trunk = NodeDescriptor::mesh(
        "trunk",
        Aabb::new(DVec3::new(-0.04, 0.0, -0.04), DVec3::new(0.04, 0.3, 0.04)),
        on_slab(0.0, 0.0),
    );
    trunk.children.push(NodeDescriptor::mesh(
        "leaves",
        Aabb::new(DVec3::new(-0.2, 0.0, -0.2), DVec3::new(0.2, 0.35, 0.2)),
        PartTransform::from_translation(DVec3::new(0.0, 0.25, 0.0)),
    ));
    trunk
}

fn grass() -> NodeDescriptor {
    NodeDescriptor::group(
        "grass",
        vec![
            NodeDescriptor::mesh(
                "grass_a",
                Aabb::new(DVec3::new(-0.05, 0.0, -0.05), DVec3::new(0.05, 0.08, 0.05)),
                on_slab(-0.2, 0.1),
            ),
            NodeDescriptor::mesh(
                "grass_b",
                Aabb::new(DVec3::new(-0.05, 0.0, -0.05), DVec3::new(0.05, 0.06, 0.05)),
                on_slab(0.18, 0.15),
            ),
        ],
    )
}
