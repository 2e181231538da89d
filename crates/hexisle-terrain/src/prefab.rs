//! Tile prefabs: part hierarchy, base/decorative classification, and manifests.
//!
//! Raw node trees are classified exactly once, at registration, into parts
//! tagged [`PartRole::Base`] (the part whose size determines the cell
//! footprint) or [`PartRole::Decorative`] (everything else, which receives
//! scale jitter when placed). Nothing downstream re-inspects names.

mod manifest;
mod part;
mod registry;

pub use manifest::{ManifestError, PrefabManifest, VariantEntry};
pub use part::{Aabb, PartRole, PartTransform, Prefab, PrefabPart};
pub use registry::{
    DEFAULT_BASE_MARKER, NodeDescriptor, PrefabError, PrefabRegistry, VariantId, classify_node,
};
