//! Prefab registry: classifies raw node trees and keeps the ordered variant list.

use glam::DMat4;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::{Aabb, PartRole, PartTransform, Prefab, PrefabPart};

/// Default substring marking a mesh node as the tile base.
pub const DEFAULT_BASE_MARKER: &str = "tile";

/// Index of a tile variant in registration order.
///
/// Lower indices are selected for lower noise values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VariantId(pub usize);

/// A node of an externally loaded prefab hierarchy.
///
/// Nodes with `mesh_bounds` become parts; nodes without geometry only
/// contribute their transform to their descendants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    pub name: String,
    #[serde(default)]
    pub transform: PartTransform,
    #[serde(default)]
    pub mesh_bounds: Option<Aabb>,
    #[serde(default)]
    pub children: Vec<NodeDescriptor>,
}

impl NodeDescriptor {
    /// A geometry-less grouping node.
    pub fn group(name: impl Into<String>, children: Vec<NodeDescriptor>) -> Self {
        Self {
            name: name.into(),
            transform: PartTransform::IDENTITY,
            mesh_bounds: None,
            children,
        }
    }

    /// A leaf node carrying mesh bounds.
    pub fn mesh(name: impl Into<String>, bounds: Aabb, transform: PartTransform) -> Self {
        Self {
            name: name.into(),
            transform,
            mesh_bounds: Some(bounds),
            children: Vec::new(),
        }
    }
}

/// Errors that can occur when registering prefabs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PrefabError {
    /// Variant names must be non-empty.
    #[error("prefab name must not be empty")]
    EmptyName,

    /// An empty base marker would tag every mesh node as base.
    #[error("base marker must not be empty")]
    EmptyBaseMarker,

    /// A variant with this name is already registered.
    #[error("duplicate prefab name: {0}")]
    DuplicateName(String),

    /// The hierarchy contains no mesh node at all.
    #[error("prefab `{0}` contains no mesh parts")]
    NoGeometry(String),

    /// A mesh node has NaN or infinite bounds, or a degenerate transform.
    #[error("prefab `{prefab}` node `{node}` has non-finite bounds or transform")]
    NonFiniteGeometry { prefab: String, node: String },
}

/// Decide the role of a mesh node from its name.
pub fn classify_node(name: &str, base_marker: &str) -> PartRole {
    if name.contains(base_marker) {
        PartRole::Base
    } else {
        PartRole::Decorative
    }
}

/// Ordered list of classified tile variants with name lookup.
pub struct PrefabRegistry {
    base_marker: String,
    variants: Vec<Prefab>,
    name_to_id: HashMap<String, VariantId>,
}

impl PrefabRegistry {
    /// Creates an empty registry using [`DEFAULT_BASE_MARKER`].
    pub fn new() -> Self {
        Self {
            base_marker: DEFAULT_BASE_MARKER.to_string(),
            variants: Vec::new(),
            name_to_id: HashMap::new(),
        }
    }

    /// Creates an empty registry that tags mesh nodes containing `marker` as base.
    ///
    /// # Errors
    ///
    /// [`PrefabError::EmptyBaseMarker`] if `marker` is empty.
    pub fn with_base_marker(marker: impl Into<String>) -> Result<Self, PrefabError> {
        let base_marker = marker.into();
        if base_marker.is_empty() {
            return Err(PrefabError::EmptyBaseMarker);
        }
        Ok(Self {
            base_marker,
            ..Self::new()
        })
    }

    /// The naming marker used for classification.
    pub fn base_marker(&self) -> &str {
        &self.base_marker
    }

    /// Classifies `root` and appends it as the next variant.
    ///
    /// # Errors
    ///
    /// Returns [`PrefabError`] for empty or duplicate names, hierarchies
    /// without geometry, or non-finite bounds.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        root: &NodeDescriptor,
    ) -> Result<VariantId, PrefabError> {
        let name = name.into();
        if name.is_empty() {
            return Err(PrefabError::EmptyName);
        }
        if self.name_to_id.contains_key(&name) {
            return Err(PrefabError::DuplicateName(name));
        }

        let mut parts = Vec::new();
        self.flatten(&name, root, DMat4::IDENTITY, &mut parts)?;
        if parts.is_empty() {
            return Err(PrefabError::NoGeometry(name));
        }

        let id = VariantId(self.variants.len());
        tracing::debug!(
            prefab = %name,
            parts = parts.len(),
            base = parts.iter().filter(|p| p.role == PartRole::Base).count(),
            "registered tile variant"
        );
        self.name_to_id.insert(name.clone(), id);
        self.variants.push(Prefab::new(name, parts));
        Ok(id)
    }

    fn flatten(
        &self,
        prefab: &str,
        node: &NodeDescriptor,
        parent: DMat4,
        out: &mut Vec<PrefabPart>,
    ) -> Result<(), PrefabError> {
        let local = node.transform.to_matrix();
        if !local.is_finite() {
            return Err(PrefabError::NonFiniteGeometry {
                prefab: prefab.to_string(),
                node: node.name.clone(),
            });
        }

        if let Some(bounds) = node.mesh_bounds {
            if !bounds.is_finite() {
                return Err(PrefabError::NonFiniteGeometry {
                    prefab: prefab.to_string(),
                    node: node.name.clone(),
                });
            }
            out.push(PrefabPart {
                name: node.name.clone(),
                role: classify_node(&node.name, &self.base_marker),
                bounds: Aabb::new(bounds.min, bounds.max),
                parent_transform: parent,
                transform: node.transform,
            });
        }

        let world = parent * local;
        for child in &node.children {
            self.flatten(prefab, child, world, out)?;
        }
        Ok(())
    }

    /// Returns the variant with the given ID, if any.
    pub fn get(&self, id: VariantId) -> Option<&Prefab> {
        self.variants.get(id.0)
    }

    /// Looks up a variant ID by name.
    pub fn lookup_by_name(&self, name: &str) -> Option<VariantId> {
        self.name_to_id.get(name).copied()
    }

    /// All variants in registration order.
    pub fn variants(&self) -> &[Prefab] {
        &self.variants
    }

    /// Consume the registry, yielding the ordered variant list.
    pub fn into_variants(self) -> Vec<Prefab> {
        self.variants
    }

    /// Returns the number of registered variants.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Returns `true` if no variants are registered.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl Default for PrefabRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn hex_base() -> Aabb {
        Aabb::new(DVec3::new(-0.5, 0.0, -0.433), DVec3::new(0.5, 0.1, 0.433))
    }

    fn tree_node() -> NodeDescriptor {
        NodeDescriptor::group(
            "Scene",
            vec![
                NodeDescriptor::mesh("tilehex_tile", hex_base(), PartTransform::IDENTITY),
                NodeDescriptor::group(
                    "props",
                    vec![NodeDescriptor::mesh(
                        "tree",
                        Aabb::new(DVec3::new(-0.1, 0.0, -0.1), DVec3::new(0.1, 0.6, 0.1)),
                        PartTransform::from_translation(DVec3::new(0.0, 0.1, 0.0)),
                    )],
                ),
            ],
        )
    }

    #[test]
    fn test_classify_by_marker() {
        assert_eq!(classify_node("tilehex_tile", "tile"), PartRole::Base);
        assert_eq!(classify_node("tree_leaves", "tile"), PartRole::Decorative);
        assert_eq!(classify_node("ground", "ground"), PartRole::Base);
    }

    #[test]
    fn test_register_flattens_mesh_nodes_only() {
        let mut reg = PrefabRegistry::new();
        let id = reg.register("tree", &tree_node()).unwrap();
        let prefab = reg.get(id).unwrap();

        assert_eq!(prefab.parts().len(), 2);
        assert_eq!(prefab.base_parts().count(), 1);
        assert_eq!(prefab.decorative_parts().count(), 1);
        assert_eq!(prefab.base_part().unwrap().name, "tilehex_tile");
    }

    #[test]
    fn test_parent_transforms_accumulate() {
        let mut root = tree_node();
        root.transform = PartTransform::from_translation(DVec3::new(2.0, 0.0, 0.0));
        root.children[1].transform = PartTransform::from_translation(DVec3::new(0.0, 0.0, 3.0));

        let mut reg = PrefabRegistry::new();
        let id = reg.register("tree", &root).unwrap();
        let tree = reg.get(id).unwrap().decorative_parts().next().unwrap();
        let center = tree.world_bounds().center();
        assert!((center - DVec3::new(2.0, 0.4, 3.0)).length() < 1e-12);
    }

    #[test]
    fn test_ids_follow_registration_order() {
        let mut reg = PrefabRegistry::new();
        let a = reg.register("earth", &tree_node()).unwrap();
        let b = reg.register("tree", &tree_node()).unwrap();
        assert_eq!(a, VariantId(0));
        assert_eq!(b, VariantId(1));
        assert_eq!(reg.lookup_by_name("tree"), Some(b));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut reg = PrefabRegistry::new();
        reg.register("earth", &tree_node()).unwrap();
        let result = reg.register("earth", &tree_node());
        assert_eq!(result, Err(PrefabError::DuplicateName("earth".into())));
    }

    #[test]
    fn test_empty_hierarchy_rejected() {
        let mut reg = PrefabRegistry::new();
        let result = reg.register("nothing", &NodeDescriptor::group("Scene", vec![]));
        assert_eq!(result, Err(PrefabError::NoGeometry("nothing".into())));
        assert!(reg.is_empty());
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        let bad = NodeDescriptor::mesh(
            "tile",
            Aabb {
                min: DVec3::ZERO,
                max: DVec3::new(f64::NAN, 1.0, 1.0),
            },
            PartTransform::IDENTITY,
        );
        let mut reg = PrefabRegistry::new();
        assert!(matches!(
            reg.register("bad", &bad),
            Err(PrefabError::NonFiniteGeometry { .. })
        ));
    }

    #[test]
    fn test_custom_marker() {
        let mut reg = PrefabRegistry::with_base_marker("ground").unwrap();
        let id = reg.register("tree", &tree_node()).unwrap();
        assert_eq!(reg.get(id).unwrap().base_parts().count(), 0);
    }

    #[test]
    fn test_empty_marker_rejected() {
        assert!(matches!(
            PrefabRegistry::with_base_marker(""),
            Err(PrefabError::EmptyBaseMarker)
        ));
    }
}
