//! Prefab parts and their local/world bounds.

use glam::{DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// Role of a prefab part, fixed at registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartRole {
    /// The tile body. Its bounding box defines the cell footprint and it is never scaled.
    Base,
    /// Props sitting on the tile (trees, rocks, grass). Scaled per placement.
    Decorative,
}

/// Axis-aligned bounding box in f64 space.
///
/// Invariant: `min <= max` on every axis. [`Aabb::new`] sorts components.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl Aabb {
    /// Create an AABB from two corners in any order.
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Size along each axis.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Center point.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns `true` if both corners are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// The eight corner points.
    pub fn corners(&self) -> [DVec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            DVec3::new(lo.x, lo.y, lo.z),
            DVec3::new(hi.x, lo.y, lo.z),
            DVec3::new(lo.x, hi.y, lo.z),
            DVec3::new(hi.x, hi.y, lo.z),
            DVec3::new(lo.x, lo.y, hi.z),
            DVec3::new(hi.x, lo.y, hi.z),
            DVec3::new(lo.x, hi.y, hi.z),
            DVec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// The axis-aligned box enclosing this box after an affine transform.
    pub fn transformed(&self, matrix: &DMat4) -> Aabb {
        let mut min = DVec3::splat(f64::INFINITY);
        let mut max = DVec3::splat(f64::NEG_INFINITY);
        for corner in self.corners() {
            let p = matrix.transform_point3(corner);
            min = min.min(p);
            max = max.max(p);
        }
        Aabb { min, max }
    }
}

/// Local translation/rotation/scale of a node relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartTransform {
    pub translation: DVec3,
    pub rotation: DQuat,
    pub scale: DVec3,
}

impl PartTransform {
    /// No translation, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
        scale: DVec3::ONE,
    };

    /// Identity rotation and scale, offset by `translation`.
    pub fn from_translation(translation: DVec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Compose into a matrix (scale, then rotate, then translate).
    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for PartTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A mesh-bearing node of a prefab, flattened out of the source hierarchy.
#[derive(Clone, Debug, PartialEq)]
pub struct PrefabPart {
    /// Node name from the source hierarchy.
    pub name: String,
    /// Role assigned at registration.
    pub role: PartRole,
    /// Mesh bounds in the node's local space.
    pub bounds: Aabb,
    /// Accumulated transform of every ancestor, relative to the prefab root.
    pub parent_transform: DMat4,
    /// The node's own transform. Decorative scale jitter replaces its `scale`.
    pub transform: PartTransform,
}

impl PrefabPart {
    /// Full transform from the part's local space to the prefab root.
    pub fn world_matrix(&self) -> DMat4 {
        self.parent_transform * self.transform.to_matrix()
    }

    /// Mesh bounds expressed in prefab-root space.
    pub fn world_bounds(&self) -> Aabb {
        self.bounds.transformed(&self.world_matrix())
    }
}

/// A registered tile prefab: an ordered list of classified parts.
#[derive(Clone, Debug, PartialEq)]
pub struct Prefab {
    name: String,
    parts: Vec<PrefabPart>,
}

impl Prefab {
    pub(crate) fn new(name: String, parts: Vec<PrefabPart>) -> Self {
        Self { name, parts }
    }

    /// Name the prefab was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All parts in hierarchy (depth-first) order.
    pub fn parts(&self) -> &[PrefabPart] {
        &self.parts
    }

    /// Parts tagged [`PartRole::Base`].
    pub fn base_parts(&self) -> impl Iterator<Item = &PrefabPart> {
        self.parts.iter().filter(|p| p.role == PartRole::Base)
    }

    /// Parts tagged [`PartRole::Decorative`].
    pub fn decorative_parts(&self) -> impl Iterator<Item = &PrefabPart> {
        self.parts.iter().filter(|p| p.role == PartRole::Decorative)
    }

    /// The base part used for sizing. When several exist, the last one in
    /// hierarchy order wins.
    pub fn base_part(&self) -> Option<&PrefabPart> {
        self.base_parts().last()
    }

    /// Clone this prefab with `scale` set uniformly on every decorative part.
    /// Base parts keep their authored scale.
    pub fn instantiate(&self, decorative_scale: f64) -> Prefab {
        let mut copy = self.clone();
        for part in copy
            .parts
            .iter_mut()
            .filter(|p| p.role == PartRole::Decorative)
        {
            part.transform.scale = DVec3::splat(decorative_scale);
        }
        copy
    }
}
