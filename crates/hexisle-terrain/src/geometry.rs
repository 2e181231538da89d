//! Cell footprint measured from a reference prefab's base part.

use glam::DVec3;

use crate::error::ConfigurationError;
use crate::prefab::Prefab;

/// Horizontal size of one grid cell.
///
/// Invariant: `width` and `depth` are finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellFootprint {
    width: f64,
    depth: f64,
}

impl CellFootprint {
    /// Create a footprint, rejecting non-positive or non-finite dimensions.
    pub fn new(width: f64, depth: f64) -> Result<Self, ConfigurationError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(depth) {
            return Err(ConfigurationError::InvalidCellDimensions { width, depth });
        }
        Ok(Self { width, depth })
    }

    /// Extent along world X.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Extent along world Z.
    pub fn depth(&self) -> f64 {
        self.depth
    }
}

/// Measure the footprint of `prefab` from the world-space bounding box of its
/// base part, plus `padding` on each axis.
///
/// Decorative parts never contribute, so a tall tree does not widen the grid.
pub fn measure_footprint(
    prefab: &Prefab,
    padding: DVec3,
) -> Result<CellFootprint, ConfigurationError> {
    let base = prefab
        .base_part()
        .ok_or_else(|| ConfigurationError::MissingBasePart {
            prefab: prefab.name().to_string(),
        })?;
    let size = base.world_bounds().size() + padding;
    CellFootprint::new(size.x, size.z)
}
