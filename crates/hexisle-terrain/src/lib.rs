//! Procedural hex island layout: noise-driven tile classification on an offset-hex grid.
//!
//! A [`TerrainGenerator`] measures the cell footprint from the first tile
//! variant, lays out an offset-hex grid (32x32 by default), crops it to a circular island,
//! culls low-noise cells as water and maps the remaining noise bands onto the
//! ordered variant list. Placed tiles receive random decorative scale jitter.

mod classifier;
mod container;
mod error;
mod geometry;
mod grid;
mod noise_field;

pub mod debug_viz;
pub mod generator;
pub mod prefab;

pub use classifier::{
    CellDecision, ClassifierParams, DEFAULT_FREQUENCY_DIVISOR, DEFAULT_MAX_THRESHOLD,
    DEFAULT_MIN_THRESHOLD, TileClassifier,
};
pub use container::{IslandMap, PlacedTile, TileContainer};
pub use error::{ConfigurationError, TerrainError};
pub use generator::{
    DEFAULT_DECORATIVE_SCALE, DEFAULT_NOISE_RANGE, GenerationStats, Generated, GeneratorParams,
    IslandPlan, PlannedCell, TerrainGenerator,
};
pub use geometry::{CellFootprint, measure_footprint};
pub use grid::{
    DEFAULT_GRID_SIZE, GridCoord, GridDimensions, GridExtent, GridLayout, ROW_PITCH,
};
pub use noise_field::{MAX_SAMPLE_COORDINATE, NoiseField, OutputRange};
pub use prefab::{
    Aabb, ManifestError, NodeDescriptor, PartRole, PartTransform, Prefab, PrefabError,
    PrefabManifest, PrefabPart, PrefabRegistry, VariantId,
};
