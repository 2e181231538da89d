//! Error types for island generation.

/// Invalid parameters or degenerate numeric input detected before the
/// destination container is touched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// The noise output range is empty or inverted.
    #[error("invalid noise output range: min {min} must be less than max {max}")]
    InvalidNoiseRange { min: f64, max: f64 },

    /// One of the noise output range bounds is NaN or infinite.
    #[error("noise output range bounds must be finite (got {min}..{max})")]
    NonFiniteNoiseRange { min: f64, max: f64 },

    /// The reference prefab has no part tagged as base, so no footprint can be measured.
    #[error("prefab `{prefab}` has no part tagged as base")]
    MissingBasePart { prefab: String },

    /// The measured cell footprint is zero, negative, or not finite.
    #[error("cell dimensions must be positive and finite (width {width}, depth {depth})")]
    InvalidCellDimensions { width: f64, depth: f64 },

    /// The noise field produced NaN or infinity for a cell.
    #[error("noise sample at ({x}, {z}) is not finite: {value}")]
    NonFiniteNoise { x: f64, z: f64, value: f64 },

    /// Footprint times grid dimensions overflows to a non-finite extent.
    #[error("grid extent is not finite ({width} x {height})")]
    InvalidExtent { width: f64, height: f64 },

    /// A noise sample coordinate is non-finite or too large for the noise field.
    #[error("noise sample coordinate ({x}, {z}) is outside the samplable range")]
    SampleOutOfRange { x: f64, z: f64 },

    /// Thresholds reach outside the noise output range, so some bands can never be hit.
    #[error(
        "thresholds {min}..{max} must lie within the noise output range {range_min}..{range_max}"
    )]
    ThresholdsOutsideNoiseRange {
        min: f64,
        max: f64,
        range_min: f64,
        range_max: f64,
    },

    /// The grid has no rows or no columns.
    #[error("grid dimensions must be non-zero (got {rows}x{cols})")]
    EmptyGrid { rows: u32, cols: u32 },

    /// Classification thresholds are not finite or not ordered.
    #[error("invalid thresholds: min {min} must be finite and below max {max}")]
    InvalidThresholds { min: f64, max: f64 },

    /// The noise frequency divisor must be positive and finite.
    #[error("noise frequency divisor must be positive and finite (got {0})")]
    InvalidFrequencyDivisor(f64),

    /// The decorative scale range is empty, inverted, or not finite.
    #[error("invalid decorative scale range {min}..{max}")]
    InvalidScaleRange { min: f64, max: f64 },
}

/// Errors returned by [`TerrainGenerator`](crate::TerrainGenerator).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// A parameter, prefab, or numeric input was rejected.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// No tile variants were supplied.
    #[error("at least one tile variant is required")]
    EmptyVariantList,
}
