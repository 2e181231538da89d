//! Per-cell island classification: boundary cull, noise cull, band selection.

use glam::DVec2;
use noise::NoiseFn;

use crate::error::{ConfigurationError, TerrainError};
use crate::grid::GridExtent;
use crate::noise_field::is_samplable;
use crate::prefab::VariantId;

/// Noise values below this are water (no tile).
pub const DEFAULT_MIN_THRESHOLD: f64 = 0.4;

/// Upper end of the banded noise range; matches the noise field's output max.
pub const DEFAULT_MAX_THRESHOLD: f64 = 1.25;

/// Cell centers are divided by this before sampling noise, decoupling noise
/// feature size from cell size.
pub const DEFAULT_FREQUENCY_DIVISOR: f64 = 1.8;

/// Thresholds and sampling frequency for [`TileClassifier`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifierParams {
    pub min_threshold: f64,
    pub max_threshold: f64,
    pub frequency_divisor: f64,
}

impl ClassifierParams {
    /// Reject non-finite, unordered, or non-positive values.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let (min, max) = (self.min_threshold, self.max_threshold);
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ConfigurationError::InvalidThresholds { min, max });
        }
        let divisor = self.frequency_divisor;
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(ConfigurationError::InvalidFrequencyDivisor(divisor));
        }
        Ok(())
    }
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            min_threshold: DEFAULT_MIN_THRESHOLD,
            max_threshold: DEFAULT_MAX_THRESHOLD,
            frequency_divisor: DEFAULT_FREQUENCY_DIVISOR,
        }
    }
}

/// Outcome for one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellDecision {
    /// Center lies beyond the circular island boundary. Noise was not sampled.
    OutsideBoundary,
    /// Sampled noise fell below the minimum threshold.
    BelowThreshold { noise: f64 },
    /// The cell gets a tile of `variant`.
    Place { variant: VariantId, noise: f64 },
}

/// Decides survival and variant for cell centers.
///
/// Each decision depends only on the center passed in, never on the order
/// cells are visited.
pub struct TileClassifier<'n, N> {
    noise: &'n N,
    params: ClassifierParams,
    boundary_radius: f64,
    variant_count: usize,
    band_width: f64,
}

impl<'n, N: NoiseFn<f64, 2>> TileClassifier<'n, N> {
    /// Create a classifier for a grid of the given extent and `variant_count` ordered variants.
    ///
    /// # Errors
    ///
    /// [`TerrainError::EmptyVariantList`] if `variant_count` is zero, or a
    /// configuration error for invalid thresholds.
    pub fn new(
        noise: &'n N,
        params: ClassifierParams,
        extent: GridExtent,
        variant_count: usize,
    ) -> Result<Self, TerrainError> {
        if variant_count == 0 {
            return Err(TerrainError::EmptyVariantList);
        }
        params.validate()?;
        let band_width = (params.max_threshold - params.min_threshold) / variant_count as f64;
        Ok(Self {
            noise,
            params,
            boundary_radius: extent.boundary_radius(),
            variant_count,
            band_width,
        })
    }

    /// Width of each variant's noise band.
    pub fn band_width(&self) -> f64 {
        self.band_width
    }

    /// Cells whose center is farther than this from the origin are culled.
    pub fn boundary_radius(&self) -> f64 {
        self.boundary_radius
    }

    /// Classify the cell centered at `center` (`x` = world X, `y` = world Z).
    ///
    /// A center exactly on the boundary radius is kept.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::SampleOutOfRange`] if the scaled center is too
    /// large to sample, [`ConfigurationError::NonFiniteNoise`] if the noise
    /// sample is NaN or infinite.
    pub fn classify(&self, center: DVec2) -> Result<CellDecision, ConfigurationError> {
        if center.length() > self.boundary_radius {
            return Ok(CellDecision::OutsideBoundary);
        }

        let divisor = self.params.frequency_divisor;
        let point = [center.x / divisor, center.y / divisor];
        if !is_samplable(point[0]) || !is_samplable(point[1]) {
            return Err(ConfigurationError::SampleOutOfRange {
                x: center.x,
                z: center.y,
            });
        }
        let noise = self.noise.get(point);
        if !noise.is_finite() {
            return Err(ConfigurationError::NonFiniteNoise {
                x: center.x,
                z: center.y,
                value: noise,
            });
        }

        if noise < self.params.min_threshold {
            return Ok(CellDecision::BelowThreshold { noise });
        }

        Ok(CellDecision::Place {
            variant: self.select_variant(noise),
            noise,
        })
    }

    /// Map a noise value at or above the minimum threshold to a variant.
    ///
    /// Picks the lowest band whose upper edge lies above `noise`. Values at or
    /// past the last edge (the top of the range, or rounding drift) land in
    /// the last variant.
    pub fn select_variant(&self, noise: f64) -> VariantId {
        let last = self.variant_count - 1;
        if last == 0 {
            return VariantId(0);
        }
        for i in 0..self.variant_count {
            let upper = self.params.min_threshold + (i + 1) as f64 * self.band_width;
            if noise < upper {
                return VariantId(i);
            }
        }
        tracing::trace!(noise, "noise past last band edge, using last variant");
        VariantId(last)
    }
}
