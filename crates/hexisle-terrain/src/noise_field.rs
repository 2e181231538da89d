//! Seeded 2D Perlin noise with a configurable output range.
//!
//! The raw gradient noise lives in `[-1, 1]`. Callers remap it into whatever
//! band their thresholds are expressed in (the island generator uses
//! `[0, 1.25]`), and every sample is guaranteed to land inside that band.

use noise::{NoiseFn, Perlin};

use crate::error::ConfigurationError;

/// Largest coordinate magnitude [`NoiseField::sample`] will evaluate.
///
/// Beyond this the lattice index no longer fits the Perlin implementation's
/// integer math, and f64 has no fractional precision left anyway.
pub const MAX_SAMPLE_COORDINATE: f64 = 4_503_599_627_370_496.0; // 2^52

/// Returns `true` if `v` is finite and within [`MAX_SAMPLE_COORDINATE`].
pub(crate) fn is_samplable(v: f64) -> bool {
    v.abs() < MAX_SAMPLE_COORDINATE
}

/// A closed `[min, max]` interval with `min < max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutputRange {
    min: f64,
    max: f64,
}

impl OutputRange {
    /// The range produced by the underlying Perlin implementation.
    pub const RAW: Self = Self {
        min: -1.0,
        max: 1.0,
    };

    /// Create a range, rejecting empty, inverted, or non-finite bounds.
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigurationError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigurationError::NonFiniteNoiseRange { min, max });
        }
        if min >= max {
            return Err(ConfigurationError::InvalidNoiseRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// `max - min`, always positive.
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Returns `true` if `value` lies inside the closed interval.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Deterministic 2D coherent noise sampler.
///
/// The permutation table is built once from the seed; after that the field
/// is a pure function of `(x, y)` and the configured output range.
#[derive(Clone, Debug)]
pub struct NoiseField {
    perlin: Perlin,
    seed: u32,
    range: OutputRange,
}

impl NoiseField {
    /// Create a field with the raw `[-1, 1]` output range.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            seed,
            range: OutputRange::RAW,
        }
    }

    /// Create a field whose samples are remapped into `[min, max]`.
    pub fn with_output_range(seed: u32, min: f64, max: f64) -> Result<Self, ConfigurationError> {
        let mut field = Self::new(seed);
        field.set_output_range(min, max)?;
        Ok(field)
    }

    /// The seed this field was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The range subsequent samples are remapped into.
    pub fn output_range(&self) -> OutputRange {
        self.range
    }

    /// Restore the implementation's raw `[-1, 1]` output range.
    pub fn reset_output_range(&mut self) {
        self.range = OutputRange::RAW;
    }

    /// Linearly remap subsequent samples into `[min, max]`.
    ///
    /// On error the previous range is left untouched.
    pub fn set_output_range(&mut self, min: f64, max: f64) -> Result<(), ConfigurationError> {
        self.range = OutputRange::new(min, max)?;
        Ok(())
    }

    /// Sample the field at an arbitrary (possibly fractional) coordinate.
    ///
    /// Perlin gradients can overshoot their nominal bounds by a hair, so the
    /// remapped value is clamped into the output range. Coordinates that are
    /// non-finite or beyond [`MAX_SAMPLE_COORDINATE`] yield NaN; callers that
    /// must not place tiles from such values check with [`f64::is_finite`].
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        if !is_samplable(x) || !is_samplable(y) {
            return f64::NAN;
        }
        let raw = self.perlin.get([x, y]);
        let t = (raw - OutputRange::RAW.min) / OutputRange::RAW.width();
        let value = self.range.min + t * self.range.width();
        value.clamp(self.range.min, self.range.max)
    }
}

impl NoiseFn<f64, 2> for NoiseField {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}
