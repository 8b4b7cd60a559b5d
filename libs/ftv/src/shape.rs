//! Request shape and block types shared by the synthesizer, codec and cache.

use std::hash::{Hash, Hasher};

use crate::errors::ShapeError;

/// Bytes taken by the two `u32` point-count fields that open each block.
pub const BLOCK_HEADER_LEN: usize = 8;

/// The `(num_series, num_points, percent_missing)` tuple identifying a payload.
///
/// Equality and hashing use the exact bit pattern of `percent_missing`, so
/// two shapes share a cache entry only when their tuples are identical.
#[derive(Debug, Clone, Copy)]
pub struct RequestShape {
    pub num_series: u32,
    pub num_points: u32,
    pub percent_missing: f64,
}

impl RequestShape {
    pub fn new(num_series: u32, num_points: u32, percent_missing: f64) -> Self {
        Self {
            num_series,
            num_points,
            percent_missing,
        }
    }

    /// Total number of samples the shape synthesizes.
    pub fn total_samples(&self) -> u64 {
        self.num_series as u64 * self.num_points as u64
    }

    /// Exact byte length of the encoded payload.
    pub fn encoded_len(&self) -> usize {
        self.num_series as usize * block_len(self.num_points as usize)
    }

    /// Boundary check run before the shape reaches the cache.
    pub fn validate(&self, limits: &ShapeLimits) -> Result<(), ShapeError> {
        if !self.percent_missing.is_finite() {
            return Err(ShapeError::PercentMissingNotFinite);
        }
        if !(0.0..=100.0).contains(&self.percent_missing) {
            return Err(ShapeError::PercentMissingOutOfRange(self.percent_missing));
        }
        let requested = self.total_samples();
        if requested > limits.max_samples {
            return Err(ShapeError::TooManySamples {
                requested,
                limit: limits.max_samples,
            });
        }
        Ok(())
    }
}

impl PartialEq for RequestShape {
    fn eq(&self, other: &Self) -> bool {
        self.num_series == other.num_series
            && self.num_points == other.num_points
            && self.percent_missing.to_bits() == other.percent_missing.to_bits()
    }
}

impl Eq for RequestShape {}

impl Hash for RequestShape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.num_series.hash(state);
        self.num_points.hash(state);
        self.percent_missing.to_bits().hash(state);
    }
}

/// Upper bounds enforced by [`RequestShape::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeLimits {
    /// Maximum `num_series × num_points` per request.
    pub max_samples: u64,
}

impl Default for ShapeLimits {
    fn default() -> Self {
        Self {
            max_samples: 1_000_000,
        }
    }
}

/// Encoded length of one block holding `num_points` samples.
pub fn block_len(num_points: usize) -> usize {
    BLOCK_HEADER_LEN + 16 * num_points
}

/// Synthesizer output: one shared timestamp sequence plus one value
/// sequence per series.
#[derive(Debug, Clone, PartialEq)]
pub struct Synthesized {
    pub timestamps: Vec<f64>,
    pub series: Vec<Vec<f64>>,
}

impl Synthesized {
    pub fn num_points(&self) -> usize {
        self.timestamps.len()
    }
}

/// One decoded series block.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBlock {
    pub point_count: u32,
    pub point_count_repeat: u32,
    pub timestamps: Vec<f64>,
    pub values: Vec<f64>,
}

impl SeriesBlock {
    /// Number of samples carrying the NaN sentinel.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }
}
