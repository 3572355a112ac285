use serde::{Deserialize, Serialize};

/// Piecewise segment count used when none is configured.
pub const DEFAULT_SEGMENTS: usize = 3;

/// Which model an index is fitted with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorKind {
    /// Least-squares line over the whole CDF.
    #[default]
    Linear,
    /// Interpolation through `segments + 1` CDF knots.
    PiecewiseLinear,
}

/// Build-time settings. Constructed once by the caller and passed into
/// [`LearnedIndex::build_with`](crate::LearnedIndex::build_with).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub estimator: EstimatorKind,
    pub segments: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            estimator: EstimatorKind::Linear,
            segments: DEFAULT_SEGMENTS,
        }
    }
}

impl IndexConfig {
    pub fn piecewise(segments: usize) -> Self {
        Self {
            estimator: EstimatorKind::PiecewiseLinear,
            segments,
        }
    }
}
