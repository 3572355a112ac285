//! Models for learned indexes.
//!
//! A learned index replaces tree traversal with a model of the data's
//! empirical CDF: given a key, the model predicts the fraction of keys that
//! are `<=` it, which scales to a position in the sorted array.

mod cdf;
mod model;
mod piecewise;

use serde::{Deserialize, Serialize};

pub use cdf::cdf;
pub use model::LinearModel;
pub use piecewise::PiecewiseLinearModel;

/// Anything that can approximate a CDF.
pub trait Estimator {
    /// Predicted fraction of keys `<= x`. Not clamped to `[0, 1]`.
    fn predict(&self, x: f64) -> f64;
}

/// The closed set of models an index can be built with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Model {
    Linear(LinearModel),
    PiecewiseLinear(PiecewiseLinearModel),
}

impl Estimator for Model {
    #[inline]
    fn predict(&self, x: f64) -> f64 {
        match self {
            Model::Linear(m) => m.predict(x),
            Model::PiecewiseLinear(m) => m.predict(x),
        }
    }
}

impl From<LinearModel> for Model {
    fn from(m: LinearModel) -> Self {
        Model::Linear(m)
    }
}

impl From<PiecewiseLinearModel> for Model {
    fn from(m: PiecewiseLinearModel) -> Self {
        Model::PiecewiseLinear(m)
    }
}
