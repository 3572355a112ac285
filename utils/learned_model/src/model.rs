//! Linear regression over the empirical CDF.
//!
//! The fit is ordinary least squares computed in two passes: means first,
//! then a compensated variance and covariance (Chan et al.) so the rounding
//! error of the first pass does not leak into the slope.

use serde::{Deserialize, Serialize};

use crate::Estimator;

/// `predict(x) = intercept + slope * x`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub slope: f64,
}

impl LinearModel {
    pub fn new(intercept: f64, slope: f64) -> Self {
        Self { intercept, slope }
    }

    /// A model predicting `value` everywhere.
    pub fn constant(value: f64) -> Self {
        Self::new(value, 0.0)
    }

    /// Least-squares fit of `y` on `x`.
    ///
    /// When the slope is undefined (no variance in `x`, a single point, no
    /// points at all) the model falls back to the constant `mean(y)`, so that
    /// predictions never become `NaN`.
    pub fn fit(x: &[f64], y: &[f64]) -> Self {
        debug_assert_eq!(x.len(), y.len());

        let x_mean = mean(x);
        let y_mean = mean(y);
        let n = x.len() as f64;

        let mut ss = 0.0;
        let mut compensation = 0.0;
        for &v in x {
            let d = v - x_mean;
            ss += d * d;
            compensation += d;
        }
        let variance = (ss - compensation * compensation / n) / (n - 1.0);

        let mut ss = 0.0;
        let mut x_compensation = 0.0;
        let mut y_compensation = 0.0;
        for (&xv, &yv) in x.iter().zip(y) {
            let xd = xv - x_mean;
            let yd = yv - y_mean;
            ss += xd * yd;
            x_compensation += xd;
            y_compensation += yd;
        }
        let covariance = (ss - x_compensation * y_compensation / n) / (n - 1.0);

        let slope = covariance / variance;
        let intercept = y_mean - slope * x_mean;

        if !slope.is_finite() || !intercept.is_finite() {
            return Self::constant(y_mean);
        }

        Self { intercept, slope }
    }
}

impl Estimator for LinearModel {
    #[inline]
    fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Arithmetic mean; `0` for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    values.iter().sum::<f64>() / values.len() as f64
}
