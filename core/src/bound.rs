use learned_index_model::Estimator;
use serde::{Deserialize, Serialize};

/// Scales a CDF value back to a zero-based position in a table of
/// `len` keys: `round(cdf * len - 1)`, rounding half away from zero.
///
/// The result is not clamped, so it can be negative or past the end.
#[inline]
pub fn scale(cdf: f64, len: usize) -> i64 {
    (cdf * len as f64 - 1.0).round() as i64
}

#[inline]
pub fn residual(guess: i64, truth: i64) -> i64 {
    truth - guess
}

/// The correction window around a model's guess.
///
/// Over the training keys, `true position - guess` always lies within
/// `[min, max]`. `min <= 0 <= max`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBounds {
    pub min: i64,
    pub max: i64,
}

impl ErrorBounds {
    /// Tightest window covering every training residual of `model` on the
    /// CDF pairs `(x, y)` of a dataset of `len` keys.
    pub fn calibrate<E: Estimator>(model: &E, x: &[f64], y: &[f64], len: usize) -> Self {
        x.iter()
            .zip(y)
            .map(|(&key, &cdf)| residual(scale(model.predict(key), len), scale(cdf, len)))
            .fold(Self::default(), |bounds, r| Self {
                min: bounds.min.min(r),
                max: bounds.max.max(r),
            })
    }

    /// Width of the window, in table slots.
    pub fn width(&self) -> u64 {
        self.max.abs_diff(self.min) + 1
    }
}
