use serde::{Deserialize, Serialize};

use crate::Estimator;

/// Linear interpolation through a handful of knots sampled from the CDF.
///
/// Outside the knot range the prediction is held at the nearest end knot,
/// which suits a CDF: nothing below the first key, everything below the
/// last.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PiecewiseLinearModel {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl PiecewiseLinearModel {
    /// Fits `segments` pieces to sorted CDF pairs.
    ///
    /// Duplicate `x` are dropped (keeping the first `y` of each run, which on
    /// an empirical CDF is the value of the whole run), then `segments + 1`
    /// evenly spaced knots are taken, always including the last point.
    pub fn fit(x: &[f64], y: &[f64], segments: usize) -> Self {
        debug_assert_eq!(x.len(), y.len());

        let (dx, dy) = drop_duplicates(x, y);
        match dx.len() {
            0 => return Self::constant(0.0),
            1 => return Self::constant(dy[0]),
            _ => {}
        }

        let (xs, ys) = knots(&dx, &dy, segments.max(1));
        Self { xs, ys }
    }

    fn constant(value: f64) -> Self {
        Self {
            xs: vec![0.0],
            ys: vec![value],
        }
    }

    /// Knot abscissae, strictly increasing.
    pub fn knots(&self) -> &[f64] {
        &self.xs
    }
}

impl Estimator for PiecewiseLinearModel {
    fn predict(&self, x: f64) -> f64 {
        // only reachable through a hand-written serialized model
        let Some(last) = self.xs.len().checked_sub(1) else {
            return 0.0;
        };

        if x.is_nan() {
            return x;
        }
        if last == 0 || x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[last] {
            return self.ys[last];
        }

        // first knot strictly greater than x, in 1..=last
        let hi = self.xs.partition_point(|&k| k <= x);
        let lo = hi - 1;

        let t = (x - self.xs[lo]) / (self.xs[hi] - self.xs[lo]);
        self.ys[lo] + t * (self.ys[hi] - self.ys[lo])
    }
}

fn drop_duplicates(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut dx: Vec<f64> = Vec::with_capacity(x.len());
    let mut dy = Vec::with_capacity(y.len());

    for (&xv, &yv) in x.iter().zip(y) {
        if dx.last() == Some(&xv) {
            continue;
        }
        dx.push(xv);
        dy.push(yv);
    }

    (dx, dy)
}

fn knots(x: &[f64], y: &[f64], segments: usize) -> (Vec<f64>, Vec<f64>) {
    let last = x.len() - 1;
    let segments = segments.min(last);

    let mut xs = Vec::with_capacity(segments + 1);
    let mut ys = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let at = i * last / segments;
        xs.push(x[at]);
        ys.push(y[at]);
    }

    (xs, ys)
}
