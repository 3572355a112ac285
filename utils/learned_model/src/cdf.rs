//! Empirical cumulative distribution of a key multiset.

/// Returns the keys in ascending order together with the empirical CDF at
/// each of them.
///
/// `y[i]` is the fraction of all keys that are `<= x[i]`. The CDF is a step
/// function of the multiset, so equal keys receive equal `y`: for
/// `[2.5, 3, 3, 5]` the two `3`s both map to `0.75`.
///
/// Input that is not already sorted is sorted first.
pub fn cdf(keys: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut x = keys.to_vec();
    if !x.windows(2).all(|w| w[0] <= w[1]) {
        x.sort_by(f64::total_cmp);
    }

    let n = x.len() as f64;
    let mut y = vec![0.0; x.len()];

    let mut start = 0;
    while start < x.len() {
        // one step of the CDF covers a whole run of equal keys
        let mut end = start + 1;
        while end < x.len() && x[end] == x[start] {
            end += 1;
        }

        let fraction = end as f64 / n;
        y[start..end].fill(fraction);
        start = end;
    }

    (x, y)
}
