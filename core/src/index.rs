use learned_index_model::{cdf, Estimator, LinearModel, Model, PiecewiseLinearModel};
use slice_search::{BinarySearch, Search};
use sorted_table::SortedTable;

use crate::bound::{scale, ErrorBounds};
use crate::config::{EstimatorKind, IndexConfig};
use crate::{Error, Result};

/// Where a key is predicted to be, and the slots that have to be searched
/// to find it. Always `lower <= guess <= upper < len`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub guess: usize,
    pub lower: usize,
    pub upper: usize,
}

/// An index that locates keys by predicting their rank with a model of the
/// key distribution, then correcting the prediction with a bounded search.
///
/// The index is immutable: new data means building a new index.
#[derive(Clone, Debug)]
pub struct LearnedIndex {
    model: Model,
    table: SortedTable,
    bounds: ErrorBounds,
}

impl LearnedIndex {
    /// Fits a linear model over `dataset`, where the position of every key in
    /// `dataset` is the row offset reported by [`LearnedIndex::lookup`].
    pub fn build(dataset: &[f64]) -> Self {
        Self::build_with(dataset, &IndexConfig::default())
    }

    pub fn build_with(dataset: &[f64], config: &IndexConfig) -> Self {
        let table = SortedTable::build(dataset);
        let (x, y) = cdf(table.keys());

        let model = match config.estimator {
            EstimatorKind::Linear => Model::from(LinearModel::fit(&x, &y)),
            EstimatorKind::PiecewiseLinear => {
                Model::from(PiecewiseLinearModel::fit(&x, &y, config.segments))
            }
        };
        let bounds = ErrorBounds::calibrate(&model, &x, &y, table.len());

        log::debug!(
            "built learned index over {} keys: model {:?}, error bounds [{}, {}]",
            table.len(),
            model,
            bounds.min,
            bounds.max
        );

        Self {
            model,
            table,
            bounds,
        }
    }

    /// Reassembles an index from previously computed parts.
    ///
    /// The bounds are trusted as given; they are only guaranteed to be
    /// sufficient if they were calibrated for this model on this table.
    pub fn from_parts(model: impl Into<Model>, table: SortedTable, bounds: ErrorBounds) -> Self {
        Self {
            model: model.into(),
            table,
            bounds,
        }
    }

    /// Predicted position of `key` and the window around it.
    ///
    /// `lower` and `upper` are derived from the unclamped guess, then each of
    /// the three is clamped into the table independently. `None` for an
    /// empty index and for a `NaN` key, which no table can hold.
    pub fn guess_index(&self, key: f64) -> Option<Window> {
        if self.is_empty() || key.is_nan() {
            return None;
        }

        let last = (self.len() - 1) as i64;
        let guess = scale(self.model.predict(key), self.len());
        let lower = guess.saturating_add(self.bounds.min);
        let upper = guess.saturating_add(self.bounds.max);

        let clamp = |position: i64| num::clamp(position, 0, last) as usize;
        Some(Window {
            guess: clamp(guess),
            lower: clamp(lower),
            upper: clamp(upper),
        })
    }

    /// Row offsets of every occurrence of `key`.
    ///
    /// Duplicates come back in table order. Keys that were not in the
    /// training dataset are reported as [`Error::NotFound`].
    pub fn lookup(&self, key: f64) -> Result<Vec<usize>> {
        let Some(Window {
            guess,
            lower,
            upper,
        }) = self.guess_index(key)
        else {
            return Err(Error::NotFound { key });
        };

        let keys = self.table.keys();
        let mut start = if key > keys[guess] {
            BinarySearch::leftmost_in(keys, guess + 1..upper + 1, &key)
        } else {
            BinarySearch::leftmost_in(keys, lower..guess + 1, &key)
        };

        // Calibration pins the last key of a run of duplicates inside the
        // window, but a long run can begin before it.
        if start == lower {
            while start > 0 && keys[start - 1] == key {
                start -= 1;
            }
        }

        log::trace!("lookup {key}: guess {guess}, window [{lower}, {upper}], start {start}");

        let offsets: Vec<usize> = (start..=upper)
            .take_while(|&i| keys[i] == key)
            .map(|i| self.table.offsets()[i])
            .collect();

        if offsets.is_empty() {
            return Err(Error::NotFound { key });
        }

        Ok(offsets)
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn table(&self) -> &SortedTable {
        &self.table
    }

    pub fn bounds(&self) -> ErrorBounds {
        self.bounds
    }

    /// Number of keys in the training dataset.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::full_scan_lookup;

    const KEYS: [f64; 7] = [5.0, 3.0, 3.0, 3.14, 10.0, 2.5, 2.98];

    fn fixed_index(min: i64, max: i64) -> LearnedIndex {
        LearnedIndex::from_parts(
            LinearModel::new(0.23119036646681634, 0.08523040437506509),
            SortedTable::build(&KEYS),
            ErrorBounds { min, max },
        )
    }

    #[test]
    fn build() {
        let idx = LearnedIndex::build(&KEYS);

        assert_eq!(idx.len(), 7);
        let Model::Linear(m) = idx.model() else {
            panic!("expected a linear model, got {:?}", idx.model());
        };
        assert!((m.intercept - 0.23119036646681634).abs() < 1e-12);
        assert!((m.slope - 0.08523040437506509).abs() < 1e-12);
        assert_eq!(idx.bounds(), ErrorBounds { min: -2, max: 2 });
        assert_eq!(idx.table().keys(), &[2.5, 2.98, 3.0, 3.0, 3.14, 5.0, 10.0]);
        assert_eq!(idx.table().offsets(), &[5, 6, 1, 2, 3, 0, 4]);
    }

    #[test]
    fn guess_index() {
        let idx = fixed_index(-3, 2);

        let w = idx.guess_index(5.0).unwrap();
        assert_eq!((w.lower, w.guess, w.upper), (1, 4, 6));

        // guess, lower and upper all fall below zero
        let w = idx.guess_index(-10.0).unwrap();
        assert_eq!((w.lower, w.guess, w.upper), (0, 0, 0));

        // guess past the end keeps the window width from the unclamped guess
        let w = idx.guess_index(10.0).unwrap();
        assert_eq!((w.lower, w.guess, w.upper), (4, 6, 6));

        let w = idx.guess_index(2.95).unwrap();
        assert_eq!((w.lower, w.guess, w.upper), (0, 2, 4));
    }

    #[test]
    fn guess_index_on_empty_index() {
        let idx = LearnedIndex::build(&[]);
        assert_eq!(idx.guess_index(1.0), None);
        assert!(idx.lookup(1.0).unwrap_err().is_not_found());
    }

    #[test]
    fn nan_key_is_not_found() {
        let dataset = [1.0, 2.0, 3.0, 4.0, 5.0];

        for config in [IndexConfig::default(), IndexConfig::piecewise(2)] {
            let idx = LearnedIndex::build_with(&dataset, &config);

            assert_eq!(idx.guess_index(f64::NAN), None);
            assert!(idx.lookup(f64::NAN).unwrap_err().is_not_found());
            // infinities still get a window
            assert!(idx.guess_index(f64::INFINITY).is_some());
            assert!(idx.lookup(f64::NEG_INFINITY).unwrap_err().is_not_found());
        }
    }

    #[test]
    fn lookup() {
        let idx = fixed_index(-2, 2);

        assert_eq!(idx.lookup(2.5).unwrap(), vec![5]);
        assert_eq!(idx.lookup(2.98).unwrap(), vec![6]);
        assert_eq!(idx.lookup(3.0).unwrap(), vec![1, 2]);
        assert_eq!(idx.lookup(3.14).unwrap(), vec![3]);
        assert_eq!(idx.lookup(5.0).unwrap(), vec![0]);
        assert_eq!(idx.lookup(10.0).unwrap(), vec![4]);

        let err = idx.lookup(199.0).unwrap_err();
        assert!(err.is_not_found());
        assert!(!err.is_fatal());
        assert!(idx.lookup(3.1).unwrap_err().is_not_found());
    }

    #[test]
    fn built_index_finds_every_key() {
        let idx = LearnedIndex::build(&KEYS);

        for (offset, &key) in KEYS.iter().enumerate() {
            assert!(idx.lookup(key).unwrap().contains(&offset));
        }
        assert!(idx.lookup(199.0).is_err());
    }

    #[test]
    fn single_key() {
        let idx = LearnedIndex::build(&[42.0]);

        assert_eq!(idx.bounds(), ErrorBounds { min: 0, max: 0 });
        assert_eq!(idx.lookup(42.0).unwrap(), vec![0]);
        assert!(idx.lookup(41.0).is_err());
    }

    #[test]
    fn all_keys_equal() {
        let idx = LearnedIndex::build(&[3.0, 3.0, 3.0, 3.0]);

        let Model::Linear(m) = idx.model() else {
            panic!("expected a linear model");
        };
        assert_eq!(m.slope, 0.0);
        assert_eq!(m.intercept, 1.0);
        assert_eq!(idx.lookup(3.0).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn long_duplicate_runs() {
        // runs much longer than the error window
        let mut dataset = vec![1.0; 40];
        dataset.extend([2.0; 3]);
        dataset.extend([7.0; 60]);
        dataset.extend((0..20).map(|i| 8.0 + i as f64));

        for config in [IndexConfig::default(), IndexConfig::piecewise(4)] {
            let idx = LearnedIndex::build_with(&dataset, &config);

            for key in [1.0, 2.0, 7.0, 8.0, 27.0] {
                let mut found = idx.lookup(key).unwrap();
                let mut expected = full_scan_lookup(key, idx.table()).unwrap();
                found.sort_unstable();
                expected.sort_unstable();
                assert_eq!(found, expected, "key {key} with {config:?}");
            }
            assert!(idx.lookup(5.0).is_err());
        }
    }

    #[test]
    fn piecewise_index() {
        let dataset: Vec<f64> = (0..1_000).map(|i| ((i * i) % 977) as f64 / 3.0).collect();
        let idx = LearnedIndex::build_with(&dataset, &IndexConfig::piecewise(16));

        assert!(matches!(idx.model(), Model::PiecewiseLinear(_)));
        for &key in &dataset {
            let found = idx.lookup(key).unwrap();
            assert_eq!(found.len(), full_scan_lookup(key, idx.table()).unwrap().len());
        }
    }

    #[test]
    fn training_keys_stay_within_bounds() {
        let dataset: Vec<f64> = (0..2_000).map(|i| (i as f64).sqrt().floor()).collect();
        let idx = LearnedIndex::build(&dataset);
        let (x, y) = cdf(idx.table().keys());
        let bounds = idx.bounds();

        for (&key, &c) in x.iter().zip(&y) {
            let guess = scale(idx.model().predict(key), idx.len());
            let truth = scale(c, idx.len());
            assert!(guess + bounds.min <= truth && truth <= guess + bounds.max);
        }
    }

    #[test]
    fn index_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LearnedIndex>();
    }
}
