//! A learned index over one numeric column.
//!
//! [`LearnedIndex::build`] sorts the column, fits a model of its empirical
//! CDF and records how far the model's guesses stray from the truth. A
//! lookup then predicts a position and searches only the window those
//! error bounds allow.

pub mod bound;
pub mod config;
pub mod error;
pub mod index;
pub mod search;
pub mod storage;

pub use bound::{residual, scale, ErrorBounds};
pub use config::{EstimatorKind, IndexConfig, DEFAULT_SEGMENTS};
pub use error::{Error, Result};
pub use index::{LearnedIndex, Window};
pub use search::{binary_search_lookup, full_scan_lookup, interpolation_search, search_table};
pub use storage::{IndexMeta, Record, Store, StoreSlice};

pub use learned_index_model::{cdf, Estimator, LinearModel, Model, PiecewiseLinearModel};
pub use sorted_table::{SortedTable, Table, TableEntry, TableError};
