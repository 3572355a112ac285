use std::io;

use sorted_table::TableError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// No row holds the key. Expected in normal operation.
    #[error("the following key <{key}> is not found in the index")]
    NotFound { key: f64 },

    /// A search that requires sorted keys was handed an unsorted table.
    #[error("table keys are not sorted")]
    NotSorted,

    #[error("invalid table: {0}")]
    Table(#[from] TableError),

    #[error("the end {end} cannot be lower than the start {start}")]
    InvalidRange { start: u64, end: u64 },

    #[error("index metadata version {found} does not match {expected}")]
    Version { found: String, expected: String },

    #[error("store header counts {header} records, the file holds {stored}")]
    Truncated { header: u64, stored: u64 },

    #[error("index metadata describes {meta} records, the table holds {store}")]
    MetaMismatch { meta: u64, store: u64 },

    #[error("index metadata: {0}")]
    Meta(#[from] bincode::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Programming errors, as opposed to conditions a caller should handle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::NotSorted)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
