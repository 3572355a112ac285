#![no_std]

//! A sorted view of a numeric column.
//!
//! [`SortedTable`] keeps the column's keys in ascending order together with
//! the row offset each key had in the original dataset. Keys and offsets are
//! stored as two parallel arrays and are only ever permuted together, inside
//! the constructors of this crate.

extern crate alloc;

mod entry;

#[cfg(feature = "serde")]
mod serde;

use alloc::vec::Vec;
use core::fmt;

pub use entry::TableEntry;

/// Read access to a sorted collection of `(key, row offset)` pairs.
///
/// Implemented by the in-memory [`SortedTable`] and by plain key slices, for
/// which the offset of a key is simply its position.
pub trait Table {
    /// Returns the key and row offset at position `i`.
    fn get(&self, i: usize) -> (f64, usize);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether keys are non-decreasing. Incomparable neighbours (a `NaN`
    /// key) count as unsorted.
    fn is_sorted(&self) -> bool {
        (1..self.len()).all(|i| self.get(i - 1).0 <= self.get(i).0)
    }
}

impl Table for [f64] {
    fn get(&self, i: usize) -> (f64, usize) {
        (self[i], i)
    }

    fn len(&self) -> usize {
        <[f64]>::len(self)
    }
}

/// Why a pair of arrays could not be accepted as a [`SortedTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// `keys` and `offsets` differ in length.
    LengthMismatch { keys: usize, offsets: usize },
    /// `keys[index] > keys[index + 1]`, or the pair is not comparable.
    NotSorted { index: usize },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { keys, offsets } => {
                write!(f, "table has {keys} keys but {offsets} offsets")
            }
            Self::NotSorted { index } => {
                write!(f, "table keys are not sorted at position {index}")
            }
        }
    }
}

impl core::error::Error for TableError {}

/// Keys sorted ascending, each paired with its original row offset.
///
/// `offsets[i]` always identifies the source row of `keys[i]`. The table is
/// immutable once built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SortedTable {
    keys: Vec<f64>,
    offsets: Vec<usize>,
}

impl SortedTable {
    /// Sorts `dataset` ascending, remembering where every key came from.
    ///
    /// Equal keys keep their input order, so duplicate offsets ascend.
    ///
    /// ```
    /// use sorted_table::SortedTable;
    ///
    /// let table = SortedTable::build(&[5.0, 3.0, 3.0, 3.14, 10.0, 2.5, 2.98]);
    /// assert_eq!(table.keys(), &[2.5, 2.98, 3.0, 3.0, 3.14, 5.0, 10.0]);
    /// assert_eq!(table.offsets(), &[5, 6, 1, 2, 3, 0, 4]);
    /// ```
    pub fn build(dataset: &[f64]) -> Self {
        let mut entries: Vec<(f64, usize)> = dataset
            .iter()
            .copied()
            .enumerate()
            .map(|(offset, key)| (key, offset))
            .collect();

        entries.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (keys, offsets) = entries.into_iter().unzip();
        Self { keys, offsets }
    }

    /// Accepts arrays that are already co-sorted, e.g. read back from disk.
    pub fn from_sorted_parts(keys: Vec<f64>, offsets: Vec<usize>) -> Result<Self, TableError> {
        if keys.len() != offsets.len() {
            return Err(TableError::LengthMismatch {
                keys: keys.len(),
                offsets: offsets.len(),
            });
        }

        if let Some(index) = keys.windows(2).position(|w| !(w[0] <= w[1])) {
            return Err(TableError::NotSorted { index });
        }

        Ok(Self { keys, offsets })
    }

    #[inline]
    pub fn get(&self, i: usize) -> (f64, usize) {
        (self.keys[i], self.offsets[i])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn keys(&self) -> &[f64] {
        &self.keys
    }

    #[inline]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Cheap re-check of the ordering invariant.
    pub fn is_sorted(&self) -> bool {
        slice_search::is_sorted(&self.keys)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = TableEntry> + '_ {
        self.keys
            .iter()
            .zip(self.offsets.iter())
            .map(|(&key, &offset)| TableEntry::new(key, offset))
    }
}

impl Table for SortedTable {
    fn get(&self, i: usize) -> (f64, usize) {
        SortedTable::get(self, i)
    }

    fn len(&self) -> usize {
        SortedTable::len(self)
    }

    fn is_sorted(&self) -> bool {
        SortedTable::is_sorted(self)
    }
}

impl FromIterator<TableEntry> for Result<SortedTable, TableError> {
    fn from_iter<I: IntoIterator<Item = TableEntry>>(iter: I) -> Self {
        let (keys, offsets) = iter
            .into_iter()
            .map(|entry| (entry.key, entry.offset))
            .unzip();

        SortedTable::from_sorted_parts(keys, offsets)
    }
}
