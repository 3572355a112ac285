//! Model-free searches over a [`Table`], used as reference oracles for the
//! learned index.

use sorted_table::Table;

use crate::{Error, Result};

/// Collects the offset of every entry equal to `key` with an `O(n)` scan.
/// Works on unsorted tables too.
pub fn full_scan_lookup<T: Table + ?Sized>(key: f64, table: &T) -> Result<Vec<usize>> {
    let offsets: Vec<usize> = (0..table.len())
        .map(|i| table.get(i))
        .filter(|&(k, _)| k == key)
        .map(|(_, offset)| offset)
        .collect();

    if offsets.is_empty() {
        return Err(Error::NotFound { key });
    }

    Ok(offsets)
}

/// Binary search to the first occurrence of `key`, then a forward scan over
/// its duplicates.
///
/// The table must be sorted. That is checked up front and reported as
/// [`Error::NotSorted`], which is fatal: it means the caller broke an
/// invariant, not that the key is missing.
pub fn binary_search_lookup<T: Table + ?Sized>(key: f64, table: &T) -> Result<Vec<usize>> {
    if !table.is_sorted() {
        return Err(Error::NotSorted);
    }

    let offsets: Vec<usize> = (search_table(table, key)..table.len())
        .map(|i| table.get(i))
        .take_while(|&(k, _)| k == key)
        .map(|(_, offset)| offset)
        .collect();

    if offsets.is_empty() {
        return Err(Error::NotFound { key });
    }

    Ok(offsets)
}

/// Index of the first entry whose key is `>= x`, or `table.len()`.
pub fn search_table<T: Table + ?Sized>(table: &T, x: f64) -> usize {
    let (mut lo, mut hi) = (0, table.len());

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if table.get(mid).0 < x {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    lo
}

/// Leftmost search for `key` that probes `mid` first instead of the middle
/// of the table, for callers that already have a good guess.
///
/// Returns the index of the first entry `>= key`, or the last index if every
/// key is smaller.
pub fn interpolation_search<T: Table + ?Sized>(key: f64, table: &T, mid: usize) -> usize {
    if table.is_empty() {
        return 0;
    }

    let (mut l, mut r) = (0, table.len() - 1);
    let mut m = mid.min(r);

    while l < r {
        if table.get(m).0 < key {
            l = m + 1;
        } else {
            r = m;
        }
        m = l + (r - l) / 2;
    }

    l
}
