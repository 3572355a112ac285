#![no_std]

//! A collection of algorithms for leftmost searches within sorted slices.
//!
//! Unlike `slice::binary_search`, every algorithm here reports the *first*
//! position of a matching element, which is what an index with duplicate
//! keys needs. Elements only have to be `PartialOrd`, so floating point keys
//! can be searched directly.
#![deny(missing_docs)]

use core::ops::Range;

/// An algorithm for searching a sorted slice, e.g. Binary or Linear
pub trait Search {
    /// Returns the index of the first element which is not less than `x`.
    ///
    /// This is `slice.len()` if every element is less than `x`. The slice is
    /// assumed to be sorted in non-decreasing order.
    ///
    /// # Example
    ///
    /// ```
    /// use slice_search::*;
    ///
    /// let slice = [1.0, 2.0, 3.0, 3.0, 8.0];
    /// assert_eq!(BinarySearch::leftmost(&slice, &3.0), 2);
    /// assert_eq!(BinarySearch::leftmost(&slice, &4.0), 4);
    /// assert_eq!(BinarySearch::leftmost(&slice, &9.0), 5);
    /// ```
    fn leftmost<T: PartialOrd>(slice: &[T], x: &T) -> usize;

    /// Search a slice for `x`.
    ///
    /// If the value is found then `Result::Ok` is returned, containing the
    /// index of the first matching element. Otherwise `Result::Err` is
    /// returned, containing the index where a matching element could be
    /// inserted while maintaining sorted order.
    ///
    /// ```
    /// use slice_search::*;
    ///
    /// let slice = [1, 2, 3, 3, 5, 8];
    /// assert_eq!(BinarySearch::search(&slice, &3), Ok(2));
    /// assert_eq!(BinarySearch::search(&slice, &6), Err(5));
    /// ```
    fn search<T: PartialOrd>(slice: &[T], x: &T) -> Result<usize, usize> {
        let index = Self::leftmost(slice, x);

        match slice.get(index) {
            Some(y) if y == x => Ok(index),
            _ => Err(index),
        }
    }

    /// Leftmost search restricted to `window`, returning an absolute index.
    ///
    /// The result lies in `window.start..=window.end`; `window.end` means no
    /// element of the window is greater than or equal to `x`. An empty window
    /// returns `window.start`.
    ///
    /// ```
    /// use slice_search::*;
    ///
    /// let slice = [1, 2, 3, 3, 5, 8];
    /// assert_eq!(BinarySearch::leftmost_in(&slice, 3..6, &3), 3);
    /// assert_eq!(BinarySearch::leftmost_in(&slice, 0..2, &3), 2);
    /// ```
    fn leftmost_in<T: PartialOrd>(slice: &[T], window: Range<usize>, x: &T) -> usize {
        if window.start >= window.end {
            return window.start;
        }

        window.start + Self::leftmost(&slice[window], x)
    }
}

/// Performs a binary search on a slice, with computational complexity `O(log n)`
/// However, for small searches, a linear search may be faster.
pub struct BinarySearch;

impl Search for BinarySearch {
    fn leftmost<T: PartialOrd>(slice: &[T], x: &T) -> usize {
        slice.partition_point(|y| y < x)
    }
}

/// Performs a simple linear search on a slice, with computational complexity `O(n)`
pub struct LinearSearch;

impl Search for LinearSearch {
    fn leftmost<T: PartialOrd>(slice: &[T], x: &T) -> usize {
        let mut index = 0;
        let size = slice.len();

        while index < size && unsafe { slice.get_unchecked(index) } < x {
            index += 1;
        }

        index
    }
}

const BINARY_SEARCH_CUTOFF: usize = 1024;

/// Chooses between binary and linear search depending on the size of the slice to search
pub struct OptimalSearch;

impl Search for OptimalSearch {
    fn leftmost<T: PartialOrd>(slice: &[T], x: &T) -> usize {
        if core::mem::size_of_val(slice) > BINARY_SEARCH_CUTOFF {
            BinarySearch::leftmost(slice, x)
        } else {
            LinearSearch::leftmost(slice, x)
        }
    }
}

/// Returns `true` if the slice is sorted in non-decreasing order.
///
/// Incomparable neighbours (e.g. a `NaN` key) make the slice unsorted.
///
/// ```
/// use slice_search::is_sorted;
///
/// assert!(is_sorted(&[1.0, 2.0, 2.0, 3.5]));
/// assert!(!is_sorted(&[1.0, f64::NAN]));
/// ```
pub fn is_sorted<T: PartialOrd>(slice: &[T]) -> bool {
    slice.windows(2).all(|w| w[0] <= w[1])
}
