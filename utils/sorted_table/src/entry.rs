/// A single `(key, row offset)` pair of a [`SortedTable`](crate::SortedTable).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableEntry {
    /// Key
    pub key: f64,
    /// Row of the key in the original dataset
    pub offset: usize,
}

impl TableEntry {
    pub fn new(key: f64, offset: usize) -> Self {
        Self { key, offset }
    }
}
