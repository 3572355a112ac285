use super::record::from_record;
use super::store::Store;
use crate::Result;

/// A read-only window `[start, end]` (inclusive) over the records of a
/// [`Store`].
#[derive(Clone, Copy, Debug)]
pub struct StoreSlice<'a> {
    store: &'a Store,
    start: u64,
    end: u64,
}

impl<'a> StoreSlice<'a> {
    pub(super) fn new(store: &'a Store, start: u64, end: u64) -> Self {
        debug_assert!(start <= end);
        Self { store, start, end }
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Saturates at `u64::MAX` for a slice over the whole index space.
    pub fn len(&self) -> u64 {
        (self.end - self.start).saturating_add(1)
    }

    /// Never true: a slice always covers at least its start record.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Key and value of record `i`, addressed like [`Store::get`].
    pub fn get(&self, i: u64) -> Result<(f64, u64)> {
        Ok(from_record(&self.store.get(i)?))
    }

    /// The records of the window, in order.
    pub fn iter(&self) -> impl Iterator<Item = Result<(f64, u64)>> + 'a {
        let store = self.store;
        (self.start..=self.end).map(move |i| Ok(from_record(&store.get(i)?)))
    }
}
