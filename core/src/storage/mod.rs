//! On-disk form of an index.
//!
//! The sorted table goes into a [`Store`] of fixed-size records, one per
//! key, with the row offset as the record value. The model and error bounds
//! go into a bincode sidecar next to it (`<path>.meta`).

mod record;
mod slice;
mod store;

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};

use learned_index_model::Model;
use serde::{Deserialize, Serialize};
use sorted_table::SortedTable;

use crate::bound::ErrorBounds;
use crate::{Error, LearnedIndex, Result};

pub use record::{from_record, to_record, Record, KEY_LEN, RECORD_LEN, VALUE_LEN};
pub use slice::StoreSlice;
pub use store::{Store, HEADER_LEN};

/// Format version written to, and expected in, the metadata sidecar.
pub const META_VERSION: &str = "1";

/// Everything about an index except its table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexMeta {
    pub version: String,
    pub len: u64,
    pub model: Model,
    pub bounds: ErrorBounds,
}

/// `<path>.meta`
pub fn meta_path(path: impl AsRef<Path>) -> PathBuf {
    let mut meta = OsString::from(path.as_ref().as_os_str());
    meta.push(".meta");
    PathBuf::from(meta)
}

/// Appends every entry of `table` to `store`, in order.
pub fn write_table(store: &mut Store, table: &SortedTable) -> Result<()> {
    for entry in table.iter() {
        store.put(&to_record(entry.key, entry.offset as u64))?;
    }
    Ok(())
}

/// Reads back a table written by [`write_table`]. Fails if the records are
/// not sorted by key, or if the header counts more records than the file
/// holds.
pub fn read_table(store: &Store) -> Result<SortedTable> {
    let header = store.record_count();
    let stored = store.stored_records()?;
    if header > stored {
        return Err(Error::Truncated { header, stored });
    }

    let mut keys = Vec::with_capacity(header as usize);
    let mut offsets = Vec::with_capacity(header as usize);

    for record in store.records() {
        let (key, value) = from_record(&record?);
        keys.push(key);
        offsets.push(value as usize);
    }

    Ok(SortedTable::from_sorted_parts(keys, offsets)?)
}

impl LearnedIndex {
    /// Writes the table to `path` and the model to `<path>.meta`,
    /// replacing whatever was there.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let mut store = Store::create(path)?;
        write_table(&mut store, self.table())?;
        store.sync()?;

        let meta = IndexMeta {
            version: META_VERSION.to_string(),
            len: self.len() as u64,
            model: self.model().clone(),
            bounds: self.bounds(),
        };
        std::fs::write(meta_path(path), bincode::serialize(&meta)?)?;

        log::debug!("saved index of {} keys to {}", self.len(), path.display());
        Ok(())
    }

    /// Loads an index written by [`LearnedIndex::save`].
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let meta: IndexMeta = bincode::deserialize(&std::fs::read(meta_path(path))?)?;
        if meta.version != META_VERSION {
            return Err(Error::Version {
                found: meta.version,
                expected: META_VERSION.to_string(),
            });
        }

        let store = Store::from_file(File::open(path)?);
        let count = store.record_count();
        if count != meta.len {
            return Err(Error::MetaMismatch {
                meta: meta.len,
                store: count,
            });
        }

        let table = read_table(&store)?;
        log::debug!("opened index of {} keys from {}", table.len(), path.display());

        Ok(Self::from_parts(meta.model, table, meta.bounds))
    }
}
