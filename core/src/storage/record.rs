//! The fixed 16-byte record: an `f64` key followed by a `u64` value, both
//! little-endian.

use zerocopy::byteorder::little_endian::{F64, U64};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

pub const KEY_LEN: usize = 8;
pub const VALUE_LEN: usize = 8;
pub const RECORD_LEN: usize = KEY_LEN + VALUE_LEN;

/// A key/value pair in its on-disk representation.
///
/// | Field | Size | Description              |
/// |-------|------|--------------------------|
/// | key   | 8    | Indexed key              |
/// | value | 8    | Row offset of the key    |
#[derive(FromBytes, IntoBytes, Immutable, KnownLayout, Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Record {
    key: F64,
    value: U64,
}

const _: () = assert!(core::mem::size_of::<Record>() == RECORD_LEN);

impl Record {
    pub fn new(key: f64, value: u64) -> Self {
        Self {
            key: F64::new(key),
            value: U64::new(value),
        }
    }

    pub fn key(&self) -> f64 {
        self.key.get()
    }

    pub fn value(&self) -> u64 {
        self.value.get()
    }
}

pub fn to_record(key: f64, value: u64) -> Record {
    Record::new(key, value)
}

pub fn from_record(record: &Record) -> (f64, u64) {
    (record.key(), record.value())
}
