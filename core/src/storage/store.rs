use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use zerocopy::byteorder::little_endian::U64;
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout};

use super::record::{Record, RECORD_LEN};
use super::slice::StoreSlice;
use crate::{Error, Result};

/// Size of the record count header at the start of the file.
pub const HEADER_LEN: u64 = 8;

/// Record count at the start of the file.
#[derive(FromBytes, IntoBytes, Immutable, KnownLayout, Clone, Copy, Debug)]
#[repr(C)]
struct Header {
    count: U64,
}

const _: () = assert!(core::mem::size_of::<Header>() as u64 == HEADER_LEN);

/// An append-only file of fixed-size [`Record`]s.
///
/// The file starts with a little-endian `u64` holding the number of records,
/// followed by the records themselves. Reads use positioned I/O and only
/// need `&self`; appending needs `&mut self`, so within a process there is a
/// single writer. Nothing guards against two processes appending to the same
/// file: callers that share a store across processes must serialize writers
/// themselves (e.g. with a file lock).
#[derive(Debug)]
pub struct Store {
    file: File,
}

impl Store {
    /// Opens the store at `path` for reading and appending, creating an
    /// empty file if none exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        Ok(Self::from_file(file))
    }

    /// Creates an empty store at `path`, discarding any previous content.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        Ok(Self::from_file(file))
    }

    pub fn from_file(file: File) -> Self {
        Self { file }
    }

    /// Reads the `i`-th record.
    ///
    /// `i` is not checked against [`Store::record_count`]; reading past the
    /// end of the file is an I/O error.
    pub fn get(&self, i: u64) -> Result<Record> {
        let mut record = Record::new_zeroed();
        read_exact_at(&self.file, record.as_mut_bytes(), record_offset(i))?;
        Ok(record)
    }

    /// Appends a record, then bumps the record count.
    ///
    /// The two writes are not atomic: a crash in between leaves a record on
    /// disk that the header does not count, and that later reads ignore.
    pub fn put(&mut self, record: &Record) -> Result<()> {
        let count = self.record_count();
        let offset = record_offset(count);
        log::trace!("append record {count} at byte {offset}");

        write_all_at(&self.file, record.as_bytes(), offset)?;
        self.set_record_count(count + 1)
    }

    /// Number of records according to the header, or `0` if the header
    /// cannot be read (e.g. a new, empty file).
    pub fn record_count(&self) -> u64 {
        let mut header = Header::new_zeroed();
        match read_exact_at(&self.file, header.as_mut_bytes(), 0) {
            Ok(()) => header.count.get(),
            Err(_) => 0,
        }
    }

    /// Number of whole records the file is long enough to hold, whatever the
    /// header claims.
    pub fn stored_records(&self) -> Result<u64> {
        let len = self.file.metadata()?.len();
        Ok(len.saturating_sub(HEADER_LEN) / RECORD_LEN as u64)
    }

    fn set_record_count(&mut self, count: u64) -> Result<()> {
        let header = Header {
            count: U64::new(count),
        };
        write_all_at(&self.file, header.as_bytes(), 0)?;
        Ok(())
    }

    /// A view of records `start..=end`.
    pub fn slice(&self, start: u64, end: u64) -> Result<StoreSlice<'_>> {
        if end < start {
            return Err(Error::InvalidRange { start, end });
        }

        Ok(StoreSlice::new(self, start, end))
    }

    /// Every record counted by the header, in order.
    pub fn records(&self) -> impl Iterator<Item = Result<Record>> + '_ {
        (0..self.record_count()).map(move |i| self.get(i))
    }

    /// Flushes data and metadata to the device.
    pub fn sync(&self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }
}

fn record_offset(i: u64) -> u64 {
    i.saturating_mul(RECORD_LEN as u64).saturating_add(HEADER_LEN)
}

#[cfg(unix)]
fn read_exact_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<()> {
    std::os::unix::fs::FileExt::read_exact_at(file, buf, offset)
}

#[cfg(unix)]
fn write_all_at(file: &File, buf: &[u8], offset: u64) -> io::Result<()> {
    std::os::unix::fs::FileExt::write_all_at(file, buf, offset)
}

#[cfg(windows)]
fn read_exact_at(file: &File, mut buf: &mut [u8], mut offset: u64) -> io::Result<()> {
    use std::os::windows::fs::FileExt;

    while !buf.is_empty() {
        match file.seek_read(buf, offset) {
            Ok(0) => return Err(io::ErrorKind::UnexpectedEof.into()),
            Ok(n) => {
                buf = &mut std::mem::take(&mut buf)[n..];
                offset += n as u64;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

#[cfg(windows)]
fn write_all_at(file: &File, mut buf: &[u8], mut offset: u64) -> io::Result<()> {
    use std::os::windows::fs::FileExt;

    while !buf.is_empty() {
        match file.seek_write(buf, offset) {
            Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
            Ok(n) => {
                buf = &buf[n..];
                offset += n as u64;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
