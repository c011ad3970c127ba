//! Positional I/O for name sources.
//!
//! A name source is read by many scans at once: the index build walks it from
//! start to end, and every page request walks a short stretch starting at a
//! bucket checkpoint. None of them may disturb the others, so the primitive
//! here is [`ReadAt`], which fetches an absolute byte range and keeps no
//! cursor. [`ReadAdapter`] layers an owned cursor on top of it to get a
//! regular `std::io::Read` stream that a `BufReader` can split into lines.
//!
//! Implementations:
//! - [`FileReader`] / [`FileWriter`] for local files.
//! - `bytes::Bytes` and `Vec<u8>` as in-memory sources.
//! - [`TrackedReadAt`] to observe how much of a source a scan touched.

use std::{ops::Range, sync::Arc};

use bytes::Bytes;

mod adapter;
mod file;
mod memory;
mod tracked;

pub use adapter::ReadAdapter;
pub use file::{FileReader, FileWriter};
pub use tracked::TrackedReadAt;

/// A read-only blob addressed by absolute byte positions.
pub trait ReadAt: Send + Sync + 'static {
    /// Current length of the blob in bytes.
    fn size(&self) -> std::io::Result<u64>;

    /// Returns the bytes in `range`.
    ///
    /// The result is only shorter than requested when the range runs past the
    /// end of the blob; a range starting at or after the end yields no bytes.
    fn read_at(&self, range: Range<u64>) -> std::io::Result<Bytes>;

    /// I/O sizing hints for buffers placed in front of this reader.
    fn storage_profile(&self) -> StorageProfile;
}

/// An append-only sink whose content becomes complete once it is sealed.
pub trait SealingWrite: Send {
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()>;

    /// Flushes and commits everything written so far. Writes after sealing fail.
    fn seal(&mut self) -> std::io::Result<()>;
}

/// Preferred request sizes of a storage backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageProfile {
    /// Requests below this size are dominated by per-call overhead.
    pub min_io_size: usize,
    /// Requests above this size bring no further benefit.
    pub max_io_size: usize,
}

impl StorageProfile {
    /// Fits `size` into `[min_io_size, max_io_size]`, never returning zero.
    pub fn clamp_io_size(&self, size: usize) -> usize {
        let lower = self.min_io_size.clamp(1, self.max_io_size.max(1));
        let upper = self.max_io_size.max(lower);
        size.clamp(lower, upper)
    }
}

impl Default for StorageProfile {
    fn default() -> StorageProfile {
        StorageProfile {
            min_io_size: 4 * 1024,
            max_io_size: 4 * 1024 * 1024,
        }
    }
}

impl<T: ReadAt + ?Sized> ReadAt for Arc<T> {
    fn size(&self) -> std::io::Result<u64> {
        (**self).size()
    }

    fn read_at(&self, range: Range<u64>) -> std::io::Result<Bytes> {
        (**self).read_at(range)
    }

    fn storage_profile(&self) -> StorageProfile {
        (**self).storage_profile()
    }
}

/// Rejects inverted ranges.
pub(crate) fn check_range(range: &Range<u64>) -> std::io::Result<()> {
    if range.start <= range.end {
        Ok(())
    } else {
        Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("inverted read range {}..{}", range.start, range.end),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{StorageProfile, check_range};

    #[test]
    fn test_clamp_io_size() {
        let profile = StorageProfile {
            min_io_size: 16 * 1024,
            max_io_size: 1024 * 1024,
        };
        assert_eq!(profile.clamp_io_size(0), 16 * 1024);
        assert_eq!(profile.clamp_io_size(64 * 1024), 64 * 1024);
        assert_eq!(profile.clamp_io_size(usize::MAX), 1024 * 1024);

        let empty_source = StorageProfile {
            min_io_size: 1,
            max_io_size: 0,
        };
        assert_eq!(empty_source.clamp_io_size(64 * 1024), 1);
    }

    #[test]
    fn test_check_range() {
        assert!(check_range(&(3..3)).is_ok());
        assert!(check_range(&(3..10)).is_ok());
        #[allow(clippy::reversed_empty_ranges)]
        let inverted = 10..3;
        assert!(check_range(&inverted).is_err());
    }
}
