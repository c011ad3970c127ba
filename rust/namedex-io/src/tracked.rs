//! Read accounting for a positional source.

use std::{
    ops::Range,
    sync::atomic::{AtomicU64, Ordering},
};

use bytes::Bytes;

use crate::{ReadAt, StorageProfile};

/// Counts the bytes fetched through it and the furthest position reached.
///
/// Wrapped around a source, it shows how much of the source a bounded scan
/// actually touched.
pub struct TrackedReadAt<R> {
    inner: R,
    bytes_read: AtomicU64,
    high_water_mark: AtomicU64,
}

impl<R> TrackedReadAt<R> {
    pub fn new(inner: R) -> TrackedReadAt<R> {
        TrackedReadAt {
            inner,
            bytes_read: AtomicU64::new(0),
            high_water_mark: AtomicU64::new(0),
        }
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read.load(Ordering::Relaxed)
    }

    /// End of the furthest range served so far.
    pub fn high_water_mark(&self) -> u64 {
        self.high_water_mark.load(Ordering::Relaxed)
    }
}

impl<R: ReadAt> ReadAt for TrackedReadAt<R> {
    fn size(&self) -> std::io::Result<u64> {
        self.inner.size()
    }

    fn read_at(&self, range: Range<u64>) -> std::io::Result<Bytes> {
        let start = range.start;
        let bytes = self.inner.read_at(range)?;
        let len = bytes.len() as u64;
        self.bytes_read.fetch_add(len, Ordering::Relaxed);
        self.high_water_mark.fetch_max(start + len, Ordering::Relaxed);
        Ok(bytes)
    }

    fn storage_profile(&self) -> StorageProfile {
        self.inner.storage_profile()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::TrackedReadAt;
    use crate::ReadAt;

    #[test]
    fn test_tracked_read() {
        let tracked = TrackedReadAt::new(Bytes::from_static(b"Alice\nBob\nCarol\n"));
        assert_eq!(tracked.bytes_read(), 0);

        tracked.read_at(6..10).unwrap();
        assert_eq!(tracked.bytes_read(), 4);
        assert_eq!(tracked.high_water_mark(), 10);

        tracked.read_at(0..3).unwrap();
        assert_eq!(tracked.bytes_read(), 7);
        assert_eq!(tracked.high_water_mark(), 10);

        tracked.read_at(12..100).unwrap();
        assert_eq!(tracked.high_water_mark(), 16);
    }
}
