//! In-memory sources and sinks.

use std::ops::Range;

use bytes::Bytes;

use crate::{ReadAt, SealingWrite, StorageProfile, check_range};

/// Clips `range` to a buffer of `len` bytes.
fn clip(range: Range<u64>, len: usize) -> std::io::Result<Range<usize>> {
    check_range(&range)?;
    let len = len as u64;
    let start = range.start.min(len);
    let end = range.end.min(len);
    Ok(start as usize..end as usize)
}

fn memory_profile(len: usize) -> StorageProfile {
    StorageProfile {
        min_io_size: 1,
        max_io_size: len.min(StorageProfile::default().max_io_size),
    }
}

impl ReadAt for Bytes {
    fn size(&self) -> std::io::Result<u64> {
        Ok(self.len() as u64)
    }

    fn read_at(&self, range: Range<u64>) -> std::io::Result<Bytes> {
        Ok(self.slice(clip(range, self.len())?))
    }

    fn storage_profile(&self) -> StorageProfile {
        memory_profile(self.len())
    }
}

impl ReadAt for Vec<u8> {
    fn size(&self) -> std::io::Result<u64> {
        Ok(self.len() as u64)
    }

    fn read_at(&self, range: Range<u64>) -> std::io::Result<Bytes> {
        Ok(Bytes::copy_from_slice(&self[clip(range, self.len())?]))
    }

    fn storage_profile(&self) -> StorageProfile {
        memory_profile(self.len())
    }
}

impl SealingWrite for Vec<u8> {
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn seal(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bytes::Bytes;

    use crate::{ReadAt, SealingWrite};

    #[test]
    fn test_vec_sink() {
        let mut buffer = Vec::<u8>::new();
        buffer.write_all(b"Alice\n").unwrap();
        buffer.write_all(b"Bob\n").unwrap();
        buffer.seal().unwrap();
        assert_eq!(buffer, b"Alice\nBob\n");
    }

    #[test]
    fn test_memory_sources() {
        let blob = Bytes::from_static(b"Alice\nBob\n");
        assert_eq!(blob.size().unwrap(), 10);
        assert_eq!(blob.read_at(6..9).unwrap().as_ref(), b"Bob");
        assert_eq!(blob.read_at(6..200).unwrap().as_ref(), b"Bob\n");
        assert!(blob.read_at(20..30).unwrap().is_empty());
        assert_eq!(blob.storage_profile().max_io_size, 10);

        let shared = Arc::new(blob.to_vec()) as Arc<dyn ReadAt>;
        assert_eq!(shared.read_at(0..5).unwrap().as_ref(), b"Alice");
        assert!(shared.read_at(11..12).unwrap().is_empty());
    }
}
