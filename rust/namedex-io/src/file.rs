//! Local file backend.

use std::{
    fs::File,
    io::{BufWriter, Write},
    ops::Range,
    path::{Path, PathBuf},
};

use bytes::{Bytes, BytesMut};

use crate::{ReadAt, SealingWrite, StorageProfile, check_range};

/// Positional reader over a local file.
///
/// The length is taken when the file is opened. Name sources are treated as
/// immutable while they are served; bytes appended later are not visible.
pub struct FileReader {
    file: File,
    path: PathBuf,
    len: u64,
}

impl FileReader {
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<FileReader> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let len = file.metadata()?.len();
        Ok(FileReader { file, path, len })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReadAt for FileReader {
    fn size(&self) -> std::io::Result<u64> {
        Ok(self.len)
    }

    fn read_at(&self, range: Range<u64>) -> std::io::Result<Bytes> {
        check_range(&range)?;
        let end = range.end.min(self.len);
        if range.start >= end {
            return Ok(Bytes::new());
        }
        let mut buf = BytesMut::zeroed((end - range.start) as usize);
        read_exact_at(&self.file, range.start, &mut buf)?;
        Ok(buf.freeze())
    }

    fn storage_profile(&self) -> StorageProfile {
        StorageProfile {
            min_io_size: 16 * 1024,
            max_io_size: 1024 * 1024,
        }
    }
}

/// Buffered writer creating a new file; fails if the file already exists.
pub struct FileWriter {
    out: Option<BufWriter<File>>,
}

impl FileWriter {
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<FileWriter> {
        let file = File::create_new(path)?;
        Ok(FileWriter {
            out: Some(BufWriter::with_capacity(256 * 1024, file)),
        })
    }

    fn sealed() -> std::io::Error {
        std::io::Error::other("writer is already sealed")
    }
}

impl SealingWrite for FileWriter {
    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.out.as_mut().ok_or_else(Self::sealed)?.write_all(buf)
    }

    fn seal(&mut self) -> std::io::Result<()> {
        let out = self.out.take().ok_or_else(Self::sealed)?;
        let file = out.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    }
}

#[cfg(unix)]
fn read_exact_at(file: &File, pos: u64, buf: &mut [u8]) -> std::io::Result<()> {
    use std::os::unix::fs::FileExt;
    file.read_exact_at(buf, pos)
}

#[cfg(windows)]
fn read_exact_at(file: &File, mut pos: u64, mut buf: &mut [u8]) -> std::io::Result<()> {
    use std::os::windows::fs::FileExt;
    while !buf.is_empty() {
        let n = file.seek_read(buf, pos)?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf = &mut buf[n..];
        pos += n as u64;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{FileReader, FileWriter};
    use crate::{ReadAt, SealingWrite};

    #[test]
    fn test_write_then_read_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.txt");
        let mut writer = FileWriter::create(&path).unwrap();
        for name in ["Alice\n", "Anna\n", "Bob\n"] {
            writer.write_all(name.as_bytes()).unwrap();
        }
        writer.seal().unwrap();
        assert!(writer.write_all(b"Zed\n").is_err());
        assert!(FileWriter::create(&path).is_err());

        let reader = FileReader::open(&path).unwrap();
        assert_eq!(reader.path(), path.as_path());
        assert_eq!(reader.size().unwrap(), 15);
        assert_eq!(reader.read_at(6..10).unwrap().as_ref(), b"Anna");
        assert_eq!(reader.read_at(11..100).unwrap().as_ref(), b"Bob\n");
        assert!(reader.read_at(100..200).unwrap().is_empty());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileReader::open(dir.path().join("missing.txt")).err().unwrap();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
