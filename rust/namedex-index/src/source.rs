//! Sources of name records.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use bytes::Bytes;
use namedex_io::{FileReader, ReadAt};

/// A re-openable source of newline-delimited records.
///
/// Every scan calls [`RecordSource::open`] and works on its own handle, so
/// concurrent scans never share a cursor. The handle is released when the
/// returned reader is dropped.
pub trait RecordSource: Send + Sync + 'static {
    /// Human-readable name used in errors and logs.
    fn name(&self) -> &str;

    /// Opens a fresh positional reader over the source.
    fn open(&self) -> std::io::Result<Arc<dyn ReadAt>>;
}

/// A source backed by a local file, opened anew for every scan.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> FileSource {
        let path = path.into();
        let name = path.display().to_string();
        FileSource { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> std::io::Result<Arc<dyn ReadAt>> {
        Ok(Arc::new(FileReader::open(&self.path)?))
    }
}

/// A source over an already opened, shareable `ReadAt` (an in-memory buffer,
/// an instrumented reader, ...). Every scan gets its own cursor over it.
pub struct SharedSource {
    name: String,
    inner: Arc<dyn ReadAt>,
}

impl SharedSource {
    pub fn new(name: impl Into<String>, inner: Arc<dyn ReadAt>) -> SharedSource {
        SharedSource {
            name: name.into(),
            inner,
        }
    }

    pub fn from_bytes(name: impl Into<String>, data: impl Into<Bytes>) -> SharedSource {
        let data: Bytes = data.into();
        SharedSource::new(name, Arc::new(data))
    }
}

impl RecordSource for SharedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> std::io::Result<Arc<dyn ReadAt>> {
        Ok(self.inner.clone())
    }
}
