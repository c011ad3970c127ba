//! The directory service: the source, its published index and the page and
//! introspection operations over them.

use std::sync::Arc;

use namedex_common::{CancellationToken, Result, error::Error};
use parking_lot::RwLock;

use crate::{
    bucket::{LetterBucket, LetterStat},
    builder::build_index,
    config::IndexConfig,
    index::{BuildStats, LetterIndex},
    letter::Letter,
    page::{PageRequest, PageResult},
    reader::{RangeReader, SeekHint},
    source::{FileSource, RecordSource},
};

/// Serves letter-bucketed pages of a name source.
///
/// The index is published once a build completes: the complete
/// [`LetterIndex`] is constructed off to the side and then swapped into the
/// shared slot, so readers observe either no index or a whole one. Until the
/// first successful build every read operation fails with `IndexNotReady`.
///
/// Read operations only clone the published `Arc` and then work on their own
/// source handle, so they never block each other.
pub struct NameDirectory {
    source: Arc<dyn RecordSource>,
    config: IndexConfig,
    index: RwLock<Option<Arc<LetterIndex>>>,
}

impl NameDirectory {
    pub fn new(source: Arc<dyn RecordSource>, config: IndexConfig) -> NameDirectory {
        NameDirectory {
            source,
            config,
            index: RwLock::new(None),
        }
    }

    /// Creates a directory over the file at `path`. Nothing is read until
    /// [`NameDirectory::build`] is called.
    pub fn for_file(path: impl Into<std::path::PathBuf>, config: IndexConfig) -> NameDirectory {
        NameDirectory::new(Arc::new(FileSource::new(path)), config)
    }

    pub fn source(&self) -> &dyn RecordSource {
        self.source.as_ref()
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Scans the source and publishes a new index.
    ///
    /// On failure the previously published index, if any, stays in place.
    pub fn build(&self) -> Result<Arc<LetterIndex>> {
        let index = Arc::new(build_index(self.source.as_ref(), &self.config)?);
        *self.index.write() = Some(index.clone());
        Ok(index)
    }

    pub fn is_ready(&self) -> bool {
        self.index.read().is_some()
    }

    /// The currently published index.
    pub fn snapshot(&self) -> Result<Arc<LetterIndex>> {
        self.index.read().clone().ok_or_else(Error::index_not_ready)
    }

    /// Returns up to `limit` records of the `letter` bucket, starting at
    /// `offset` within the bucket.
    ///
    /// A letter without records yields an empty page with `total == 0`; an
    /// offset past the end of the bucket yields an empty page with the bucket
    /// size as `total`.
    pub fn get_page(&self, letter: &str, offset: i64, limit: i64) -> Result<PageResult> {
        self.read_page(letter, offset, limit, None)
    }

    /// Same as [`NameDirectory::get_page`], but the underlying scan stops with
    /// a `Cancelled` error as soon as `token` is cancelled.
    pub fn get_page_cancellable(
        &self,
        letter: &str,
        offset: i64,
        limit: i64,
        token: &CancellationToken,
    ) -> Result<PageResult> {
        self.read_page(letter, offset, limit, Some(token))
    }

    fn read_page(
        &self,
        letter: &str,
        offset: i64,
        limit: i64,
        token: Option<&CancellationToken>,
    ) -> Result<PageResult> {
        let index = self.snapshot()?;
        let request = PageRequest::validate(letter, offset, limit, self.config.max_page_limit)?;

        let Some(bucket) = index.bucket(request.letter) else {
            return Ok(PageResult::empty(0));
        };
        let Some(window) = request.window(bucket) else {
            return Ok(PageResult::empty(bucket.count));
        };

        let hint = self
            .config
            .use_seek_checkpoints
            .then(|| SeekHint::from(bucket));
        let mut reader = RangeReader::new(self.source.as_ref(), self.config.read_buffer_size);
        if let Some(token) = token {
            reader = reader.with_cancellation(token);
        }
        let scan = reader.read_range(window, hint)?;

        Ok(PageResult {
            records: scan.records,
            total: bucket.count,
            has_more: request.has_more(bucket.count),
        })
    }

    pub fn bucket_info(&self, letter: Letter) -> Result<Option<LetterBucket>> {
        Ok(self.snapshot()?.bucket(letter).copied())
    }

    pub fn list_buckets(&self) -> Result<Vec<LetterStat>> {
        Ok(self.snapshot()?.list_buckets())
    }

    pub fn total_records(&self) -> Result<u64> {
        Ok(self.snapshot()?.total_records())
    }

    pub fn available_letters(&self) -> Result<Vec<Letter>> {
        Ok(self.snapshot()?.available_letters())
    }

    pub fn build_stats(&self) -> Result<BuildStats> {
        Ok(self.snapshot()?.stats().clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use namedex_common::error::ErrorKind;

    use super::NameDirectory;
    use crate::{config::IndexConfig, source::SharedSource};

    #[test]
    fn test_not_ready() {
        let source = SharedSource::from_bytes("names", "Alice\nBob\n");
        let directory = NameDirectory::new(Arc::new(source), IndexConfig::default());
        assert!(!directory.is_ready());

        let not_ready = |err: namedex_common::error::Error| {
            matches!(err.kind(), ErrorKind::IndexNotReady)
        };
        assert!(not_ready(directory.get_page("A", 0, 10).unwrap_err()));
        assert!(not_ready(directory.list_buckets().unwrap_err()));
        assert!(not_ready(directory.total_records().unwrap_err()));
        assert!(not_ready(directory.available_letters().unwrap_err()));
        assert!(not_ready(
            directory
                .bucket_info(crate::Letter::new('A').unwrap())
                .unwrap_err()
        ));

        directory.build().unwrap();
        assert!(directory.is_ready());
        assert_eq!(directory.total_records().unwrap(), 2);
    }

    #[test]
    fn test_failed_rebuild_keeps_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.txt");
        std::fs::write(&path, "Alice\nBob\n").unwrap();

        let directory = NameDirectory::for_file(&path, IndexConfig::default());
        directory.build().unwrap();
        std::fs::remove_file(&path).unwrap();

        let err = directory.build().unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::FileNotFound { .. }));
        assert!(directory.is_ready());
        assert_eq!(directory.total_records().unwrap(), 2);
    }
}
