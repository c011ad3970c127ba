//! The immutable result of an index build.

use std::time::Duration;

use serde::Serialize;

use crate::{
    bucket::{LetterBucket, LetterStat},
    letter::Letter,
};

/// Letter → bucket mapping over one source.
///
/// A `LetterIndex` is produced whole by [`IndexBuilder::finish`](crate::IndexBuilder::finish)
/// and never mutated afterwards; a rebuild produces a new instance.
#[derive(Debug, Clone)]
pub struct LetterIndex {
    buckets: [Option<LetterBucket>; Letter::COUNT],
    total_records: u64,
    stats: BuildStats,
}

/// Counters collected while building an index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStats {
    /// All lines read, including skipped ones.
    pub lines_scanned: u64,
    /// Lines that were empty after trimming.
    pub blank_lines: u64,
    /// Lines whose first character has no letter bucket.
    pub invalid_lines: u64,
    /// Letter groups replaced by a later, non-contiguous group of the same letter.
    pub overwritten_buckets: u64,
    pub bytes_scanned: u64,
    #[serde(serialize_with = "serialize_millis", rename = "elapsedMs")]
    pub elapsed: Duration,
}

fn serialize_millis<S: serde::Serializer>(
    value: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(value.as_millis() as u64)
}

impl LetterIndex {
    pub(crate) fn new(
        buckets: [Option<LetterBucket>; Letter::COUNT],
        total_records: u64,
        stats: BuildStats,
    ) -> LetterIndex {
        LetterIndex {
            buckets,
            total_records,
            stats,
        }
    }

    /// The bucket of `letter`, or `None` when no record starts with it.
    pub fn bucket(&self, letter: Letter) -> Option<&LetterBucket> {
        self.buckets[letter.index()].as_ref()
    }

    /// All buckets, ordered by letter.
    pub fn buckets(&self) -> impl Iterator<Item = &LetterBucket> {
        self.buckets.iter().flatten()
    }

    /// Letter and record count of every bucket, ordered by letter.
    pub fn list_buckets(&self) -> Vec<LetterStat> {
        self.buckets().map(LetterBucket::stat).collect()
    }

    /// Letters that have a bucket, in alphabetical order.
    pub fn available_letters(&self) -> Vec<Letter> {
        self.buckets().map(|b| b.letter).collect()
    }

    /// Number of accepted records in the source.
    ///
    /// This includes records of letter groups that were replaced by a later
    /// group of the same letter, so it can exceed the sum of bucket counts
    /// when the source is not sorted.
    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets().count()
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }
}
