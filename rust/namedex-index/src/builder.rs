//! # Index builder
//!
//! Single-pass construction of a [`LetterIndex`] from a source sorted by the
//! leading letter of its records.
//!
//! The builder does not sort and does not buffer records. It only tracks the
//! currently open letter group (letter, first ordinal, count, byte position);
//! when the letter of an accepted record differs from the open group, the
//! group is closed into the index and a new one is opened at the current
//! ordinal. Memory use is therefore constant in the size of the source.
//!
//! Malformed lines never abort a build:
//! - blank lines are skipped and counted,
//! - lines whose first character has no letter bucket are skipped, counted
//!   and reported with a warning.
//!
//! Neither kind of line advances the record ordinal.
//!
//! If a letter's records are not contiguous, each run becomes its own group
//! and only the last one is kept in the index; earlier runs still count
//! toward [`LetterIndex::total_records`].

use std::time::{Duration, Instant};

use namedex_common::{Result, error::Error};
use tracing::{debug, info, warn};

use crate::{
    bucket::LetterBucket,
    config::IndexConfig,
    index::{BuildStats, LetterIndex},
    letter::Letter,
    record::{LineKind, classify_line, open_scanner},
    source::RecordSource,
};

/// Accumulates letter groups from a stream of source lines.
///
/// Feed every line of the source in order with [`IndexBuilder::push_line`],
/// then call [`IndexBuilder::finish`].
pub struct IndexBuilder {
    buckets: [Option<LetterBucket>; Letter::COUNT],
    /// The group currently being extended.
    open: Option<LetterBucket>,
    /// Ordinal of the next accepted record.
    record_ordinal: u64,
    stats: BuildStats,
    progress_interval: u64,
}

impl IndexBuilder {
    pub fn new(config: &IndexConfig) -> IndexBuilder {
        IndexBuilder {
            buckets: [None; Letter::COUNT],
            open: None,
            record_ordinal: 0,
            stats: BuildStats::default(),
            progress_interval: config.progress_interval,
        }
    }

    /// Processes one raw source line starting at `byte_offset`.
    pub fn push_line(&mut self, line_number: u64, byte_offset: u64, line: &str) {
        self.stats.lines_scanned += 1;
        match classify_line(line) {
            LineKind::Blank => self.stats.blank_lines += 1,
            LineKind::InvalidLeading(c) => {
                self.stats.invalid_lines += 1;
                warn!(line_number, character = %c, "skipping line with invalid leading character");
            }
            LineKind::Record { letter, .. } => self.push_record(letter, byte_offset),
        }

        if self.progress_interval != 0 && self.stats.lines_scanned % self.progress_interval == 0 {
            info!(
                lines = self.stats.lines_scanned,
                records = self.record_ordinal,
                "indexing in progress"
            );
        }
    }

    fn push_record(&mut self, letter: Letter, byte_offset: u64) {
        match &mut self.open {
            Some(bucket) if bucket.letter == letter => bucket.count += 1,
            _ => {
                self.close_open_bucket();
                self.open = Some(LetterBucket {
                    letter,
                    start_offset: self.record_ordinal,
                    count: 1,
                    byte_offset,
                });
            }
        }
        self.record_ordinal += 1;
    }

    fn close_open_bucket(&mut self) {
        let Some(bucket) = self.open.take() else {
            return;
        };
        debug!(
            letter = %bucket.letter,
            start = bucket.start_offset,
            count = bucket.count,
            "letter group indexed"
        );
        if let Some(previous) = self.buckets[bucket.letter.index()].replace(bucket) {
            self.stats.overwritten_buckets += 1;
            warn!(
                letter = %bucket.letter,
                previous_start = previous.start_offset,
                previous_count = previous.count,
                start = bucket.start_offset,
                "letter group is not contiguous, replacing the earlier group"
            );
        }
    }

    /// Number of records accepted so far.
    pub fn records(&self) -> u64 {
        self.record_ordinal
    }

    /// Closes the last open group and produces the index.
    pub fn finish(mut self, bytes_scanned: u64, elapsed: Duration) -> LetterIndex {
        self.close_open_bucket();
        self.stats.bytes_scanned = bytes_scanned;
        self.stats.elapsed = elapsed;
        LetterIndex::new(self.buckets, self.record_ordinal, self.stats)
    }
}

/// Builds the index of `source` in one streaming pass.
///
/// Fails with `FileNotFound` if the source cannot be opened and with
/// `Indexing` if reading fails midway; no partial index is ever returned.
pub fn build_index(source: &dyn RecordSource, config: &IndexConfig) -> Result<LetterIndex> {
    let started = Instant::now();
    let read_at = source
        .open()
        .map_err(|e| Error::file_not_found(source.name(), e))?;
    info!(source = source.name(), "building letter index");

    let mut builder = IndexBuilder::new(config);
    let mut scanner = open_scanner(read_at, 0, config.read_buffer_size);
    while let Some(line) = scanner
        .next_line()
        .map_err(|e| Error::indexing(source.name(), e))?
    {
        builder.push_line(line.line_number, line.byte_offset, &line.text);
    }

    let index = builder.finish(scanner.position(), started.elapsed());
    let stats = index.stats();
    info!(
        source = source.name(),
        records = index.total_records(),
        letters = index.bucket_count(),
        blank_lines = stats.blank_lines,
        invalid_lines = stats.invalid_lines,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "letter index built"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::IndexBuilder;
    use crate::{config::IndexConfig, letter::Letter};

    fn letter(c: char) -> Letter {
        Letter::new(c).unwrap()
    }

    fn build(lines: &[&str]) -> crate::LetterIndex {
        let mut builder = IndexBuilder::new(&IndexConfig::default());
        let mut pos = 0;
        for (i, line) in lines.iter().enumerate() {
            builder.push_line(i as u64, pos, line);
            pos += line.len() as u64 + 1;
        }
        builder.finish(pos, Duration::ZERO)
    }

    #[test]
    fn test_groups_and_offsets() {
        let index = build(&[
            "Alice Johnson",
            "Anna Smith",
            "Bob Williams",
            "Brian Davis",
            "Charlie Brown",
        ]);
        assert_eq!(index.total_records(), 5);
        let a = index.bucket(letter('A')).unwrap();
        assert_eq!((a.start_offset, a.count, a.byte_offset), (0, 2, 0));
        let b = index.bucket(letter('B')).unwrap();
        assert_eq!((b.start_offset, b.count, b.byte_offset), (2, 2, 25));
        let c = index.bucket(letter('C')).unwrap();
        assert_eq!((c.start_offset, c.count), (4, 1));
        assert!(index.bucket(letter('Z')).is_none());
    }

    #[test]
    fn test_skipped_lines() {
        let index = build(&["", "alice", "  ", "#comment", "Anna", "9lives", "bob", "\t"]);
        assert_eq!(index.total_records(), 3);
        assert_eq!(index.bucket(letter('A')).unwrap().count, 2);
        let b = index.bucket(letter('B')).unwrap();
        assert_eq!((b.start_offset, b.count), (2, 1));

        let stats = index.stats();
        assert_eq!(stats.lines_scanned, 8);
        assert_eq!(stats.blank_lines, 3);
        assert_eq!(stats.invalid_lines, 2);
        assert_eq!(stats.overwritten_buckets, 0);
    }

    #[test]
    fn test_case_folding_joins_groups() {
        let index = build(&["alice", "Anna", "ARNOLD", "bob"]);
        assert_eq!(index.bucket(letter('A')).unwrap().count, 3);
        assert_eq!(index.bucket_count(), 2);
    }

    #[test]
    fn test_non_contiguous_letter_keeps_last_group() {
        let index = build(&["Alice", "Anna", "Bob", "Amy", "Carl"]);
        assert_eq!(index.total_records(), 5);
        let a = index.bucket(letter('A')).unwrap();
        assert_eq!((a.start_offset, a.count), (3, 1));
        let bucket_sum: u64 = index.buckets().map(|b| b.count).sum();
        assert_eq!(bucket_sum, 3);
        assert_eq!(index.stats().overwritten_buckets, 1);
    }

    #[test]
    fn test_empty_source() {
        let index = build(&[]);
        assert_eq!(index.total_records(), 0);
        assert_eq!(index.bucket_count(), 0);
        assert!(index.list_buckets().is_empty());
    }

    #[test]
    fn test_buckets_are_contiguous() {
        let index = build(&["Ann", "Amy", "Bea", "Cid", "Cat", "Cy", "Dan", "Zed"]);
        let buckets: Vec<_> = index.buckets().copied().collect();
        for pair in buckets.windows(2) {
            assert_eq!(pair[0].end_offset(), pair[1].start_offset);
        }
        assert_eq!(buckets.last().unwrap().end_offset(), index.total_records());
    }
}
