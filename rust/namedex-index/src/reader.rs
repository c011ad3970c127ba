//! # Range reader
//!
//! Extracts the records whose ordinals fall within a window `[start, end)`.
//!
//! The reader opens its own handle on the source, walks the lines with the
//! same record rule as the index build and stops as soon as the ordinal
//! reaches `end`; the handle is released on every exit path when the scanner
//! is dropped. Retrieving `k` records at ordinal `o` therefore visits at most
//! `o + k` records, and only `k` records when a [`SeekHint`] at the start of
//! the enclosing bucket is supplied.

use std::ops::Range;

use namedex_common::{CancellationToken, Result, error::Error};
use tracing::debug;

use crate::{
    bucket::LetterBucket,
    record::{LineKind, classify_line, open_scanner},
    source::RecordSource,
};

/// A known (byte position, ordinal) pair where a scan may start instead of
/// the beginning of the source. The byte position must be the start of the
/// line holding the record with that ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekHint {
    pub byte_offset: u64,
    pub ordinal: u64,
}

impl SeekHint {
    /// The beginning of the source.
    pub const START: SeekHint = SeekHint {
        byte_offset: 0,
        ordinal: 0,
    };
}

impl From<&LetterBucket> for SeekHint {
    fn from(bucket: &LetterBucket) -> SeekHint {
        SeekHint {
            byte_offset: bucket.byte_offset,
            ordinal: bucket.start_offset,
        }
    }
}

/// The outcome of one range read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeScan {
    /// Trimmed records in ordinal order.
    pub records: Vec<String>,
    /// Accepted records visited by the scan, including those before the window.
    pub records_scanned: u64,
    /// Bytes of line content consumed by the scan.
    pub bytes_consumed: u64,
}

/// Reads ordinal windows from a [`RecordSource`].
pub struct RangeReader<'a> {
    source: &'a dyn RecordSource,
    read_buffer_size: usize,
    cancellation: Option<&'a CancellationToken>,
}

impl<'a> RangeReader<'a> {
    pub fn new(source: &'a dyn RecordSource, read_buffer_size: usize) -> RangeReader<'a> {
        RangeReader {
            source,
            read_buffer_size,
            cancellation: None,
        }
    }

    /// Makes the scan stop with a `Cancelled` error once `token` is cancelled.
    pub fn with_cancellation(mut self, token: &'a CancellationToken) -> RangeReader<'a> {
        self.cancellation = Some(token);
        self
    }

    /// Reads the records with ordinals in `range`.
    ///
    /// The scan starts at `hint` when given and not past `range.start`,
    /// otherwise at the beginning of the source. An empty range performs no I/O.
    /// Fewer records than requested are returned if the source ends first.
    pub fn read_range(&self, range: Range<u64>, hint: Option<SeekHint>) -> Result<RangeScan> {
        let mut scan = RangeScan::default();
        if range.is_empty() {
            return Ok(scan);
        }

        let hint = hint
            .filter(|hint| hint.ordinal <= range.start)
            .unwrap_or(SeekHint::START);
        let read_at = self
            .source
            .open()
            .map_err(|e| Error::read(self.source.name(), e))?;
        let mut scanner = open_scanner(read_at, hint.byte_offset, self.read_buffer_size);

        let mut ordinal = hint.ordinal;
        while ordinal < range.end {
            if self.is_cancelled() {
                debug!(
                    source = self.source.name(),
                    ordinal,
                    "range read cancelled"
                );
                return Err(Error::cancelled("range read"));
            }
            let Some(line) = scanner
                .next_line()
                .map_err(|e| Error::read(self.source.name(), e))?
            else {
                break;
            };
            if let LineKind::Record { text, .. } = classify_line(&line.text) {
                if ordinal >= range.start {
                    scan.records.push(text.to_string());
                }
                scan.records_scanned += 1;
                ordinal += 1;
            }
        }

        scan.bytes_consumed = scanner.position() - hint.byte_offset;
        debug!(
            source = self.source.name(),
            start = range.start,
            end = range.end,
            seek = hint.byte_offset,
            returned = scan.records.len(),
            scanned = scan.records_scanned,
            "range read"
        );
        Ok(scan)
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .is_some_and(CancellationToken::is_cancelled)
    }
}

#[cfg(test)]
mod tests {
    use namedex_common::{CancellationToken, error::ErrorKind};

    use super::{RangeReader, SeekHint};
    use crate::source::SharedSource;

    const NAMES: &str = "Alice\nAnna\n\nBob\n  \n#skip\nBrian\nCharlie\n";

    fn source() -> SharedSource {
        SharedSource::from_bytes("names", NAMES)
    }

    #[test]
    fn test_read_range_from_start() {
        let source = source();
        let reader = RangeReader::new(&source, 4096);

        let scan = reader.read_range(1..4, None).unwrap();
        assert_eq!(scan.records, vec!["Anna", "Bob", "Brian"]);
        assert_eq!(scan.records_scanned, 4);

        let scan = reader.read_range(4..10, None).unwrap();
        assert_eq!(scan.records, vec!["Charlie"]);
    }

    #[test]
    fn test_read_range_with_hint() {
        let source = source();
        let reader = RangeReader::new(&source, 4096);
        // "Bob" is ordinal 2 and starts at byte 12.
        let hint = SeekHint {
            byte_offset: 12,
            ordinal: 2,
        };
        let scan = reader.read_range(3..5, Some(hint)).unwrap();
        assert_eq!(scan.records, vec!["Brian", "Charlie"]);
        assert_eq!(scan.records_scanned, 3);

        let rescan = reader.read_range(3..5, None).unwrap();
        assert_eq!(rescan.records, scan.records);
        assert_eq!(rescan.records_scanned, 5);

        // A hint past the window start is ignored.
        let scan = reader.read_range(0..1, Some(hint)).unwrap();
        assert_eq!(scan.records, vec!["Alice"]);
    }

    #[test]
    fn test_empty_range() {
        let source = SharedSource::from_bytes("empty", "");
        let reader = RangeReader::new(&source, 4096);
        assert!(reader.read_range(3..3, None).unwrap().records.is_empty());
        assert!(reader.read_range(0..10, None).unwrap().records.is_empty());
    }

    #[test]
    fn test_cancelled_read() {
        let source = source();
        let token = CancellationToken::new();
        token.cancel();
        let reader = RangeReader::new(&source, 4096).with_cancellation(&token);
        let err = reader.read_range(0..2, None).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Cancelled { .. }));
    }
}
