//! Line classification and line scanning shared by the index build and the
//! range read.
//!
//! Both passes must agree exactly on which lines are records, otherwise the
//! ordinals stored in the index would point at the wrong lines. All record
//! decisions therefore go through [`classify_line`], and all line splitting
//! goes through [`LineScanner`].

use std::{
    borrow::Cow,
    io::{BufRead, BufReader},
    sync::Arc,
};

use namedex_io::{ReadAdapter, ReadAt};

use crate::letter::Letter;

/// Line scanner over a freshly opened source handle.
pub type SourceScanner = LineScanner<BufReader<ReadAdapter<Arc<dyn ReadAt>>>>;

/// Positions a buffered scanner at byte `position` of `source`.
///
/// The buffer size is clamped to the storage profile of the source.
pub fn open_scanner(source: Arc<dyn ReadAt>, position: u64, buffer_size: usize) -> SourceScanner {
    let capacity = source.storage_profile().clamp_io_size(buffer_size);
    let reader = BufReader::with_capacity(capacity, ReadAdapter::new_at_position(source, position));
    LineScanner::new(reader, position)
}

/// What a single source line contributes to the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty after trimming surrounding whitespace. Skipped.
    Blank,
    /// The first character has no letter bucket. Skipped with a warning.
    InvalidLeading(char),
    /// An accepted record: the trimmed text and its bucket.
    Record { letter: Letter, text: &'a str },
}

/// Classifies a raw source line (with or without its line terminator).
///
/// Surrounding whitespace and a byte-order mark are not part of the record.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let text = line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let Some(first) = text.chars().next() else {
        return LineKind::Blank;
    };
    match Letter::from_leading_char(first) {
        Some(letter) => LineKind::Record { letter, text },
        None => LineKind::InvalidLeading(first),
    }
}

/// A line produced by [`LineScanner`].
#[derive(Debug)]
pub struct ScannedLine<'a> {
    /// Byte position of the first byte of the line within the source.
    pub byte_offset: u64,
    /// Zero-based line number relative to where the scan started.
    pub line_number: u64,
    /// The line content, including the terminator. Invalid UTF-8 sequences
    /// are replaced with `U+FFFD`.
    pub text: Cow<'a, str>,
}

/// Splits a buffered byte stream into lines, tracking the byte position of
/// each line. `\n`, `\r\n` and a lone `\r` all end a line; the terminator
/// stays part of the line and is removed by the trimming in [`classify_line`].
///
/// The line buffer is reused between calls, so scanning allocates only for
/// lines longer than any seen before.
pub struct LineScanner<R> {
    reader: R,
    buf: Vec<u8>,
    position: u64,
    line_number: u64,
}

impl<R: BufRead> LineScanner<R> {
    /// Creates a scanner over `reader`, whose first byte sits at `position`
    /// within the source.
    pub fn new(reader: R, position: u64) -> LineScanner<R> {
        LineScanner {
            reader,
            buf: Vec::with_capacity(256),
            position,
            line_number: 0,
        }
    }

    /// Reads the next line, or returns `None` at the end of the stream.
    pub fn next_line(&mut self) -> std::io::Result<Option<ScannedLine<'_>>> {
        self.buf.clear();
        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                break;
            }
            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(i) => {
                    let terminator = available[i];
                    self.buf.extend_from_slice(&available[..=i]);
                    self.reader.consume(i + 1);
                    if terminator == b'\r' {
                        // The `\n` of a CRLF pair may only arrive with the next refill.
                        if self.reader.fill_buf()?.first() == Some(&b'\n') {
                            self.buf.push(b'\n');
                            self.reader.consume(1);
                        }
                    }
                    break;
                }
                None => {
                    let n = available.len();
                    self.buf.extend_from_slice(available);
                    self.reader.consume(n);
                }
            }
        }
        if self.buf.is_empty() {
            return Ok(None);
        }

        let byte_offset = self.position;
        let line_number = self.line_number;
        self.position += self.buf.len() as u64;
        self.line_number += 1;
        Ok(Some(ScannedLine {
            byte_offset,
            line_number,
            text: String::from_utf8_lossy(&self.buf),
        }))
    }

    /// Byte position just past the last line returned.
    pub fn position(&self) -> u64 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::{LineKind, LineScanner, classify_line};
    use crate::letter::Letter;

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line(""), LineKind::Blank);
        assert_eq!(classify_line("   \t\r\n"), LineKind::Blank);
        assert_eq!(classify_line("42nd Street\n"), LineKind::InvalidLeading('4'));
        assert_eq!(classify_line(" _x"), LineKind::InvalidLeading('_'));
        assert_eq!(
            classify_line("  alice smith \r\n"),
            LineKind::Record {
                letter: Letter::new('A').unwrap(),
                text: "alice smith"
            }
        );
    }

    #[test]
    fn test_line_scanner_positions() {
        let data: &[u8] = b"Alice\r\n\nBob\nCarol";
        let mut scanner = LineScanner::new(data, 100);

        let line = scanner.next_line().unwrap().unwrap();
        assert_eq!((line.byte_offset, line.line_number), (100, 0));
        assert_eq!(line.text, "Alice\r\n");

        let line = scanner.next_line().unwrap().unwrap();
        assert_eq!((line.byte_offset, line.line_number), (107, 1));
        assert_eq!(classify_line(&line.text), LineKind::Blank);

        let line = scanner.next_line().unwrap().unwrap();
        assert_eq!(line.byte_offset, 108);
        assert_eq!(line.text, "Bob\n");

        let line = scanner.next_line().unwrap().unwrap();
        assert_eq!(line.byte_offset, 112);
        assert_eq!(line.text, "Carol");

        assert!(scanner.next_line().unwrap().is_none());
        assert_eq!(scanner.position(), 117);
    }

    #[test]
    fn test_line_scanner_lone_cr() {
        let data: &[u8] = b"Alice\rAnna\r\rBob\r";
        let mut scanner = LineScanner::new(data, 0);
        let mut lines = Vec::new();
        while let Some(line) = scanner.next_line().unwrap() {
            lines.push((line.byte_offset, line.text.into_owned()));
        }
        assert_eq!(
            lines,
            [
                (0, "Alice\r".to_string()),
                (6, "Anna\r".to_string()),
                (11, "\r".to_string()),
                (12, "Bob\r".to_string()),
            ]
        );
        assert_eq!(scanner.position(), 16);
    }

    #[test]
    fn test_line_scanner_crlf_across_refill() {
        // A 6-byte buffer ends right after the `\r` of the first line.
        let data: &[u8] = b"Alice\r\nBob\r\nCarol";
        let reader = std::io::BufReader::with_capacity(6, data);
        let mut scanner = LineScanner::new(reader, 0);

        let line = scanner.next_line().unwrap().unwrap();
        assert_eq!((line.byte_offset, line.line_number), (0, 0));
        assert_eq!(line.text, "Alice\r\n");

        let line = scanner.next_line().unwrap().unwrap();
        assert_eq!((line.byte_offset, line.line_number), (7, 1));
        assert_eq!(line.text, "Bob\r\n");

        let line = scanner.next_line().unwrap().unwrap();
        assert_eq!((line.byte_offset, line.line_number), (12, 2));
        assert_eq!(line.text, "Carol");
        assert!(scanner.next_line().unwrap().is_none());
    }

    #[test]
    fn test_classify_byte_order_mark() {
        assert_eq!(
            classify_line("\u{feff}Alice\n"),
            LineKind::Record {
                letter: Letter::new('A').unwrap(),
                text: "Alice"
            }
        );
        assert_eq!(classify_line("\u{feff}\r\n"), LineKind::Blank);
    }

    #[test]
    fn test_line_scanner_invalid_utf8() {
        let data: &[u8] = b"Al\xffce\nBob\n";
        let mut scanner = LineScanner::new(data, 0);
        let line = scanner.next_line().unwrap().unwrap();
        assert_eq!(line.text, "Al\u{fffd}ce\n");
        assert!(matches!(
            classify_line(&line.text),
            LineKind::Record { .. }
        ));
        assert_eq!(scanner.next_line().unwrap().unwrap().byte_offset, 6);
    }
}
