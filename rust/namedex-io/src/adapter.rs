//! Sequential reading over a positional source.

use std::io::Read;

use crate::ReadAt;

/// Gives a [`ReadAt`] source its own cursor, making it a `Read` stream.
///
/// Every adapter is independent: several of them can walk the same shared
/// source at different positions. Dropping the adapter ends the scan.
pub struct ReadAdapter<R> {
    source: R,
    pos: u64,
    len: Option<u64>,
}

impl<R: ReadAt> ReadAdapter<R> {
    /// Starts the stream at byte `pos` of the source.
    pub fn new_at_position(source: R, pos: u64) -> Self {
        ReadAdapter {
            source,
            pos,
            len: None,
        }
    }

    pub fn position(&self) -> u64 {
        self.pos
    }

    fn len(&mut self) -> std::io::Result<u64> {
        match self.len {
            Some(len) => Ok(len),
            None => {
                let len = self.source.size()?;
                self.len = Some(len);
                Ok(len)
            }
        }
    }
}

impl<R: ReadAt> Read for ReadAdapter<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let len = self.len()?;
        let want = (buf.len() as u64).min(len.saturating_sub(self.pos));
        if want == 0 {
            return Ok(0);
        }
        let chunk = self.source.read_at(self.pos..self.pos + want)?;
        buf[..chunk.len()].copy_from_slice(&chunk);
        self.pos += chunk.len() as u64;
        Ok(chunk.len())
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Read};

    use bytes::Bytes;

    use super::ReadAdapter;

    #[test]
    fn test_lines_over_adapter() {
        let source = Bytes::from_static(b"Alice\nAnna\r\nBob\n");
        let reader = BufReader::new(ReadAdapter::new_at_position(source, 0));
        let lines = reader.lines().collect::<std::io::Result<Vec<_>>>().unwrap();
        assert_eq!(lines, ["Alice", "Anna", "Bob"]);
    }

    #[test]
    fn test_start_at_checkpoint() {
        let mut adapter = ReadAdapter::new_at_position(Bytes::from_static(b"Alice\nBob\n"), 6);
        let mut rest = String::new();
        adapter.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "Bob\n");
        assert_eq!(adapter.position(), 10);

        let mut past_end = ReadAdapter::new_at_position(Bytes::from_static(b"Alice"), 10);
        let mut buf = [0u8; 5];
        assert_eq!(past_end.read(&mut buf).unwrap(), 0);
        assert_eq!(past_end.position(), 10);
    }

    #[test]
    fn test_independent_cursors() {
        let source = Bytes::from_static(b"Alice\nBob\n");
        let mut first = ReadAdapter::new_at_position(source.clone(), 0);
        let mut second = ReadAdapter::new_at_position(source, 6);

        let mut buf = [0u8; 3];
        first.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"Ali");
        second.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"Bob");
        first.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"ce\n");
        assert_eq!((first.position(), second.position()), (6, 9));
    }
}
