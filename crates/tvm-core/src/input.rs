//! Line reading with an optional fixed read buffer.

use std::io::{self, BufRead};

/// Input line length policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineLimit {
    /// Lines of any length are read whole.
    #[default]
    Unbounded,
    /// Lines are read through a buffer of this many bytes, one of which is
    /// reserved for the terminator. The unread rest of a longer line comes
    /// back as the next line, with its own line number.
    Buffer(usize),
}

impl LineLimit {
    /// Forty-byte read buffer, as used by the classic C calculator.
    pub const COMPAT: Self = Self::Buffer(40);

    fn chunk_len(self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::Buffer(size) => Some(size.saturating_sub(1).max(1)),
        }
    }
}

/// Reads command lines from a buffered source.
///
/// Each returned line is cut at its first newline and at its first NUL byte;
/// carriage returns are kept. Invalid UTF-8 is replaced lossily.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    limit: LineLimit,
    buf: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    /// Creates a reader with the given line length policy.
    pub fn new(inner: R, limit: LineLimit) -> Self {
        Self {
            inner,
            limit,
            buf: Vec::new(),
        }
    }

    /// Reads the next line, or `None` at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        let read = match self.limit.chunk_len() {
            None => read_until_retrying(&mut self.inner, &mut self.buf)?,
            Some(max) => self.read_chunk(max)?,
        };
        if read == 0 {
            return Ok(None);
        }

        let end = self
            .buf
            .iter()
            .position(|&b| b == b'\n' || b == 0)
            .unwrap_or(self.buf.len());
        Ok(Some(String::from_utf8_lossy(&self.buf[..end]).into_owned()))
    }

    /// Reads at most `max` bytes, stopping after a newline.
    fn read_chunk(&mut self, max: usize) -> io::Result<usize> {
        while self.buf.len() < max {
            let available = match self.inner.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }

            let room = (max - self.buf.len()).min(available.len());
            let (take, newline) = match available[..room].iter().position(|&b| b == b'\n') {
                Some(pos) => (pos + 1, true),
                None => (room, false),
            };
            self.buf.extend_from_slice(&available[..take]);
            self.inner.consume(take);
            if newline {
                break;
            }
        }
        Ok(self.buf.len())
    }
}

fn read_until_retrying<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<usize> {
    loop {
        match reader.read_until(b'\n', buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn lines(input: &[u8], limit: LineLimit) -> Vec<String> {
        LineReader::new(Cursor::new(input.to_vec()), limit)
            .collect::<io::Result<_>>()
            .unwrap()
    }

    #[test]
    fn test_unbounded_lines() {
        assert_eq!(
            lines(b"set n 5\n\ncompute FV", LineLimit::Unbounded),
            ["set n 5", "", "compute FV"]
        );
    }

    #[test]
    fn test_carriage_return_kept() {
        assert_eq!(lines(b"clear\r\n", LineLimit::Unbounded), ["clear\r"]);
    }

    #[test]
    fn test_nul_terminates_line() {
        assert_eq!(lines(b"clear\0junk\nclear\n", LineLimit::Unbounded), ["clear", "clear"]);
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let got = lines(b"set \xff 1\n", LineLimit::Unbounded);
        assert_eq!(got, ["set \u{fffd} 1"]);
    }

    #[test]
    fn test_long_line_unbounded() {
        let long = format!("set PV {}\n", "1".repeat(100));
        assert_eq!(lines(long.as_bytes(), LineLimit::Unbounded).len(), 1);
    }

    #[test]
    fn test_buffer_splits_long_lines() {
        // 39 bytes fit; the newline of a 39-byte line becomes its own line.
        let exact = format!("{}\n", "a".repeat(39));
        assert_eq!(
            lines(exact.as_bytes(), LineLimit::COMPAT),
            ["a".repeat(39), String::new()]
        );

        let short = format!("{}\n", "b".repeat(38));
        assert_eq!(lines(short.as_bytes(), LineLimit::COMPAT), ["b".repeat(38)]);

        let long = format!("{}{}\nclear\n", "c".repeat(39), "d".repeat(5));
        assert_eq!(
            lines(long.as_bytes(), LineLimit::COMPAT),
            ["c".repeat(39), "d".repeat(5), "clear".to_string()]
        );
    }

    #[test]
    fn test_buffer_across_small_reads() {
        // A 4-byte BufReader forces many fill_buf calls per chunk.
        let input = format!("{}\nset n 1\n", "x".repeat(50));
        let reader = io::BufReader::with_capacity(4, Cursor::new(input.into_bytes()));
        let got: Vec<String> = LineReader::new(reader, LineLimit::COMPAT)
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(got, ["x".repeat(39), "x".repeat(11), "set n 1".to_string()]);
    }
}
