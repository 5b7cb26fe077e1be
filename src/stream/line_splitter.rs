use std::io::Read;

use crate::error::ConvertError;

/// Splits a raw byte stream into complete logical lines.
///
/// The splitter reads fixed-size chunks from the underlying reader and
/// accumulates them in an internal buffer. Complete lines (terminated by
/// `\n`, with an optional preceding `\r`) are emitted as soon as they are
/// available; the trailing partial segment is retained across chunk
/// boundaries and flushed as a final line at end of input. An emitted line
/// therefore never spans a chunk boundary incompletely, regardless of how
/// the input is chunked.
///
/// Whitespace-only lines are suppressed by default, see
/// [`LineSplitterBuilder::skip_blank_lines`].
///
/// # Examples
///
/// ```
/// use csv2json_stream::stream::line_splitter::LineSplitterBuilder;
///
/// let data = "first\r\nsecond\nlast fragment";
/// let lines: Vec<String> = LineSplitterBuilder::new()
///     .from_reader(data.as_bytes())
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(lines, vec!["first", "second", "last fragment"]);
/// ```
pub struct LineSplitter<R> {
    reader: R,
    /// Reusable read buffer, one chunk per fill
    chunk: Box<[u8]>,
    /// Bytes not yet emitted, ending with the current partial line
    buffer: Vec<u8>,
    skip_blank_lines: bool,
    eof: bool,
}

impl<R: Read> LineSplitter<R> {
    fn new(reader: R, capacity: usize, skip_blank_lines: bool) -> Self {
        Self {
            reader,
            chunk: vec![0; capacity].into_boxed_slice(),
            buffer: Vec::new(),
            skip_blank_lines,
            eof: false,
        }
    }

    /// Takes the next complete line out of the buffer, without its
    /// terminator. Returns `None` when no full terminator is buffered yet.
    fn take_line(&mut self) -> Option<Vec<u8>> {
        let pos = self.buffer.iter().position(|&byte| byte == b'\n')?;
        let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(line)
    }
}

impl<R: Read> Iterator for LineSplitter<R> {
    type Item = Result<String, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = match self.take_line() {
                Some(line) => line,
                None if self.eof => {
                    if self.buffer.is_empty() {
                        return None;
                    }
                    // Unterminated trailing fragment, flushed as a final line
                    std::mem::take(&mut self.buffer)
                }
                None => match self.reader.read(&mut self.chunk) {
                    Ok(0) => {
                        self.eof = true;
                        continue;
                    }
                    Ok(count) => {
                        self.buffer.extend_from_slice(&self.chunk[..count]);
                        continue;
                    }
                    Err(error) => return Some(Err(ConvertError::Io(error))),
                },
            };

            match String::from_utf8(raw) {
                Ok(line) => {
                    if self.skip_blank_lines && line.trim().is_empty() {
                        continue;
                    }
                    return Some(Ok(line));
                }
                Err(error) => return Some(Err(ConvertError::Encoding(error))),
            }
        }
    }
}

/// A builder for configuring line splitting.
///
/// Default configuration:
/// - Read capacity: 8 KiB per chunk
/// - Blank lines: suppressed
pub struct LineSplitterBuilder {
    capacity: usize,
    skip_blank_lines: bool,
}

impl LineSplitterBuilder {
    pub fn new() -> Self {
        Self {
            capacity: 8 * 1024,
            skip_blank_lines: true,
        }
    }

    /// Sets the size of the chunks read from the underlying reader.
    ///
    /// Emitted lines are identical for any capacity; only the read pattern
    /// changes.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets whether whitespace-only lines are suppressed (default: true).
    pub fn skip_blank_lines(mut self, yes: bool) -> Self {
        self.skip_blank_lines = yes;
        self
    }

    /// Creates a `LineSplitter` over any source implementing `Read`.
    pub fn from_reader<R: Read>(self, rdr: R) -> LineSplitter<R> {
        LineSplitter::new(rdr, self.capacity, self.skip_blank_lines)
    }
}

impl Default for LineSplitterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
