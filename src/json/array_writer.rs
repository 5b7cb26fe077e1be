use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;

use crate::error::ConvertError;

/// Writes a sequence of items as a JSON array, incrementally.
///
/// [`open`](JsonArrayWriter::open) writes the opening bracket before the
/// first item, [`write`](JsonArrayWriter::write) appends one serialized item
/// preceded by a comma separator for every item after the first, and
/// [`close`](JsonArrayWriter::close) writes the closing bracket and flushes.
/// Items appear in the output in exactly the order they are written.
///
/// When the upstream sequence fails mid-stream, the caller is expected to
/// flush and drop the writer without calling `close`, leaving a truncated
/// artifact without the closing bracket.
pub struct JsonArrayWriter<W: Write> {
    stream: BufWriter<W>,
    pretty: bool,
    first_item: bool,
}

impl<W: Write> JsonArrayWriter<W> {
    fn new(inner: W, pretty: bool) -> Self {
        Self {
            stream: BufWriter::new(inner),
            pretty,
            first_item: true,
        }
    }

    /// Writes the array-opening bracket.
    pub fn open(&mut self) -> Result<(), ConvertError> {
        let separator: &[u8] = if self.pretty { b"[\n" } else { b"[" };
        self.stream.write_all(separator)?;
        Ok(())
    }

    /// Appends one item, preceded by a comma separator for every item after
    /// the first. Pretty mode serializes with a 2-space indent.
    pub fn write<T: Serialize>(&mut self, item: &T) -> Result<(), ConvertError> {
        if !self.first_item {
            let separator: &[u8] = if self.pretty { b",\n" } else { b"," };
            self.stream.write_all(separator)?;
        }

        let json = if self.pretty {
            serde_json::to_string_pretty(item)?
        } else {
            serde_json::to_string(item)?
        };
        self.stream.write_all(json.as_bytes())?;
        self.first_item = false;
        Ok(())
    }

    /// Flushes buffered output to the underlying sink.
    pub fn flush(&mut self) -> Result<(), ConvertError> {
        self.stream.flush()?;
        Ok(())
    }

    /// Writes the array-closing bracket and flushes. Consumes the writer, so
    /// nothing can be appended after the array is closed.
    pub fn close(mut self) -> Result<(), ConvertError> {
        let separator: &[u8] = if self.pretty { b"\n]" } else { b"]" };
        self.stream.write_all(separator)?;
        self.stream.flush()?;
        Ok(())
    }
}

/// A builder for configuring JSON array writing.
///
/// Pretty formatting (2-space indent, one record per block) is the default.
pub struct JsonArrayWriterBuilder {
    pretty: bool,
}

impl JsonArrayWriterBuilder {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Sets whether items are pretty-printed (default: true).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Creates a `JsonArrayWriter` over any sink implementing `Write`.
    pub fn from_writer<W: Write>(self, wtr: W) -> JsonArrayWriter<W> {
        JsonArrayWriter::new(wtr, self.pretty)
    }

    /// Creates a `JsonArrayWriter` writing to a file, created or truncated.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<JsonArrayWriter<File>, ConvertError> {
        let file = File::create(path)?;
        Ok(JsonArrayWriter::new(file, self.pretty))
    }
}

impl Default for JsonArrayWriterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
