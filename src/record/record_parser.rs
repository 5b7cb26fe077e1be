use crate::error::ConvertError;

use super::{
    Record,
    coerce::{coerce_value, header_name, split_fields},
};

/// Parses a sequence of lines into header-keyed records.
///
/// The first line consumed establishes the header row and is never emitted
/// as a record; every subsequent line is split into fields (honoring quoted
/// fields that may contain the delimiter), coerced and zipped with the
/// header names by position. Rows with extra fields drop the excess, rows
/// with missing fields leave the trailing header keys absent.
///
/// Header state is owned by the parser instance, so concurrent conversions
/// each carry their own headers.
///
/// # Examples
///
/// ```
/// use csv2json_stream::record::record_parser::RecordParserBuilder;
/// use serde_json::json;
///
/// let lines = ["name,age", "Alice,30"]
///     .into_iter()
///     .map(|line| Ok(line.to_string()));
///
/// let records: Vec<_> = RecordParserBuilder::new()
///     .from_lines(lines)
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0]["name"], json!("Alice"));
/// assert_eq!(records[0]["age"], json!(30));
/// ```
pub struct RecordParser<I> {
    lines: I,
    delimiter: char,
    headers: Option<Vec<String>>,
}

impl<I> RecordParser<I> {
    /// The header row, once the first line has been consumed.
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }
}

impl<I> Iterator for RecordParser<I>
where
    I: Iterator<Item = Result<String, ConvertError>>,
{
    type Item = Result<Record, ConvertError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(error) => return Some(Err(error)),
            };

            let fields = split_fields(&line, self.delimiter);

            match &self.headers {
                None => {
                    self.headers = Some(fields.iter().map(|field| header_name(field)).collect());
                }
                Some(headers) => {
                    let mut record = Record::new();
                    // Positional zip: extra fields are dropped, missing
                    // header keys stay absent rather than null.
                    for (name, field) in headers.iter().zip(&fields) {
                        record.insert(name.clone(), coerce_value(field));
                    }
                    return Some(Ok(record));
                }
            }
        }
    }
}

/// A builder for configuring record parsing.
///
/// Default delimiter: comma (`,`).
pub struct RecordParserBuilder {
    delimiter: char,
}

impl RecordParserBuilder {
    pub fn new() -> Self {
        Self { delimiter: ',' }
    }

    /// Sets the field delimiter character.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Creates a `RecordParser` over a line iterator, typically a
    /// [`LineSplitter`](crate::stream::line_splitter::LineSplitter).
    pub fn from_lines<I>(self, lines: I) -> RecordParser<I>
    where
        I: Iterator<Item = Result<String, ConvertError>>,
    {
        RecordParser {
            lines,
            delimiter: self.delimiter,
            headers: None,
        }
    }
}

impl Default for RecordParserBuilder {
    fn default() -> Self {
        Self::new()
    }
}
