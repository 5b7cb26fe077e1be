use std::{
    fs::File,
    path::Path,
    time::{Duration, Instant},
};

use log::{debug, error, info};

use crate::{
    error::ConvertError, json::array_writer::JsonArrayWriterBuilder,
    record::record_parser::RecordParserBuilder, stream::line_splitter::LineSplitterBuilder,
};

/// Outcome of a successful conversion.
pub struct ConversionSummary {
    pub record_count: usize,
    pub duration: Duration,
}

/// Streams a CSV file into a JSON array file.
///
/// The converter chains the three pipeline stages, line splitter, record
/// parser and array writer, as pull iterators: the write loop drives the
/// parser, which drives the splitter, so at most one record is in flight
/// and memory use stays constant per record.
///
/// Each call to [`convert`](Converter::convert) is an independent run with
/// its own header state, so concurrent conversions over distinct file pairs
/// are safe.
pub struct Converter {
    delimiter: char,
    skip_blank_lines: bool,
    pretty: bool,
    capacity: usize,
}

impl Converter {
    /// Converts the CSV file at `csv_path` into a JSON array file at
    /// `json_path`, returning when the output is fully written and closed.
    ///
    /// Paths are validated before any I/O: both must be non-empty and carry
    /// the `.csv` / `.json` extension (case-insensitive), and the input must
    /// exist. None of these failures create or touch the output file.
    ///
    /// A failure while streaming (read error, invalid UTF-8, write error)
    /// releases the output sink without writing the closing bracket and
    /// propagates the error; the output file is left truncated and invalid,
    /// and the caller must clean up or retry from scratch. No rollback or
    /// temp-file rename is attempted.
    pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        csv_path: P,
        json_path: Q,
    ) -> Result<ConversionSummary, ConvertError> {
        let start = Instant::now();
        let csv_path = csv_path.as_ref();
        let json_path = json_path.as_ref();

        check_path(csv_path, "CSV", ".csv")?;
        check_path(json_path, "JSON", ".json")?;

        if !csv_path.exists() {
            return Err(ConvertError::InputNotFound(
                csv_path.display().to_string(),
            ));
        }

        debug!(
            "converting {} to {}",
            csv_path.display(),
            json_path.display()
        );

        let input = File::open(csv_path)?;
        let lines = LineSplitterBuilder::new()
            .capacity(self.capacity)
            .skip_blank_lines(self.skip_blank_lines)
            .from_reader(input);
        let records = RecordParserBuilder::new()
            .delimiter(self.delimiter)
            .from_lines(lines);
        let mut writer = JsonArrayWriterBuilder::new()
            .pretty(self.pretty)
            .from_path(json_path)?;

        writer.open()?;

        let mut record_count = 0;
        for record in records {
            let result = match record {
                Ok(record) => writer.write(&record),
                Err(err) => Err(err),
            };

            match result {
                Ok(()) => record_count += 1,
                Err(err) => {
                    error!("error converting {}: {}", csv_path.display(), err);
                    // Release the sink; the closing bracket is deliberately
                    // not written on the error path.
                    let _ = writer.flush();
                    return Err(err);
                }
            }
        }

        writer.close()?;

        let duration = start.elapsed();
        info!(
            "CSV converted to JSON: {} records written to {}",
            record_count,
            json_path.display()
        );

        Ok(ConversionSummary {
            record_count,
            duration,
        })
    }
}

fn check_path(path: &Path, kind: &'static str, expected: &'static str) -> Result<(), ConvertError> {
    if path.as_os_str().is_empty() {
        return Err(ConvertError::InvalidPath(kind));
    }

    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(&expected[1..]));

    if !matches {
        return Err(ConvertError::InvalidExtension {
            path: path.display().to_string(),
            expected,
        });
    }

    Ok(())
}

/// A builder for configuring a [`Converter`].
///
/// Default configuration:
/// - Delimiter: comma (,)
/// - Blank lines: suppressed
/// - Output: pretty-printed, 2-space indent
/// - Read capacity: 8 KiB per chunk
pub struct ConverterBuilder {
    delimiter: char,
    skip_blank_lines: bool,
    pretty: bool,
    capacity: usize,
}

impl ConverterBuilder {
    pub fn new() -> Self {
        Self {
            delimiter: ',',
            skip_blank_lines: true,
            pretty: true,
            capacity: 8 * 1024,
        }
    }

    /// Sets the field delimiter character.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether whitespace-only input lines are suppressed.
    pub fn skip_blank_lines(mut self, yes: bool) -> Self {
        self.skip_blank_lines = yes;
        self
    }

    /// Sets whether output records are pretty-printed.
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Sets the size of the chunks read from the input file.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn build(self) -> Converter {
        Converter {
            delimiter: self.delimiter,
            skip_blank_lines: self.skip_blank_lines,
            pretty: self.pretty,
            capacity: self.capacity,
        }
    }
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a CSV file into a JSON array file with the default
/// configuration. See [`Converter::convert`].
pub fn convert_csv_to_json<P: AsRef<Path>, Q: AsRef<Path>>(
    csv_path: P,
    json_path: Q,
) -> Result<ConversionSummary, ConvertError> {
    ConverterBuilder::new().build().convert(csv_path, json_path)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::check_path;
    use crate::error::ConvertError;

    #[test]
    fn accepts_matching_extension_case_insensitively() {
        assert!(check_path(Path::new("data.csv"), "CSV", ".csv").is_ok());
        assert!(check_path(Path::new("DATA.CSV"), "CSV", ".csv").is_ok());
        assert!(check_path(Path::new("out.Json"), "JSON", ".json").is_ok());
    }

    #[test]
    fn rejects_empty_path() {
        let result = check_path(Path::new(""), "CSV", ".csv");
        assert!(matches!(result, Err(ConvertError::InvalidPath("CSV"))));
    }

    #[test]
    fn rejects_wrong_or_missing_extension() {
        let result = check_path(Path::new("data.txt"), "CSV", ".csv");
        assert!(matches!(
            result,
            Err(ConvertError::InvalidExtension { expected: ".csv", .. })
        ));

        let result = check_path(Path::new("data"), "JSON", ".json");
        assert!(matches!(result, Err(ConvertError::InvalidExtension { .. })));
    }
}
