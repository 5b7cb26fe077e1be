#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # csv2json-stream

 Streams a CSV file and incrementally re-serializes its records as a JSON
 array on disk, without holding the whole file in memory.

 ## Core concepts

 Three stages compose into a pull pipeline, each consuming the previous
 stage's output lazily:

 - **[`LineSplitter`](stream::line_splitter::LineSplitter):** consumes raw
   text chunks and produces complete logical lines, retaining an incomplete
   trailing fragment across chunk boundaries.
 - **[`RecordParser`](record::record_parser::RecordParser):** consumes the
   line sequence; the first line establishes the header row, every
   subsequent line is split into fields (honoring quoted fields that may
   contain the delimiter) and zipped with the headers into a key-value
   record with best-effort value coercion.
 - **[`JsonArrayWriter`](json::array_writer::JsonArrayWriter):** consumes
   the record sequence and writes each record as pretty-printed JSON,
   wrapping the whole sequence in `[` … `]` incrementally.

 [`convert_csv_to_json`] wires the stages over a file pair; a
 [`ConverterBuilder`] exposes the knobs (delimiter, blank-line suppression,
 pretty printing, read chunk size).

 ## Getting started

```
use csv2json_stream::convert_csv_to_json;
use std::{env::temp_dir, fs};

let input = temp_dir().join("cars.csv");
let output = temp_dir().join("cars.json");
fs::write(&input, "year,make\n1967,Ford\n1995,Peugeot").unwrap();

let summary = convert_csv_to_json(&input, &output).unwrap();
assert_eq!(summary.record_count, 2);

let json = fs::read_to_string(&output).unwrap();
assert!(json.starts_with("[\n"));
assert!(json.contains("\"year\": 1967"));
```

 ## Error model

 Path validation failures ([`ConvertError::InvalidPath`],
 [`ConvertError::InvalidExtension`], [`ConvertError::InputNotFound`]) are
 detected before any I/O and never produce partial output. A failure while
 streaming leaves a truncated output file without the closing bracket; the
 caller must clean up or retry from scratch. A field value that does not
 parse as a structured literal is never an error, it simply stays a string.
 */

/// Orchestration of the conversion pipeline over a file pair
pub mod converter;

/// Error types for the conversion pipeline
pub mod error;

/// Incremental JSON array output
pub mod json;

/// Line parsing into header-keyed records
pub mod record;

/// Chunked input splitting into logical lines
pub mod stream;

#[doc(inline)]
pub use converter::{ConversionSummary, Converter, ConverterBuilder, convert_csv_to_json};
#[doc(inline)]
pub use error::ConvertError;
#[doc(inline)]
pub use record::Record;
