use thiserror::Error;

#[derive(Error, Debug)]
/// Conversion error
pub enum ConvertError {
    /// An empty path was given for the input or output file.
    #[error("invalid or missing {0} file path")]
    InvalidPath(&'static str),

    /// The path does not carry the expected extension. Detected before any
    /// I/O begins, so no partial output exists on this path.
    #[error("invalid file extension for {path}: required extension is {expected}")]
    InvalidExtension {
        path: String,
        expected: &'static str,
    },

    /// The input file does not exist. Detected before the output file is
    /// created or truncated.
    #[error("CSV file {0} does not exist")]
    InputNotFound(String),

    /// A read or write failed mid-stream. The output file may be left in a
    /// truncated, invalid state.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A completed input line is not valid UTF-8.
    #[error("invalid UTF-8 in input: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// A record could not be serialized to JSON.
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
