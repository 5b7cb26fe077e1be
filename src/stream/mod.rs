/// Splits a raw byte stream into logical lines
pub mod line_splitter;
