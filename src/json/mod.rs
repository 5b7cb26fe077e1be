/// Incremental JSON array writer
pub mod array_writer;
