/// Field splitting and best-effort value coercion helpers
pub mod coerce;

/// Turns lines into header-keyed records
pub mod record_parser;

/// One parsed CSV data row, keyed by header name.
///
/// Key order follows the header row (`serde_json` is built with
/// `preserve_order`), and the key set is always a subset of the header
/// names: short rows simply omit the trailing keys.
pub type Record = serde_json::Map<String, serde_json::Value>;
