use serde_json::Value;

/// Splits a line on `delimiter`, treating double-quoted spans as atomic.
///
/// The scan tracks quote parity: a delimiter only ends a field when an even
/// number of double quotes has been seen, so `"a,b"` stays one field. A
/// doubled quote toggles parity twice and leaves it unchanged, which keeps
/// escaped quotes inside a quoted span from breaking the split. Quote
/// characters are kept in the field; unquoting happens during coercion.
pub fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
            current.push(ch);
        } else if ch == delimiter && !in_quotes {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);

    fields
}

/// Strips one pair of enclosing double quotes and collapses doubled interior
/// quotes. Returns `None` when the value is not quote-enclosed.
fn unquote(value: &str) -> Option<String> {
    let inner = value.strip_prefix('"')?.strip_suffix('"')?;
    Some(inner.replace("\"\"", "\""))
}

/// Best-effort conversion of a raw field into a JSON value.
///
/// The field is trimmed, unquoted if quote-enclosed, then handed to the JSON
/// parser. Anything that parses as a structured literal (number, boolean,
/// null, object, array, quoted string) becomes that value; a parse failure
/// is not an error, the field stays a plain string.
pub fn coerce_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    let unquoted = match unquote(trimmed) {
        Some(inner) => inner,
        None => trimmed.to_string(),
    };

    match serde_json::from_str(&unquoted) {
        Ok(value) => value,
        Err(_) => Value::String(unquoted),
    }
}

/// Derives a header name from a raw first-line field: trimmed, with one
/// pair of enclosing double quotes stripped.
pub fn header_name(raw: &str) -> String {
    let trimmed = raw.trim();
    match unquote(trimmed) {
        Some(inner) => inner,
        None => trimmed.to_string(),
    }
}
