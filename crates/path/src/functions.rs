// Value coercions shared by every field lookup.
//
// Null, blank strings and empty arrays all count as "absent", so a candidate
// holding one of them never shadows a later candidate.

use serde_json::Value;

/// Whether a value counts as resolved.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !is_blank(s),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

/// Blank, or one of the stringified nulls the CMS occasionally leaks.
pub fn is_blank(s: &str) -> bool {
    let trimmed = s.trim();
    trimmed.is_empty() || trimmed == "null" || trimmed == "undefined"
}

/// Text content of a scalar. Numbers and booleans are rendered.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !is_blank(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numeric value with `parseFloat` leniency: `"39.9"` and `"39.9 N"` both
/// give 39.9, `"N 39.9"` gives nothing.
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s.trim()),
        _ => None,
    }
}

fn leading_number(s: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        match c {
            '-' | '+' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => seen_digit = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    s[..end].trim_end_matches('.').parse().ok()
}

/// Integer id, accepting numeric strings.
pub fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// List items, unwrapping a `{ "data": [...] }` relation envelope.
pub fn as_list(value: &Value) -> Option<&[Value]> {
    match value {
        Value::Array(items) if !items.is_empty() => Some(items.as_slice()),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) if !items.is_empty() => Some(items.as_slice()),
            _ => None,
        },
        _ => None,
    }
}
