//! Candidate-path lookups over a content block.
//!
//! Each logical field is described by an ordered list of accessor paths.
//! The first path that holds a present value wins; an empty string counts
//! as absent.

use serde_json::Value;

use page_content_path::{as_bool, as_f64, as_list, as_text, get, is_present};

use crate::media::MediaResolver;

/// Items nested in an `attributes` envelope are read through it.
pub fn unwrap_attributes(item: &Value) -> &Value {
    match item.get("attributes") {
        Some(attrs @ Value::Object(_)) => attrs,
        _ => item,
    }
}

/// `{ id, attributes: {...} }` becomes `{ id, ... }`. Other values are cloned.
pub fn flatten_entity(entity: &Value) -> Value {
    match entity {
        Value::Object(obj) => match obj.get("attributes") {
            Some(Value::Object(attrs)) => {
                let mut flat = attrs.clone();
                if let Some(id) = obj.get("id") {
                    flat.insert("id".into(), id.clone());
                }
                Value::Object(flat)
            }
            _ => entity.clone(),
        },
        other => other.clone(),
    }
}

pub fn first_value<'a>(source: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|path| get(source, path))
        .find(|v| is_present(v))
}

pub fn first_text(source: &Value, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|path| get(source, path))
        .find_map(as_text)
}

/// Like [`first_text`], but flattens rich-text block arrays.
pub fn first_rich_text(source: &Value, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|path| get(source, path))
        .find_map(flatten_rich_text)
}

pub fn first_f64(source: &Value, candidates: &[&str]) -> Option<f64> {
    candidates
        .iter()
        .filter_map(|path| get(source, path))
        .find_map(as_f64)
}

pub fn first_bool(source: &Value, candidates: &[&str]) -> Option<bool> {
    candidates
        .iter()
        .filter_map(|path| get(source, path))
        .find_map(as_bool)
}

pub fn first_list<'a>(source: &'a Value, candidates: &[&str]) -> Option<&'a [Value]> {
    candidates
        .iter()
        .filter_map(|path| get(source, path))
        .find_map(as_list)
}

/// First candidate that resolves to a media URL.
pub fn first_media(source: &Value, candidates: &[&str], media: &MediaResolver) -> Option<String> {
    candidates
        .iter()
        .filter_map(|path| get(source, path))
        .find_map(|v| media.resolve(v))
}

/// Plain text of a rich-text value.
///
/// Accepts plain strings and block arrays of the form
/// `[{ "type": "paragraph", "children": [{ "type": "text", "text": "..." }] }]`.
/// Top-level blocks are separated by a blank line.
pub fn flatten_rich_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(_) => return as_text(value),
        Value::Array(blocks) => blocks
            .iter()
            .map(inline_text)
            .filter(|t| !t.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n\n"),
        Value::Object(_) => inline_text(value),
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn inline_text(node: &Value) -> String {
    match node {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            if let Some(Value::String(text)) = map.get("text") {
                return text.clone();
            }
            match map.get("children") {
                Some(Value::Array(children)) => {
                    let sep = match map.get("type").and_then(Value::as_str) {
                        Some("list") => "\n",
                        _ => "",
                    };
                    children.iter().map(inline_text).collect::<Vec<_>>().join(sep)
                }
                _ => String::new(),
            }
        }
        _ => String::new(),
    }
}
