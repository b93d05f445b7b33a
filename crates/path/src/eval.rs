// Accessor-path evaluation against loosely typed CMS payloads.

use serde_json::Value;

use crate::ast::{AccessPath, Segment};
use crate::parser::parse;

impl AccessPath {
    /// Walk the path through `value`. Any missing key, out-of-range index or
    /// type mismatch yields `None`.
    pub fn eval<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(value, |current, segment| step(current, segment))
    }
}

fn step<'a>(value: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match (value, segment) {
        (Value::Object(map), Segment::Key(key)) => map.get(key),
        (Value::Array(items), Segment::Index(i)) => items.get(*i),
        _ => None,
    }
}

/// Parse and evaluate `path` in one go. A malformed path never matches.
pub fn get<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    match parse(path) {
        Ok(parsed) => parsed.eval(value),
        Err(err) => {
            tracing::debug!(path, error = %err, "ignoring malformed accessor path");
            None
        }
    }
}
