use std::fmt;

use serde::{Deserialize, Serialize};

/// One step of an accessor path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Object member lookup.
    Key(String),
    /// Array element lookup.
    Index(usize),
}

/// A parsed accessor path, evaluated left to right against a JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPath {
    pub segments: Vec<Segment>,
}

impl AccessPath {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Path of a single top-level key.
    pub fn key(name: impl Into<String>) -> Self {
        Self::new(vec![Segment::Key(name.into())])
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(k) if i == 0 => write!(f, "{k}")?,
                Segment::Key(k) => write!(f, ".{k}")?,
                Segment::Index(n) => write!(f, "[{n}]")?,
            }
        }
        Ok(())
    }
}
