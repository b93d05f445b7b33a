use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which content a store event concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentScope {
    Global,
    Page(String),
}

impl std::fmt::Display for ContentScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentScope::Global => f.write_str("global"),
            ContentScope::Page(slug) => write!(f, "page:{slug}"),
        }
    }
}

/// Emitted by the content store whenever a scope changes state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContentEvent {
    Loading { scope: ContentScope },
    Ready(ReadyEvent),
    Failed { scope: ContentScope, status: u16, message: String },
    Cleared { scope: ContentScope },
}

impl ContentEvent {
    pub fn scope(&self) -> &ContentScope {
        match self {
            ContentEvent::Loading { scope }
            | ContentEvent::Failed { scope, .. }
            | ContentEvent::Cleared { scope } => scope,
            ContentEvent::Ready(ready) => &ready.scope,
        }
    }

    /// Same as the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            ContentEvent::Loading { .. } => "loading",
            ContentEvent::Ready(_) => "ready",
            ContentEvent::Failed { .. } => "failed",
            ContentEvent::Cleared { .. } => "cleared",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyEvent {
    pub scope: ContentScope,
    pub blocks: usize,
    /// Supplementary relations that failed, by name.
    pub degraded: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_matches_the_type_tag() {
        let events = [
            ContentEvent::Loading { scope: ContentScope::Global },
            ContentEvent::Failed {
                scope: ContentScope::Page("faq".into()),
                status: 404,
                message: "missing".into(),
            },
            ContentEvent::Cleared { scope: ContentScope::Global },
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["type"], event.name());
        }
    }
}
