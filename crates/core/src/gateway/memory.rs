use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::block::{ContentBlock, Relation};
use crate::error::GatewayError;

use super::source::ContentSource;

/// In-memory [`ContentSource`] for tests and offline development.
///
/// Every call is recorded by operation name (`page`, `global`, `therapies`,
/// `faqs`, `media`, `submit`, or the relation name). Any of those names can be marked
/// as failing, in which case the call returns a 503.
#[derive(Debug, Default)]
pub struct MemorySource {
    pages: HashMap<String, Value>,
    relations: HashMap<(String, Relation), Vec<ContentBlock>>,
    therapies: Vec<Value>,
    faqs: Vec<Value>,
    global: Value,
    media: HashMap<i64, Value>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
    submissions: Mutex<Vec<Map<String, Value>>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, slug: &str, entity: Value) -> Self {
        self.pages.insert(slug.to_string(), entity);
        self
    }

    pub fn with_relation(mut self, slug: &str, relation: Relation, blocks: Vec<ContentBlock>) -> Self {
        self.relations.insert((slug.to_string(), relation), blocks);
        self
    }

    pub fn with_therapies(mut self, entries: Vec<Value>) -> Self {
        self.therapies = entries;
        self
    }

    pub fn with_faqs(mut self, entries: Vec<Value>) -> Self {
        self.faqs = entries;
        self
    }

    pub fn with_global(mut self, global: Value) -> Self {
        self.global = global;
        self
    }

    pub fn with_media(mut self, id: i64, file: Value) -> Self {
        self.media.insert(id, file);
        self
    }

    pub fn failing(mut self, operation: &str) -> Self {
        self.failing.insert(operation.to_string());
        self
    }

    /// Operation names in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn submissions(&self) -> Vec<Map<String, Value>> {
        self.submissions.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    fn record(&self, operation: &str) -> Result<(), GatewayError> {
        self.calls
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(operation.to_string());
        if self.failing.contains(operation) {
            return Err(GatewayError::Http {
                status: 503,
                message: format!("{operation} unavailable"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn page(&self, slug: &str) -> Result<Option<Value>, GatewayError> {
        self.record("page")?;
        Ok(self.pages.get(slug).cloned())
    }

    async fn page_relation(
        &self,
        slug: &str,
        relation: Relation,
    ) -> Result<Vec<ContentBlock>, GatewayError> {
        self.record(relation.as_str())?;
        Ok(self
            .relations
            .get(&(slug.to_string(), relation))
            .cloned()
            .unwrap_or_default())
    }

    async fn therapies(&self, ids: &[i64]) -> Result<Vec<Value>, GatewayError> {
        self.record("therapies")?;
        Ok(self
            .therapies
            .iter()
            .filter(|t| t.get("id").and_then(Value::as_i64).is_some_and(|id| ids.contains(&id)))
            .cloned()
            .collect())
    }

    async fn faqs(&self) -> Result<Vec<Value>, GatewayError> {
        self.record("faqs")?;
        Ok(self.faqs.clone())
    }

    async fn global(&self) -> Result<Value, GatewayError> {
        self.record("global")?;
        Ok(self.global.clone())
    }

    async fn media_file(&self, id: i64) -> Result<Value, GatewayError> {
        self.record("media")?;
        self.media
            .get(&id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(format!("media file {id}")))
    }

    async fn submit_form(&self, fields: &Map<String, Value>) -> Result<Value, GatewayError> {
        self.record("submit")?;
        self.submissions
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(fields.clone());
        Ok(Value::Object(fields.clone()))
    }
}
