use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::block::{ContentBlock, Relation};
use crate::error::GatewayError;

/// Raw access to the content API. Implementations only fetch; merging and
/// failure policy live in [`ContentGateway`](super::ContentGateway).
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// The page entity with its dynamic zone shallowly populated, or `None`
    /// when no page has this slug.
    async fn page(&self, slug: &str) -> Result<Option<Value>, GatewayError>;

    /// Dynamic-zone blocks of one kind with `relation` deep-populated.
    async fn page_relation(
        &self,
        slug: &str,
        relation: Relation,
    ) -> Result<Vec<ContentBlock>, GatewayError>;

    /// Therapy entries with their media, in any order.
    async fn therapies(&self, ids: &[i64]) -> Result<Vec<Value>, GatewayError>;

    /// Every FAQ entry, oldest first.
    async fn faqs(&self) -> Result<Vec<Value>, GatewayError>;

    /// The site-wide resource (navigation, footer, logos).
    async fn global(&self) -> Result<Value, GatewayError>;

    /// A single media-library file by id.
    async fn media_file(&self, id: i64) -> Result<Value, GatewayError>;

    /// Post a flat field map to the form endpoint.
    async fn submit_form(&self, fields: &Map<String, Value>) -> Result<Value, GatewayError>;
}
