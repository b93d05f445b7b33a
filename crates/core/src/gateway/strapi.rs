use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::block::{ContentBlock, Relation, SectionKind};
use crate::error::GatewayError;
use crate::lookup::flatten_entity;

use super::source::ContentSource;

const PAGES_PATH: &str = "/api/pages";
const THERAPIES_PATH: &str = "/api/therapies";
const FAQS_PATH: &str = "/api/faqs";
const GLOBAL_PATH: &str = "/api/global";
const FAQ_PAGE_SIZE: usize = 100;
const UPLOADS_PATH: &str = "/api/upload/files";

type Query = Vec<(String, String)>;

/// [`ContentSource`] backed by a Strapi REST API.
#[derive(Debug, Clone)]
pub struct StrapiClient {
    base_url: String,
    form_path: String,
    client: reqwest::Client,
}

impl StrapiClient {
    pub fn new(base_url: impl Into<String>, form_path: impl Into<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, base_url, form_path))
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        form_path: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            form_path: form_path.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json(&self, path: &str, mut query: Query) -> Result<Value, GatewayError> {
        query.push(("_t".into(), cache_buster()));
        let url = self.url(path);
        debug!(%url, params = query.len(), "content API request");

        let response = self.client.get(&url).query(&query).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Http { status, message });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn first_page(&self, query: Query) -> Result<Option<Value>, GatewayError> {
        let body = self.get_json(PAGES_PATH, query).await?;
        Ok(body
            .get("data")
            .and_then(Value::as_array)
            .and_then(|pages| pages.first())
            .map(flatten_entity))
    }
}

/// Millisecond timestamp defeating intermediary caches.
fn cache_buster() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
        .to_string()
}

fn slug_filter(slug: &str) -> (String, String) {
    ("filters[slug][$eq]".into(), slug.into())
}

/// Deep-populate key for a page relation.
fn relation_populate(relation: Relation) -> Option<String> {
    let (component, field) = match relation {
        Relation::SliderMedia => (SectionKind::Slider, "Slide"),
        Relation::TestimonialStories => (SectionKind::Testimonials, "survivor_story"),
        _ => return None,
    };
    Some(format!(
        "populate[dynamic_zone][on][{}][populate][{field}][populate]",
        component.tag()
    ))
}

fn global_query() -> Query {
    let mut query: Query = vec![("populate[navbar][populate]".into(), "true".into())];
    let footer = "populate[footer][populate]";
    for (i, field) in ["id", "url", "hash", "ext", "mime", "name"].iter().enumerate() {
        query.push((format!("{footer}[logo][fields][{i}]"), field.to_string()));
    }
    query.push((format!("{footer}[policy_links]"), "true".into()));
    query.push((format!("{footer}[footer_columns][populate][links]"), "true".into()));
    query.push((format!("{footer}[locations]"), "true".into()));
    for (i, field) in ["url", "name", "hash", "ext", "mime"].iter().enumerate() {
        query.push((
            format!("{footer}[social_media_links][populate][image][fields][{i}]"),
            field.to_string(),
        ));
    }
    query.push((format!("{footer}[social_media_links][populate][link]"), "true".into()));
    query.push((format!("{footer}[cta]"), "true".into()));
    query
}

fn faq_query() -> Query {
    vec![
        ("pagination[pageSize]".into(), FAQ_PAGE_SIZE.to_string()),
        ("sort[0]".into(), "id:asc".into()),
    ]
}

#[async_trait]
impl ContentSource for StrapiClient {
    async fn page(&self, slug: &str) -> Result<Option<Value>, GatewayError> {
        self.first_page(vec![
            slug_filter(slug),
            ("populate[dynamic_zone][populate]".into(), "*".into()),
            ("populate[seo][populate]".into(), "*".into()),
        ])
        .await
    }

    async fn page_relation(
        &self,
        slug: &str,
        relation: Relation,
    ) -> Result<Vec<ContentBlock>, GatewayError> {
        let (Some(populate), Some(kind)) = (relation_populate(relation), relation.section()) else {
            return Ok(Vec::new());
        };
        let page = self
            .first_page(vec![slug_filter(slug), (populate, "*".into())])
            .await?;
        let blocks = page
            .as_ref()
            .and_then(|p| p.get("dynamic_zone"))
            .map(ContentBlock::list_from_value)
            .unwrap_or_default();
        Ok(blocks.into_iter().filter(|b| b.kind() == Some(kind)).collect())
    }

    async fn therapies(&self, ids: &[i64]) -> Result<Vec<Value>, GatewayError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut query: Query = ids
            .iter()
            .map(|id| ("filters[id][$in]".to_string(), id.to_string()))
            .collect();
        query.push(("populate".into(), "*".into()));
        let body = self.get_json(THERAPIES_PATH, query).await?;
        match body.get("data") {
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => Err(GatewayError::Decode(format!("therapies: expected a list, got {other}"))),
        }
    }

    async fn faqs(&self) -> Result<Vec<Value>, GatewayError> {
        let body = self.get_json(FAQS_PATH, faq_query()).await?;
        match body.get("data") {
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => Err(GatewayError::Decode(format!("faqs: expected a list, got {other}"))),
        }
    }

    async fn global(&self) -> Result<Value, GatewayError> {
        let body = self.get_json(GLOBAL_PATH, global_query()).await?;
        Ok(body.get("data").map(flatten_entity).unwrap_or(Value::Null))
    }

    async fn media_file(&self, id: i64) -> Result<Value, GatewayError> {
        self.get_json(&format!("{UPLOADS_PATH}/{id}"), Vec::new()).await
    }

    async fn submit_form(&self, fields: &Map<String, Value>) -> Result<Value, GatewayError> {
        let url = self.url(&self.form_path);
        debug!(%url, fields = fields.len(), "submitting form");

        let response = self
            .client
            .post(&url)
            .json(&json!({ "data": fields }))
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Http { status, message });
        }
        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_populate_keys() {
        assert_eq!(
            relation_populate(Relation::SliderMedia).as_deref(),
            Some("populate[dynamic_zone][on][dynamic-zone.slider-section][populate][Slide][populate]")
        );
        assert_eq!(
            relation_populate(Relation::TestimonialStories).as_deref(),
            Some("populate[dynamic_zone][on][dynamic-zone.testimonial-slider][populate][survivor_story][populate]")
        );
        assert_eq!(relation_populate(Relation::NavbarLogo), None);
    }

    #[test]
    fn global_query_populates_footer_logo() {
        let query = global_query();
        assert!(query.contains(&(
            "populate[footer][populate][logo][fields][1]".to_string(),
            "url".to_string()
        )));
        assert_eq!(query[0], ("populate[navbar][populate]".to_string(), "true".to_string()));
    }

    #[test]
    fn faq_query_pages_in_id_order() {
        let query = faq_query();
        assert!(query.contains(&("sort[0]".to_string(), "id:asc".to_string())));
        assert!(query.contains(&("pagination[pageSize]".to_string(), "100".to_string())));
    }

    #[test]
    fn base_url_is_normalised() {
        let client = StrapiClient::with_client(reqwest::Client::new(), "http://cms.local/", "/api/contact-submissions");
        assert_eq!(client.url("/api/pages"), "http://cms.local/api/pages");
        assert_eq!(client.base_url(), "http://cms.local");
    }
}
