//! Remote content gateway.
//!
//! One primary query fetches a page with its dynamic zone shallowly
//! populated. Relations that query leaves as bare references (slider media,
//! testimonial stories, therapy images) are then fetched concurrently and
//! folded back in. A failed supplementary query never fails the page: the
//! affected blocks keep their un-enriched fields and the relation is
//! recorded in [`PagePayload::degraded`].

pub mod memory;
pub mod merge;
pub mod source;
pub mod strapi;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::block::{ContentBlock, GlobalPayload, PagePayload, Relation, SectionKind};
use crate::error::GatewayError;
use crate::form::FormSubmitter;
use crate::lookup::flatten_entity;

pub use memory::MemorySource;
pub use source::ContentSource;
pub use strapi::StrapiClient;

pub const HOME_SLUG: &str = "home";

#[derive(Clone)]
pub struct ContentGateway {
    source: Arc<dyn ContentSource>,
}

impl std::fmt::Debug for ContentGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentGateway").finish_non_exhaustive()
    }
}

impl ContentGateway {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<dyn ContentSource> {
        &self.source
    }

    /// Fetch a page and enrich it.
    pub async fn fetch_page(&self, slug: &str) -> Result<PagePayload, GatewayError> {
        let entity = self
            .source
            .page(slug)
            .await?
            .ok_or_else(|| GatewayError::NotFound(slug.to_string()))?;

        let mut page = parse_page(slug, &entity);
        debug!(slug, blocks = page.blocks.len(), "page fetched");
        self.enrich(&mut page).await;
        Ok(page)
    }

    async fn enrich(&self, page: &mut PagePayload) {
        let slug = page.slug.clone();
        let has = |kind: SectionKind| page.blocks.iter().any(|b| b.kind() == Some(kind));
        let wants_slides = has(SectionKind::Slider);
        let wants_stories = has(SectionKind::Testimonials);
        let ids = merge::therapy_ids(&page.blocks);

        let slides = async {
            if wants_slides {
                Some(self.source.page_relation(&slug, Relation::SliderMedia).await)
            } else {
                None
            }
        };
        let stories = async {
            if wants_stories {
                Some(self.source.page_relation(&slug, Relation::TestimonialStories).await)
            } else {
                None
            }
        };
        let therapies = async {
            if ids.is_empty() {
                None
            } else {
                Some(self.source.therapies(&ids).await)
            }
        };
        let (slides, stories, therapies) = tokio::join!(slides, stories, therapies);

        let mut blocks = std::mem::take(&mut page.blocks);
        for (relation, outcome) in [(Relation::SliderMedia, slides), (Relation::TestimonialStories, stories)] {
            let Some(kind) = relation.section() else {
                continue;
            };
            match outcome {
                Some(Ok(enriched)) => blocks = merge::replace_blocks(blocks, kind, &enriched),
                Some(Err(err)) => {
                    warn!(slug = %slug, %relation, error = %err, "supplementary query failed");
                    page.degraded.push(relation);
                }
                None => {}
            }
        }
        match therapies {
            Some(Ok(entries)) => blocks = merge::merge_therapies(blocks, &merge::index_therapies(entries)),
            Some(Err(err)) => {
                warn!(slug = %slug, relation = %Relation::TherapyImages, error = %err, "supplementary query failed");
                page.degraded.push(Relation::TherapyImages);
            }
            None => {}
        }
        page.blocks = blocks;
    }

    /// FAQ entries with `attributes` envelopes flattened.
    pub async fn fetch_faqs(&self) -> Result<Vec<Value>, GatewayError> {
        let entries = self.source.faqs().await?;
        debug!(count = entries.len(), "faqs fetched");
        Ok(entries.iter().map(flatten_entity).collect())
    }

    /// Fetch the home page and the site-wide resource together. Either may
    /// fail on its own; only when both fail is the result an error.
    pub async fn fetch_global(&self) -> Result<GlobalPayload, GatewayError> {
        let (home, global) = tokio::join!(self.fetch_page(HOME_SLUG), self.source.global());

        let (home, global) = match (home, global) {
            (Err(home_err), Err(global_err)) => {
                warn!(home = %home_err, global = %global_err, "global content unavailable");
                return Err(global_err);
            }
            (home, global) => {
                let home = home
                    .map_err(|err| warn!(slug = HOME_SLUG, error = %err, "home page unavailable"))
                    .ok();
                let global = global
                    .map_err(|err| warn!(error = %err, "global resource unavailable"))
                    .ok();
                (home, global)
            }
        };

        let global = global.map(|g| flatten_entity(&g)).unwrap_or(Value::Null);
        let mut payload = GlobalPayload {
            navbar: present(&global, "navbar"),
            footer: present(&global, "footer"),
            logo: present(&global, "logo"),
            seo: present(&global, "seo"),
            contact: present(&global, "contact"),
            social_media_links: present(&global, "social_media_links"),
            home,
            degraded: Vec::new(),
        };
        self.expand_logos(&mut payload).await;
        info!(
            home = payload.home.is_some(),
            navbar = payload.navbar.is_some(),
            footer = payload.footer.is_some(),
            "global content loaded"
        );
        Ok(payload)
    }

    /// Navbar and footer logos sometimes arrive as bare media-library ids.
    async fn expand_logos(&self, payload: &mut GlobalPayload) {
        let navbar_id = logo_id(payload.navbar.as_ref());
        let footer_id = logo_id(payload.footer.as_ref());

        let fetch = |id: Option<i64>| async move {
            match id {
                Some(id) => Some(self.source.media_file(id).await),
                None => None,
            }
        };
        let (navbar_file, footer_file) = tokio::join!(fetch(navbar_id), fetch(footer_id));

        for (relation, section, outcome) in [
            (Relation::NavbarLogo, payload.navbar.as_mut(), navbar_file),
            (Relation::FooterLogo, payload.footer.as_mut(), footer_file),
        ] {
            match (section, outcome) {
                (Some(Value::Object(section)), Some(Ok(file))) => {
                    section.insert("logo".into(), flatten_entity(&file));
                }
                (_, Some(Err(err))) => {
                    warn!(%relation, error = %err, "logo lookup failed");
                    payload.degraded.push(relation);
                }
                _ => {}
            }
        }
    }
}

fn present(source: &Value, key: &str) -> Option<Value> {
    source.get(key).filter(|v| !v.is_null()).cloned()
}

fn logo_id(section: Option<&Value>) -> Option<i64> {
    section?.get("logo")?.as_i64()
}

/// Turn a page entity into a payload. Dynamic-zone entries without a type
/// tag are dropped.
pub fn parse_page(slug: &str, entity: &Value) -> PagePayload {
    let entity = flatten_entity(entity);
    PagePayload {
        slug: entity
            .get("slug")
            .and_then(Value::as_str)
            .unwrap_or(slug)
            .to_string(),
        page_id: entity.get("id").and_then(Value::as_i64),
        blocks: entity
            .get("dynamic_zone")
            .map(ContentBlock::list_from_value)
            .unwrap_or_default(),
        seo: present(&entity, "seo"),
        degraded: Vec::new(),
    }
}

#[async_trait]
impl FormSubmitter for ContentGateway {
    async fn submit(&self, fields: &Map<String, Value>) -> Result<(), GatewayError> {
        self.source.submit_form(fields).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn gateway(source: MemorySource) -> (ContentGateway, Arc<MemorySource>) {
        let source = Arc::new(source);
        (ContentGateway::new(source.clone()), source)
    }

    fn showcase_page() -> Value {
        json!({
            "id": 7,
            "attributes": {
                "slug": "trials",
                "seo": {"metaTitle": "Trials"},
                "dynamic_zone": [
                    {"__component": "dynamic-zone.slider-section", "id": 1, "Slide": [{"title": "Plain"}]},
                    {"__component": "dynamic-zone.therapy-section", "id": 2, "Therapy": [{"id": 11, "name": "CAR-T"}]},
                    {"__component": "dynamic-zone.hero", "id": 3}
                ]
            }
        })
    }

    #[tokio::test]
    async fn missing_page_is_not_found() {
        let (gateway, _) = gateway(MemorySource::new());
        let err = gateway.fetch_page("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn page_is_enriched() {
        let rich = ContentBlock::new(
            "dynamic-zone.slider-section",
            json!({"id": 1, "Slide": [{"title": "Rich", "image": {"url": "/uploads/s.png"}}]}),
        );
        let (gateway, source) = gateway(
            MemorySource::new()
                .with_page("trials", showcase_page())
                .with_relation("trials", Relation::SliderMedia, vec![rich.clone()])
                .with_therapies(vec![json!({"id": 11, "attributes": {"featuredImage": {"url": "/uploads/t.png"}}})]),
        );

        let page = gateway.fetch_page("trials").await.unwrap();
        assert_eq!(page.page_id, Some(7));
        assert_eq!(page.blocks[0], rich);
        assert_eq!(page.blocks[1].fields["Therapy"][0]["featuredImage"]["url"], "/uploads/t.png");
        assert!(page.degraded.is_empty());

        let calls = source.calls();
        assert!(!calls.contains(&Relation::TestimonialStories.as_str().to_string()));
        assert!(calls.contains(&"therapies".to_string()));
    }

    #[tokio::test]
    async fn failed_relation_degrades_only_that_relation() {
        let (gateway, _) = gateway(
            MemorySource::new()
                .with_page("trials", showcase_page())
                .failing(Relation::SliderMedia.as_str())
                .with_therapies(vec![json!({"id": 11, "name": "CAR-T Cell Therapy"})]),
        );

        let page = gateway.fetch_page("trials").await.unwrap();
        assert_eq!(page.degraded, vec![Relation::SliderMedia]);
        assert_eq!(page.blocks[0].fields["Slide"][0]["title"], "Plain");
        assert_eq!(page.blocks[1].fields["Therapy"][0]["name"], "CAR-T Cell Therapy");
    }

    #[tokio::test]
    async fn global_survives_missing_home() {
        let (gateway, _) = gateway(
            MemorySource::new()
                .with_global(json!({"id": 1, "attributes": {"navbar": {"logo": 42}, "footer": {"logo": {"url": "/uploads/f.png"}}}}))
                .with_media(42, json!({"id": 42, "url": "/uploads/n.png"})),
        );
        let global = gateway.fetch_global().await.unwrap();
        assert!(global.home.is_none());
        assert_eq!(global.navbar.unwrap()["logo"]["url"], "/uploads/n.png");
        assert!(global.degraded.is_empty());
    }

    #[tokio::test]
    async fn failed_logo_lookup_is_recorded() {
        let (gateway, _) = gateway(
            MemorySource::new()
                .with_global(json!({"navbar": {"logo": 5}, "footer": {"logo": 6}}))
                .with_media(6, json!({"url": "/uploads/f.png"})),
        );
        let global = gateway.fetch_global().await.unwrap();
        assert_eq!(global.degraded, vec![Relation::NavbarLogo]);
        assert_eq!(global.navbar.unwrap()["logo"], 5);
    }

    #[tokio::test]
    async fn global_fails_only_when_everything_fails() {
        let (gateway, _) = gateway(MemorySource::new().failing("page").failing("global"));
        assert!(gateway.fetch_global().await.is_err());
    }

    #[tokio::test]
    async fn form_is_forwarded() {
        let (gateway, source) = gateway(MemorySource::new());
        let mut fields = Map::new();
        fields.insert("email".into(), json!("a@b.c"));
        gateway.submit(&fields).await.unwrap();
        assert_eq!(source.submissions(), vec![fields]);
    }

    #[tokio::test]
    async fn faqs_are_flattened() {
        let (gateway, _) = gateway(MemorySource::new().with_faqs(vec![
            json!({"id": 1, "attributes": {"question": "Q1", "answer": "A1", "category": "Hospitals"}}),
            json!({"id": 2, "question": "Q2", "answer": "A2"}),
        ]));
        let faqs = gateway.fetch_faqs().await.unwrap();
        assert_eq!(faqs[0], json!({"id": 1, "question": "Q1", "answer": "A1", "category": "Hospitals"}));
        assert_eq!(faqs[1]["question"], "Q2");
    }
}
