//! Page orchestration: turn an ordered block list into resolved sections.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::block::{ContentBlock, PagePayload, SectionKind};
use crate::lookup::first_text;
use crate::resolve::{resolve_section, FetchState, ResolveContext, Section};
use crate::sections::*;

/// Tags the CMS emits that have no renderer here.
const UNRENDERED_TAGS: &[&str] = &["form_next_to_section", "featured"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionView {
    Hero(HeroView),
    Slider(SliderView),
    About(AboutView),
    Therapies(TherapiesView),
    Testimonials(TestimonialsView),
    VideoTestimonials(VideoTestimonialsView),
    Trials(TrialsView),
    GetInTouch(GetInTouchView),
    Location(LocationView),
    HowItWorks(HowItWorksView),
    Resources(ResourcesView),
    TrialsAbout(TrialsAboutView),
}

/// One rendered block, in page order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSection {
    pub kind: SectionKind,
    pub block_id: Option<i64>,
    pub view: SectionView,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoView {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

impl SeoView {
    pub fn from_value(seo: &Value) -> Option<Self> {
        let view = Self {
            meta_title: first_text(seo, &["metaTitle", "meta_title", "title"]),
            meta_description: first_text(seo, &["metaDescription", "meta_description", "description"]),
        };
        (view.meta_title.is_some() || view.meta_description.is_some()).then_some(view)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub slug: String,
    pub page_id: Option<i64>,
    pub seo: Option<SeoView>,
    pub sections: Vec<RenderedSection>,
}

impl PageView {
    pub fn build(payload: PagePayload, ctx: &ResolveContext) -> Self {
        let seo = payload.seo.as_ref().and_then(SeoView::from_value);
        let slug = payload.slug.clone();
        let page_id = payload.page_id;
        let sections = render_page(&FetchState::Ready(payload), ctx);
        Self {
            slug,
            page_id,
            seo,
            sections,
        }
    }
}

fn render_block<S: Section>(
    block: &ContentBlock,
    state: &FetchState<PagePayload>,
    ctx: &ResolveContext,
    wrap: fn(S::View) -> SectionView,
) -> Option<SectionView> {
    resolve_section::<S>(Some(block), state, ctx).map(wrap)
}

/// Renderer names accepted by [`render_named`].
pub const SECTION_NAMES: [&str; 12] = [
    "hero",
    "slider",
    "about",
    "therapies",
    "testimonials",
    "video-testimonials",
    "trials",
    "trials-about",
    "get-in-touch",
    "location",
    "how-it-works",
    "resources",
];

/// Resolve one renderer by name against the first matching block of the
/// page, or its defaults. `None` for an unknown name or an empty result.
pub fn render_named(name: &str, state: &FetchState<PagePayload>, ctx: &ResolveContext) -> Option<SectionView> {
    match name {
        "hero" => resolve_section::<Hero>(None, state, ctx).map(SectionView::Hero),
        "slider" => resolve_section::<Slider>(None, state, ctx).map(SectionView::Slider),
        "about" => resolve_section::<About>(None, state, ctx).map(SectionView::About),
        "therapies" => resolve_section::<Therapies>(None, state, ctx).map(SectionView::Therapies),
        "testimonials" => resolve_section::<Testimonials>(None, state, ctx).map(SectionView::Testimonials),
        "video-testimonials" => {
            resolve_section::<VideoTestimonials>(None, state, ctx).map(SectionView::VideoTestimonials)
        }
        "trials" => resolve_section::<Trials>(None, state, ctx).map(SectionView::Trials),
        "trials-about" => resolve_section::<TrialsAbout>(None, state, ctx).map(SectionView::TrialsAbout),
        "get-in-touch" => resolve_section::<GetInTouch>(None, state, ctx).map(SectionView::GetInTouch),
        "location" => resolve_section::<Location>(None, state, ctx).map(SectionView::Location),
        "how-it-works" => resolve_section::<HowItWorks>(None, state, ctx).map(SectionView::HowItWorks),
        "resources" => resolve_section::<Resources>(None, state, ctx).map(SectionView::Resources),
        _ => None,
    }
}

/// Resolve every block in order. Each block is the source for its own
/// renderer; blocks that resolve to nothing are left out without affecting
/// their neighbours.
pub fn render_page(state: &FetchState<PagePayload>, ctx: &ResolveContext) -> Vec<RenderedSection> {
    let Some(page) = state.ready() else {
        return Vec::new();
    };

    let mut sections = Vec::with_capacity(page.blocks.len());
    for block in &page.blocks {
        let Some(kind) = block.kind() else {
            let known = UNRENDERED_TAGS
                .iter()
                .any(|t| block.kind_tag.trim_start_matches("dynamic-zone.") == *t);
            debug!(tag = %block.kind_tag, known, "skipping block without renderer");
            continue;
        };

        let view = match kind {
            SectionKind::Hero => render_block::<Hero>(block, state, ctx, SectionView::Hero),
            SectionKind::Slider => render_block::<Slider>(block, state, ctx, SectionView::Slider),
            SectionKind::About | SectionKind::Statistics => {
                render_block::<About>(block, state, ctx, SectionView::About)
            }
            SectionKind::Therapies => render_block::<Therapies>(block, state, ctx, SectionView::Therapies),
            SectionKind::Testimonials => {
                render_block::<Testimonials>(block, state, ctx, SectionView::Testimonials)
            }
            SectionKind::VideoTestimonials => {
                render_block::<VideoTestimonials>(block, state, ctx, SectionView::VideoTestimonials)
            }
            SectionKind::Trials => render_block::<Trials>(block, state, ctx, SectionView::Trials),
            SectionKind::GetInTouch => render_block::<GetInTouch>(block, state, ctx, SectionView::GetInTouch),
            SectionKind::Location => render_block::<Location>(block, state, ctx, SectionView::Location),
            SectionKind::HowItWorks => render_block::<HowItWorks>(block, state, ctx, SectionView::HowItWorks),
            SectionKind::Resources => render_block::<Resources>(block, state, ctx, SectionView::Resources),
        };

        match view {
            Some(view) => sections.push(RenderedSection {
                kind,
                block_id: block.id,
                view,
            }),
            None => debug!(tag = %block.kind_tag, "section resolved to nothing"),
        }
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(blocks: Vec<ContentBlock>) -> PagePayload {
        PagePayload {
            slug: "cancer-treatment".into(),
            page_id: Some(12),
            blocks,
            seo: Some(json!({"metaTitle": "Cancer treatment abroad"})),
            degraded: Vec::new(),
        }
    }

    #[test]
    fn sections_follow_block_order() {
        let page = payload(vec![
            ContentBlock::new("dynamic-zone.get-in-touch", json!({"id": 1})),
            ContentBlock::new("dynamic-zone.featured", json!({"id": 2})),
            ContentBlock::new("dynamic-zone.hero", json!({"id": 3, "sub_heading": "Story"})),
            ContentBlock::new("dynamic-zone.unknown-widget", json!({"id": 4})),
            ContentBlock::new("dynamic-zone.statistics", json!({"id": 5})),
        ]);
        let sections = render_page(&FetchState::Ready(page), &ResolveContext::lenient(""));
        let kinds: Vec<_> = sections.iter().map(|s| (s.kind, s.block_id)).collect();
        assert_eq!(
            kinds,
            [
                (SectionKind::GetInTouch, Some(1)),
                (SectionKind::Hero, Some(3)),
                (SectionKind::Statistics, Some(5)),
            ]
        );
        assert!(matches!(sections[2].view, SectionView::About(_)));
    }

    #[test]
    fn one_empty_section_does_not_blank_the_page() {
        let page = payload(vec![
            ContentBlock::new("dynamic-zone.hero", json!({"sub_heading": "No image"})),
            ContentBlock::new(
                "dynamic-zone.location",
                json!({"subheading": "Network", "hospitals": [{"name": "A", "latitude": 1.5, "longitude": 2.5}]}),
            ),
        ]);
        let sections = render_page(&FetchState::Ready(page), &ResolveContext::strict("https://cms.test"));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].kind, SectionKind::Location);
    }

    #[test]
    fn nothing_while_loading() {
        assert!(render_page(&FetchState::Loading, &ResolveContext::lenient("")).is_empty());
    }

    #[test]
    fn page_view_carries_seo() {
        let view = PageView::build(payload(Vec::new()), &ResolveContext::lenient(""));
        assert_eq!(view.page_id, Some(12));
        assert_eq!(
            view.seo,
            Some(SeoView {
                meta_title: Some("Cancer treatment abroad".into()),
                meta_description: None,
            })
        );
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["seo"]["metaTitle"], "Cancer treatment abroad");
        assert_eq!(json["pageId"], 12);
    }

    #[test]
    fn named_renderers_pick_their_block() {
        let page = FetchState::Ready(payload(vec![
            ContentBlock::new("dynamic-zone.hero", json!({"sub_heading": "Hero title"})),
            ContentBlock::new("dynamic-zone.statistics", json!({"sub_heading": "Trials without borders"})),
        ]));
        let ctx = ResolveContext::lenient("");
        match render_named("trials-about", &page, &ctx) {
            Some(SectionView::TrialsAbout(view)) => assert_eq!(view.title, "Trials without borders"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(render_named("hero", &page, &ctx), Some(SectionView::Hero(_))));
        assert_eq!(render_named("navbar", &page, &ctx), None);
        assert_eq!(render_named("hero", &FetchState::Loading, &ctx), None);
        for name in SECTION_NAMES {
            assert!(render_named(name, &page, &ctx).is_some(), "{name}");
        }
    }
}
