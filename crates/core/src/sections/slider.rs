use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::block::SectionKind;
use crate::carousel::AUTO_ADVANCE_PERIOD;
use crate::lookup::{first_list, first_media, first_rich_text, first_text, unwrap_attributes};
use crate::resolve::{ResolveContext, Section, SectionInput};
use crate::sections::source_fields;

const SLIDE_MEDIA: &[&str] = &[
    "featuredImage",
    "backgroundImage",
    "background_image",
    "image",
    "images",
    "media",
    "backgroundMedia",
    "background.image",
    "background.backgroundImage",
    "background.media",
    "gallery",
];

const SECTION_MEDIA: &[&str] = &["backgroundImage", "background_image"];

const LABEL: &str = "TREATMENTS";
const BUTTON_TEXT: &str = "Find Relevant Clinical Trials";
const BUTTON_LINK: &str = "#clinical-trials";

/// Clinical trials showcase carousel.
pub struct Slider;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub label: Option<String>,
    pub title: String,
    /// Never padded; a slide without copy shows none.
    pub description: Option<String>,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
    pub background: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderView {
    pub slides: Vec<Slide>,
    /// Auto-advance period in milliseconds; absent for a single slide.
    pub auto_advance_ms: Option<u64>,
}

impl SliderView {
    pub fn auto_advance(&self) -> Option<Duration> {
        self.auto_advance_ms.map(Duration::from_millis)
    }
}

pub fn default_slides() -> Vec<Slide> {
    vec![
        Slide {
            label: Some("TREATMENTS".into()),
            title: "CancerFax's Role In Clinical Trial Advancements".into(),
            description: Some("CancerFax helps patients find cutting-edge treatments and ongoing clinical trials across top medical centers. From report review to travel support, we guide you every step of the way.".into()),
            button_text: Some("Find Relevant Clinical Trials".into()),
            button_link: Some("#clinical-trials".into()),
            background: Some("https://images.unsplash.com/photo-1576091160399-112ba8d25d1d?w=1920&q=80".into()),
        },
        Slide {
            label: Some("INNOVATION".into()),
            title: "Advanced Treatment Options Available Worldwide".into(),
            description: Some("Discover breakthrough therapies and cutting-edge treatments from leading medical institutions. Our network connects you with the best care options globally.".into()),
            button_text: Some("Explore Treatments".into()),
            button_link: Some("#treatments".into()),
            background: Some("https://images.unsplash.com/photo-1579154204601-01588f351e67?w=1920&q=80".into()),
        },
    ]
}

fn resolve_slide(
    item: &Value,
    index: usize,
    section: &Value,
    defaults: &[Slide],
    ctx: &ResolveContext,
) -> Option<Slide> {
    let item = unwrap_attributes(item);
    let title = first_text(item, &["subheading", "title"])?;

    let fallback_background = defaults
        .get(index)
        .or_else(|| defaults.first())
        .and_then(|s| s.background.clone());
    let background = first_media(item, SLIDE_MEDIA, &ctx.media)
        .or_else(|| first_media(section, SECTION_MEDIA, &ctx.media))
        .or(fallback_background);

    Some(Slide {
        label: ctx.optional(first_text(item, &["heading", "label"]), LABEL),
        title,
        description: first_rich_text(item, &["description"]),
        button_text: ctx.optional(first_text(item, &["cta.text", "buttonText"]), BUTTON_TEXT),
        button_link: ctx.optional(first_text(item, &["cta.URL", "buttonLink", "cta.link"]), BUTTON_LINK),
        background,
    })
}

impl Section for Slider {
    const KIND: SectionKind = SectionKind::Slider;
    type View = SliderView;

    fn resolve(input: SectionInput<'_>, ctx: &ResolveContext) -> Option<SliderView> {
        if ctx.strict && input.source.is_none() {
            return None;
        }
        let src = source_fields(&input);
        let defaults = if ctx.strict { Vec::new() } else { default_slides() };

        let slides: Vec<Slide> = first_list(&src, &["Slide", "slides"])
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter_map(|(index, item)| resolve_slide(item, index, &src, &defaults, ctx))
            .collect();
        let slides = ctx.required_list(slides, || defaults.clone())?;

        let auto_advance_ms = (slides.len() > 1).then(|| AUTO_ADVANCE_PERIOD.as_millis() as u64);
        Some(SliderView {
            slides,
            auto_advance_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::ContentBlock;
    use serde_json::json;

    fn resolve(block: Option<&ContentBlock>, ctx: &ResolveContext) -> Option<SliderView> {
        Slider::resolve(SectionInput { source: block, page: &[] }, ctx)
    }

    #[test]
    fn slides_without_title_are_dropped() {
        let block = ContentBlock::new(
            "dynamic-zone.slider-section",
            json!({"Slide": [
                {"heading": "A", "subheading": "First", "cta": {"text": "Go", "URL": "/a"},
                 "featuredImage": {"url": "/uploads/first.jpg"}},
                {"heading": "B", "subheading": ""},
                {"attributes": {"title": "Third", "buttonLink": "/c"}}
            ]}),
        );
        let view = resolve(Some(&block), &ResolveContext::lenient("https://cms.test")).unwrap();
        assert_eq!(view.slides.len(), 2);
        assert_eq!(view.slides[0].title, "First");
        assert_eq!(view.slides[0].button_link.as_deref(), Some("/a"));
        assert_eq!(view.slides[0].background.as_deref(), Some("https://cms.test/uploads/first.jpg"));
        assert_eq!(view.slides[1].title, "Third");
        assert_eq!(view.slides[1].button_link.as_deref(), Some("/c"));
        assert_eq!(view.auto_advance(), Some(AUTO_ADVANCE_PERIOD));
    }

    #[test]
    fn background_falls_back_to_section_then_default_by_index() {
        let block = ContentBlock::new(
            "dynamic-zone.slider-section",
            json!({"Slide": [{"subheading": "One"}, {"subheading": "Two"}, {"subheading": "Three"}]}),
        );
        let view = resolve(Some(&block), &ResolveContext::lenient("https://cms.test")).unwrap();
        let defaults = default_slides();
        assert_eq!(view.slides[0].background, defaults[0].background);
        assert_eq!(view.slides[1].background, defaults[1].background);
        assert_eq!(view.slides[2].background, defaults[0].background);

        let with_section_bg = ContentBlock::new(
            "dynamic-zone.slider-section",
            json!({"backgroundImage": "/uploads/bg.png", "Slide": [{"subheading": "One"}]}),
        );
        let view = resolve(Some(&with_section_bg), &ResolveContext::lenient("https://cms.test")).unwrap();
        assert_eq!(view.slides[0].background.as_deref(), Some("https://cms.test/uploads/bg.png"));
        assert_eq!(view.auto_advance_ms, None);
    }

    #[test]
    fn no_slides_uses_defaults_unless_strict() {
        let empty = ContentBlock::new("dynamic-zone.slider-section", json!({"Slide": []}));
        let view = resolve(Some(&empty), &ResolveContext::lenient("")).unwrap();
        assert_eq!(view.slides, default_slides());

        assert_eq!(resolve(Some(&empty), &ResolveContext::strict("")), None);
        assert_eq!(resolve(None, &ResolveContext::strict("")), None);
    }

    #[test]
    fn title_only_slide_gets_copy_defaults() {
        let block = ContentBlock::new("dynamic-zone.slider-section", json!({"Slide": [{"title": "Only a title"}]}));
        let view = resolve(Some(&block), &ResolveContext::lenient("")).unwrap();
        let slide = &view.slides[0];
        assert_eq!(slide.title, "Only a title");
        assert_eq!(slide.label.as_deref(), Some(LABEL));
        assert_eq!(slide.button_text.as_deref(), Some(BUTTON_TEXT));
        assert_eq!(slide.button_link.as_deref(), Some(BUTTON_LINK));
        assert_eq!(slide.description, None);

        let view = resolve(Some(&block), &ResolveContext::strict("")).unwrap();
        assert_eq!(view.slides[0].label, None);
        assert_eq!(view.slides[0].button_text, None);
        assert_eq!(view.slides[0].button_link, None);
    }

    #[test]
    fn strict_slide_keeps_missing_background_empty() {
        let block = ContentBlock::new("dynamic-zone.slider-section", json!({"Slide": [{"title": "Only"}]}));
        let view = resolve(Some(&block), &ResolveContext::strict("")).unwrap();
        assert_eq!(view.slides[0].background, None);
    }
}
