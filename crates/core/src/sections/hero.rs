use serde::Serialize;

use crate::block::SectionKind;
use crate::lookup::{first_media, first_rich_text, first_text};
use crate::resolve::{ResolveContext, Section, SectionInput};
use crate::sections::source_fields;

const LABEL: &str = "SURVIVOR STORIES";
const TITLE: &str = "Andrea... A hero, a fighter..\nKnow her journey..";
const DESCRIPTION: &str = "CancerFax helps patients find cutting-edge treatments and ongoing clinical trials across top medical centers. From report review to travel support, we guide you every step of the way.";
const BUTTON_TEXT: &str = "Read Andrea's Story";
const BACKGROUND: &str = "https://images.unsplash.com/photo-1576091160399-112ba8d25d1d?w=1920";

/// Full-bleed survivor story banner.
pub struct Hero;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroView {
    pub label: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub button_text: Option<String>,
    pub button_url: String,
    pub background: String,
}

impl Section for Hero {
    const KIND: SectionKind = SectionKind::Hero;
    type View = HeroView;

    fn resolve(input: SectionInput<'_>, ctx: &ResolveContext) -> Option<HeroView> {
        let src = source_fields(&input);

        let title = ctx.required(first_text(&src, &["sub_heading", "title"]), TITLE)?;
        let background = ctx.required(
            first_media(&src, &["image", "backgroundImage"], &ctx.media),
            BACKGROUND,
        )?;

        Some(HeroView {
            label: ctx.optional(first_text(&src, &["heading", "label"]), LABEL),
            title,
            description: ctx.optional(first_rich_text(&src, &["description"]), DESCRIPTION),
            button_text: ctx.optional(first_text(&src, &["CTAs[0].text", "cta.text"]), BUTTON_TEXT),
            button_url: first_text(&src, &["CTAs[0].URL", "cta.URL"]).unwrap_or_else(|| "#".into()),
            background,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::ContentBlock;
    use serde_json::json;

    fn resolve(block: Option<&ContentBlock>, ctx: &ResolveContext) -> Option<HeroView> {
        Hero::resolve(SectionInput { source: block, page: &[] }, ctx)
    }

    #[test]
    fn maps_cms_fields() {
        let block = ContentBlock::new(
            "dynamic-zone.hero",
            json!({
                "heading": "OUR PATIENTS",
                "sub_heading": "Maria beat lymphoma",
                "description": [{"type": "paragraph", "children": [{"type": "text", "text": "Her story."}]}],
                "CTAs": [{"text": "Read more", "URL": "/stories/maria"}],
                "image": {"data": {"attributes": {"url": "/uploads/maria.jpg"}}}
            }),
        );
        let view = resolve(Some(&block), &ResolveContext::lenient("https://cms.test")).unwrap();
        assert_eq!(view.label.as_deref(), Some("OUR PATIENTS"));
        assert_eq!(view.title, "Maria beat lymphoma");
        assert_eq!(view.description.as_deref(), Some("Her story."));
        assert_eq!(view.button_text.as_deref(), Some("Read more"));
        assert_eq!(view.button_url, "/stories/maria");
        assert_eq!(view.background, "https://cms.test/uploads/maria.jpg");
    }

    #[test]
    fn empty_block_gets_defaults() {
        let block = ContentBlock::new("dynamic-zone.hero", json!({"heading": "", "sub_heading": null}));
        let view = resolve(Some(&block), &ResolveContext::lenient("https://cms.test")).unwrap();
        assert_eq!(view.label.as_deref(), Some(LABEL));
        assert_eq!(view.title, TITLE);
        assert_eq!(view.button_url, "#");
        assert_eq!(view.background, BACKGROUND);
    }

    #[test]
    fn strict_requires_title_and_background() {
        let ctx = ResolveContext::strict("https://cms.test");
        let no_image = ContentBlock::new("dynamic-zone.hero", json!({"sub_heading": "Title"}));
        assert_eq!(resolve(Some(&no_image), &ctx), None);

        let complete = ContentBlock::new(
            "dynamic-zone.hero",
            json!({"sub_heading": "Title", "image": "/uploads/a.jpg"}),
        );
        let view = resolve(Some(&complete), &ctx).unwrap();
        assert_eq!(view.label, None);
        assert_eq!(view.description, None);
    }
}
