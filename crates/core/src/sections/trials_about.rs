use serde::Serialize;

use crate::block::SectionKind;
use crate::lookup::{first_media, first_rich_text, first_text};
use crate::resolve::{ResolveContext, Section, SectionInput};
use crate::sections::{source_fields, Cta};

const LABEL: &str = "ABOUT CANCERFAX";
const TITLE: &str = "Connecting You to Global Trials";
const DESCRIPTION: &str = "Discover and join advanced clinical trials from leading research centers worldwide. We connect patients with breakthrough treatments and innovative therapies beyond borders. Wherever you are, hope is within reach.";
const BUTTON_TEXT: &str = "Explore All Ongoing Trials";
const BUTTON_URL: &str = "/clinical-trials";
const IMAGE: &str = "https://images.unsplash.com/photo-1559839734-2b71ea197ec2?w=800";
const BACKGROUND: &str = "/images/background.png";
const FOREGROUND: &str = "/images/Attached_image.png";

/// Clinical-trials landing intro. Reads the page's statistics block; it is
/// never picked from the block map directly.
pub struct TrialsAbout;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialsAboutView {
    pub label: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub cta: Option<Cta>,
    pub image: Option<String>,
    pub background_image: Option<String>,
    pub foreground_image: Option<String>,
}

impl Section for TrialsAbout {
    const KIND: SectionKind = SectionKind::Statistics;
    type View = TrialsAboutView;

    fn resolve(input: SectionInput<'_>, ctx: &ResolveContext) -> Option<TrialsAboutView> {
        let src = source_fields(&input);
        let title = ctx.required(first_text(&src, &["sub_heading", "title"]), TITLE)?;

        Some(TrialsAboutView {
            label: ctx.optional(first_text(&src, &["heading"]), LABEL),
            title,
            description: ctx.optional(first_rich_text(&src, &["description"]), DESCRIPTION),
            cta: Cta::resolve(&src, ctx, BUTTON_TEXT, BUTTON_URL),
            image: ctx.optional(first_media(&src, &["image"], &ctx.media), IMAGE),
            background_image: ctx.optional(
                first_media(&src, &["backgroundImage", "image"], &ctx.media),
                BACKGROUND,
            ),
            foreground_image: ctx.optional(
                first_media(&src, &["foregroundImage", "image"], &ctx.media),
                FOREGROUND,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{ContentBlock, PagePayload};
    use crate::resolve::{resolve_section, FetchState};
    use serde_json::json;

    #[test]
    fn picks_the_statistics_block() {
        let page = PagePayload {
            slug: "clinical-trials".into(),
            blocks: vec![
                ContentBlock::new("dynamic-zone.hero", json!({"sub_heading": "Not me"})),
                ContentBlock::new(
                    "dynamic-zone.statistics",
                    json!({
                        "sub_heading": "Trials without borders",
                        "image": {"url": "/uploads/lab.jpg"},
                        "foregroundImage": {"url": "/uploads/front.png"}
                    }),
                ),
            ],
            ..Default::default()
        };
        let view = resolve_section::<TrialsAbout>(
            None,
            &FetchState::Ready(page),
            &ResolveContext::lenient("https://cms.test"),
        )
        .unwrap();
        assert_eq!(view.title, "Trials without borders");
        assert_eq!(view.image.as_deref(), Some("https://cms.test/uploads/lab.jpg"));
        assert_eq!(view.background_image.as_deref(), Some("https://cms.test/uploads/lab.jpg"));
        assert_eq!(view.foreground_image.as_deref(), Some("https://cms.test/uploads/front.png"));
    }

    #[test]
    fn defaults() {
        let view = TrialsAbout::resolve(SectionInput { source: None, page: &[] }, &ResolveContext::lenient(""))
            .unwrap();
        assert_eq!(view.background_image.as_deref(), Some(BACKGROUND));
        assert_eq!(view.foreground_image.as_deref(), Some(FOREGROUND));
        assert_eq!(
            view.cta,
            Some(Cta {
                text: BUTTON_TEXT.into(),
                url: BUTTON_URL.into()
            })
        );
    }
}
