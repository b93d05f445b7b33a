use serde::Serialize;

use crate::block::SectionKind;
use crate::lookup::{first_rich_text, first_text};
use crate::resolve::{ResolveContext, Section, SectionInput};
use crate::sections::{source_fields, Cta};

const LABEL: &str = "GET IN TOUCH";
const TITLE: &str = "When Every Decision Matters, Start with the Right Guidance";
const DESCRIPTION: &str = "Our experts review your case, connect you to breakthrough therapies, and support you at every stage of your treatment journey.";
const BUTTON_TEXT: &str = "Submit Reports For Expert Review";
const BUTTON_LINK: &str = "#submit-reports";

pub struct GetInTouch;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetInTouchView {
    pub label: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub cta: Option<Cta>,
    pub background_color: Option<String>,
}

impl Section for GetInTouch {
    const KIND: SectionKind = SectionKind::GetInTouch;
    type View = GetInTouchView;

    fn resolve(input: SectionInput<'_>, ctx: &ResolveContext) -> Option<GetInTouchView> {
        let src = source_fields(&input);
        Some(GetInTouchView {
            label: ctx.optional(first_text(&src, &["heading", "label"]), LABEL),
            title: ctx.required(first_text(&src, &["subheading", "title"]), TITLE)?,
            description: ctx.optional(first_rich_text(&src, &["description"]), DESCRIPTION),
            cta: Cta::resolve(&src, ctx, BUTTON_TEXT, BUTTON_LINK),
            background_color: first_text(&src, &["backgroundColor"]),
        })
    }
}
