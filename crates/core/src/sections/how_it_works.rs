use serde::Serialize;
use serde_json::Value;

use crate::block::SectionKind;
use crate::lookup::{first_list, first_media, first_rich_text, first_text, unwrap_attributes};
use crate::resolve::{ResolveContext, Section, SectionInput};
use crate::sections::source_fields;

const LABEL: &str = "HOW IT WORKS";
const TITLE: &str = "Your Journey to Better Cancer Care, Simplified";
const BUTTON_TEXT: &str = "Connect with our Experts";
const IMAGE: &str = "https://images.unsplash.com/photo-1576091160399-112ba8d25d1d?w=640";
const IMAGE_ALT: &str = "Doctor consultation";
const DEFAULT_ICON: &str = "document";

/// Numbered onboarding steps beside a feature image.
pub struct HowItWorks;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub icon_type: String,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HowItWorksView {
    pub label: Option<String>,
    pub title: String,
    pub button_text: Option<String>,
    pub image: Option<String>,
    pub image_alt: String,
    pub steps: Vec<Step>,
}

pub fn default_steps() -> Vec<Step> {
    [
        ("1. Share Your Medical Reports", "Upload your medical reports for quick evaluation.", "document"),
        ("2. Receive Expert Evaluation", "Get expert analysis to guide your treatment decisions.", "userCheck"),
        ("3. Choose the Right Hospital or Trial", "Select the best hospitals or trials that suit your needs.", "hospital"),
        ("4. Seamless Coordination", "Enjoy smooth coordination with the healthcare providers globally.", "coordination"),
        ("5. Continuous Support", "Receive continuous support throughout your treatment journey.", "support"),
    ]
    .iter()
    .zip(1..)
    .map(|(&(title, description, icon), n)| Step {
        id: n,
        title: title.into(),
        description: Some(description.into()),
        icon_type: icon.into(),
        order: n,
    })
    .collect()
}

/// Optional step fields borrow from the default step at the same index.
fn resolve_step(index: usize, raw: &Value, defaults: &[Step], ctx: &ResolveContext) -> Option<Step> {
    let position = index as i64 + 1;
    let fallback = defaults.get(index).filter(|_| !ctx.strict);
    let id = raw
        .get("id")
        .and_then(page_content_path::as_i64)
        .unwrap_or(position);
    let item = unwrap_attributes(raw);

    let title = first_text(item, &["title"])?;
    let description = first_rich_text(item, &["description"])
        .or_else(|| fallback.and_then(|s| s.description.clone()));
    let icon_type = first_text(item, &["iconType"])
        .or_else(|| fallback.map(|s| s.icon_type.clone()))
        .unwrap_or_else(|| DEFAULT_ICON.into());
    let order = item
        .get("order")
        .and_then(page_content_path::as_i64)
        .unwrap_or(position);

    Some(Step {
        id,
        title,
        description,
        icon_type,
        order,
    })
}

impl Section for HowItWorks {
    const KIND: SectionKind = SectionKind::HowItWorks;
    type View = HowItWorksView;

    fn resolve(input: SectionInput<'_>, ctx: &ResolveContext) -> Option<HowItWorksView> {
        let src = source_fields(&input);
        let title = ctx.required(first_text(&src, &["sub_heading", "title"]), TITLE)?;

        let defaults = default_steps();
        let steps: Vec<Step> = first_list(&src, &["steps"])
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter_map(|(index, item)| resolve_step(index, item, &defaults, ctx))
            .collect();
        let steps = ctx.required_list(steps, || defaults.clone())?;

        Some(HowItWorksView {
            label: ctx.optional(first_text(&src, &["heading"]), LABEL),
            title,
            button_text: ctx.optional(first_text(&src, &["cta.text"]), BUTTON_TEXT),
            image: ctx.optional(first_media(&src, &["featuredImage", "image"], &ctx.media), IMAGE),
            image_alt: IMAGE_ALT.into(),
            steps,
        })
    }
}
