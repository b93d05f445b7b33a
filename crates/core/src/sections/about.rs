use serde::Serialize;
use serde_json::Value;

use crate::block::{ContentBlock, SectionKind};
use crate::counter::CounterValue;
use crate::lookup::{first_bool, first_list, first_media, first_rich_text, first_text, unwrap_attributes};
use crate::resolve::{ResolveContext, Section, SectionInput};
use crate::sections::source_fields;

const LABEL: &str = "ABOUT CANCERFAX";
const TITLE: &str = "Global Reach. Personal Care. Proven Results.";
const DESCRIPTION: &str = "At CancerFax, we're transforming the way patients discover and receive life-saving therapies, simplifying global care with science, technology, and trust.";
const BUTTON_TEXT: &str = "Know more about Cancerfax";
const IMAGE: &str = "https://images.unsplash.com/photo-1576091160399-112ba8d25d1d?w=800";

/// The statistics grid always shows at least this many cells.
pub const MIN_STATISTICS: usize = 4;

const STATISTICS_FIELDS: &[&str] = &["Statistics", "statistics"];

/// About block with its animated statistics grid.
pub struct About;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistic {
    pub number: String,
    /// Parsed counter target, when `number` follows the counter grammar.
    pub target: Option<f64>,
    pub label: String,
    pub is_large: bool,
    pub label_size: String,
}

impl Statistic {
    fn new(number: &str, label: &str, is_large: bool, label_size: &str) -> Self {
        Self {
            number: number.to_string(),
            target: CounterValue::parse(number).map(|v| v.target()),
            label: label.to_string(),
            is_large,
            label_size: label_size.to_string(),
        }
    }

    pub fn counter(&self) -> Option<CounterValue> {
        CounterValue::parse(&self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutView {
    pub label: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub button_text: Option<String>,
    pub video_url: Option<String>,
    pub image: Option<String>,
    pub statistics: Vec<Statistic>,
}

pub fn default_statistics() -> Vec<Statistic> {
    vec![
        Statistic::new("10,000k+", "Patients guided globally", true, "large"),
        Statistic::new("98%", "Patient Satisfaction Rate", false, "small"),
        Statistic::new("250+", "Clinical Trials Accessed", false, "small"),
        Statistic::new("100+", "Partner Hospitals Globally", false, "small"),
    ]
}

/// An item without a number or a label is never shown half-filled. Layout
/// hints the item leaves out come from the default cell at the same index.
fn resolve_statistic(item: &Value, layout: Option<&Statistic>) -> Option<Statistic> {
    let item = unwrap_attributes(item);
    let number = first_text(item, &["number", "value"])?;
    let label = first_text(item, &["label", "title"])?;
    let is_large = first_bool(item, &["isLarge"])
        .unwrap_or_else(|| layout.is_some_and(|d| d.is_large));
    let label_size = first_text(item, &["labelSize"])
        .or_else(|| layout.map(|d| d.label_size.clone()))
        .unwrap_or_else(|| "small".into());
    Some(Statistic::new(&number, &label, is_large, &label_size))
}

/// Statistics come from the source block's own list first, then from the
/// first statistics block on the page.
pub(crate) fn statistics_items(source: &Value, page: &[ContentBlock]) -> Vec<Value> {
    if let Some(items) = first_list(source, STATISTICS_FIELDS) {
        return items.to_vec();
    }
    page.iter()
        .filter(|b| b.kind() == Some(SectionKind::Statistics))
        .find_map(|b| {
            let fields = b.to_value();
            first_list(&fields, STATISTICS_FIELDS).map(<[Value]>::to_vec)
        })
        .unwrap_or_default()
}

pub(crate) fn resolve_statistics(
    source: &Value,
    page: &[ContentBlock],
    ctx: &ResolveContext,
) -> Vec<Statistic> {
    let defaults = default_statistics();
    let real: Vec<Statistic> = statistics_items(source, page)
        .iter()
        .enumerate()
        .filter_map(|(index, item)| resolve_statistic(item, defaults.get(index)))
        .collect();
    if real.is_empty() {
        return if ctx.strict { Vec::new() } else { defaults };
    }
    ctx.pad_positional(real, &defaults, MIN_STATISTICS)
}

impl Section for About {
    const KIND: SectionKind = SectionKind::About;
    type View = AboutView;

    fn resolve(input: SectionInput<'_>, ctx: &ResolveContext) -> Option<AboutView> {
        let src = source_fields(&input);
        let title = ctx.required(first_text(&src, &["sub_heading", "title"]), TITLE)?;

        let video_url = first_media(&src, &["video"], &ctx.media)
            .or_else(|| first_text(&src, &["video_url"]).and_then(|u| ctx.media.absolute(&u)));
        let image = first_media(&src, &["image"], &ctx.media)
            .or_else(|| (!ctx.strict).then(|| IMAGE.to_string()));

        Some(AboutView {
            label: ctx.optional(first_text(&src, &["heading"]), LABEL),
            title,
            description: ctx.optional(first_rich_text(&src, &["content", "description"]), DESCRIPTION),
            button_text: ctx.optional(first_text(&src, &["cta.text", "button.text"]), BUTTON_TEXT),
            video_url,
            image,
            statistics: resolve_statistics(&src, input.page, ctx),
        })
    }
}
