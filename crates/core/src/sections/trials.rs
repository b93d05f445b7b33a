use serde::Serialize;
use serde_json::Value;

use crate::block::SectionKind;
use crate::lookup::{first_list, first_rich_text, first_text, unwrap_attributes};
use crate::resolve::{ResolveContext, Section, SectionInput};
use crate::sections::source_fields;

const LABEL: &str = "GLOBAL BREAKTHROUGHS";
const TITLE: &str = "Join advanced clinical trials from leading research centers";
const DESCRIPTION: &str = "Access cutting-edge clinical trials from top research centers worldwide.";

/// Grid of links into the clinical trials catalogue.
pub struct Trials;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialLink {
    pub title: String,
    pub link: String,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialsView {
    pub label: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub trials: Vec<TrialLink>,
}

pub fn default_trials() -> Vec<TrialLink> {
    [
        "CAR T Cell therapy clinical trials",
        "Clinical trial for BALL CAR T-Cell therapy",
        "CAR T Cell therapy trials for multiple myeloma",
        "CAR T-Cell therapy clinical trials for Immune thrombocytopenia",
    ]
    .iter()
    .zip(1..)
    .map(|(title, order)| TrialLink {
        title: title.to_string(),
        link: "#".into(),
        order,
    })
    .collect()
}

fn resolve_trial(index: usize, item: &Value) -> Option<TrialLink> {
    let item = unwrap_attributes(item);
    let title = first_text(item, &["name", "title"])?;
    let link = first_text(item, &["slug"])
        .map(|slug| format!("/clinical-trials/{slug}"))
        .unwrap_or_else(|| "#".into());
    let order = item
        .get("order")
        .and_then(page_content_path::as_i64)
        .filter(|o| *o != 0)
        .unwrap_or(index as i64 + 1);
    Some(TrialLink { title, link, order })
}

impl Section for Trials {
    const KIND: SectionKind = SectionKind::Trials;
    type View = TrialsView;

    fn resolve(input: SectionInput<'_>, ctx: &ResolveContext) -> Option<TrialsView> {
        let src = source_fields(&input);
        let title = ctx.required(first_text(&src, &["subheading", "title"]), TITLE)?;

        let mut trials: Vec<TrialLink> = first_list(&src, &["clinical_trials", "clinicalTrials"])
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter_map(|(index, item)| resolve_trial(index, item))
            .collect();
        // Stable, so equal orders keep their CMS sequence.
        trials.sort_by_key(|t| t.order);
        let trials = ctx.required_list(trials, default_trials)?;

        Some(TrialsView {
            label: ctx.optional(first_text(&src, &["heading", "label"]), LABEL),
            title,
            description: ctx.optional(first_rich_text(&src, &["description"]), DESCRIPTION),
            trials,
        })
    }
}
