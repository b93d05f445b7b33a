//! Frequently asked questions, grouped by category.

use serde::Serialize;
use serde_json::Value;

use crate::lookup::{first_rich_text, first_text, unwrap_attributes};
use crate::resolve::{FetchState, ResolveContext};

/// Entries without a category belong here, and it is the initial selection.
pub const DEFAULT_CATEGORY: &str = "Treatments";

pub const CATEGORIES: [&str; 6] = [
    "About CancerFax",
    "Hospitals",
    "Treatments",
    "Clinical Trials",
    "Locations",
    "How To Connect",
];

const SUPER_TITLE: &str = "Deep diving";
const TITLE: &str = "Everything you need to know, all in one place.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqEntry {
    pub id: Option<i64>,
    pub question: String,
    pub answer: String,
    pub category: String,
}

impl FaqEntry {
    fn new(id: i64, question: &str, answer: &str) -> Self {
        Self {
            id: Some(id),
            question: question.to_string(),
            answer: answer.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqView {
    pub super_title: String,
    pub title: String,
    pub categories: Vec<String>,
    pub selected_category: String,
    /// Entries of the selected category only.
    pub entries: Vec<FaqEntry>,
}

pub fn default_faqs() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new(1, "Cytokine Release Syndrome (CRS)", "An inflammatory response causing fever, low blood pressure, and potential multi-organ effects. Managed with tocilizumab and supportive care."),
        FaqEntry::new(2, "Neurotoxicity / Neurological Events", "Neurological side effects that may occur during treatment, managed with appropriate medical interventions."),
        FaqEntry::new(3, "Cytopenias (Low Blood Counts)", "Low blood cell counts that may require supportive care and monitoring during treatment."),
        FaqEntry::new(4, "Infection Risk", "Increased risk of infections during treatment, requiring careful monitoring and preventive measures."),
        FaqEntry::new(5, "Tumor Lysis Syndrome (TLS)", "A metabolic condition that can occur when cancer cells break down rapidly, requiring medical management."),
        FaqEntry::new(6, "Organ Toxicities", "Potential side effects affecting various organs, monitored and managed by the medical team."),
        FaqEntry::new(7, "Hypogammaglobulinemia & Long-Term Immune Dysfunction", "Long-term immune system changes that may require ongoing monitoring and management."),
        FaqEntry::new(8, "Other Rare Risks", "Additional rare risks that are discussed during the consultation process."),
    ]
}

/// An entry needs both a question and an answer to be shown.
fn resolve_entry(item: &Value) -> Option<FaqEntry> {
    let id = item.get("id").and_then(Value::as_i64);
    let item = unwrap_attributes(item);
    Some(FaqEntry {
        id: id.or_else(|| item.get("id").and_then(Value::as_i64)),
        question: first_text(item, &["question", "title"])?,
        answer: first_rich_text(item, &["answer", "content"])?,
        category: first_text(item, &["category", "category.name"])
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
    })
}

impl FaqView {
    /// Resolve fetched entries and keep those in `category` (default
    /// [`DEFAULT_CATEGORY`]). With no usable entries the lenient context
    /// falls back to the built-in list; strict mode shows nothing.
    pub fn build(state: &FetchState<Vec<Value>>, category: Option<&str>, ctx: &ResolveContext) -> Option<Self> {
        let items: &[Value] = match state {
            FetchState::Loading => return None,
            FetchState::Ready(items) => items,
            FetchState::Failed(_) => &[],
        };
        let resolved: Vec<FaqEntry> = items.iter().filter_map(resolve_entry).collect();
        let all = ctx.required_list(resolved, default_faqs)?;

        let selected = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();
        let entries = all.into_iter().filter(|e| e.category == selected).collect();

        Some(Self {
            super_title: SUPER_TITLE.to_string(),
            title: TITLE.to_string(),
            categories: CATEGORIES.iter().map(|c| c.to_string()).collect(),
            selected_category: selected,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchFailure;
    use serde_json::json;

    fn ready(items: Value) -> FetchState<Vec<Value>> {
        FetchState::Ready(items.as_array().cloned().unwrap_or_default())
    }

    #[test]
    fn missing_category_counts_as_treatments() {
        let state = ready(json!([
            {"id": 1, "question": "Is travel arranged?", "answer": "Yes.", "category": "How To Connect"},
            {"id": 2, "question": "What is CAR-T?", "answer": "A cell therapy."},
            {"id": 3, "attributes": {"question": "Side effects?", "answer": "Some.", "category": "Treatments"}}
        ]));
        let view = FaqView::build(&state, None, &ResolveContext::lenient("")).unwrap();
        assert_eq!(view.selected_category, DEFAULT_CATEGORY);
        let ids: Vec<_> = view.entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, [Some(2), Some(3)]);

        let view = FaqView::build(&state, Some("How To Connect"), &ResolveContext::lenient("")).unwrap();
        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.entries[0].question, "Is travel arranged?");
    }

    #[test]
    fn entries_without_an_answer_are_dropped() {
        let state = ready(json!([
            {"id": 1, "question": "Orphan", "answer": " "},
            {"id": 2, "question": "Kept", "answer": "Answer"}
        ]));
        let view = FaqView::build(&state, None, &ResolveContext::strict("")).unwrap();
        assert_eq!(view.entries.len(), 1);
        assert_eq!(view.entries[0].question, "Kept");
    }

    #[test]
    fn empty_or_failed_uses_defaults_unless_strict() {
        let failed = FetchState::Failed(FetchFailure {
            status: 503,
            message: "down".into(),
        });
        for state in [ready(json!([])), failed] {
            let view = FaqView::build(&state, None, &ResolveContext::lenient("")).unwrap();
            assert_eq!(view.entries, default_faqs());
            assert_eq!(FaqView::build(&state, None, &ResolveContext::strict("")), None);
        }
        assert_eq!(FaqView::build(&FetchState::Loading, None, &ResolveContext::lenient("")), None);
    }

    #[test]
    fn other_categories_can_be_empty() {
        let view = FaqView::build(&ready(json!([])), Some("Hospitals"), &ResolveContext::lenient("")).unwrap();
        assert!(view.entries.is_empty());
        assert_eq!(view.categories.len(), CATEGORIES.len());
    }
}
