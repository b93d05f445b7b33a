use serde::Serialize;
use serde_json::Value;

use crate::block::SectionKind;
use crate::lookup::{first_list, first_media, first_rich_text, first_text, unwrap_attributes};
use crate::resolve::{ResolveContext, Section, SectionInput};
use crate::sections::source_fields;

const LABEL: &str = "INNOVATIVE CARE";
const TITLE: &str = "Explore Breakthrough Therapies";
const DESCRIPTION: &str = "From revolutionary cell therapies to targeted immunotherapies, CancerFax helps you explore innovative options personalized to your diagnosis.";
const THERAPY_DESCRIPTION: &str = "A breakthrough treatment that reprograms your own immune cells to recognize and destroy cancer. It offers new hope for patients with leukemia, lymphoma, and other hard-to-treat cancers.";

/// Innovative care carousel of therapy cards.
pub struct Therapies;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Therapy {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapiesView {
    pub label: String,
    pub title: String,
    pub description: Option<String>,
    pub therapies: Vec<Therapy>,
}

pub fn default_therapies() -> Vec<Therapy> {
    let therapy = |id, name: &str, description: &str, image: &str| Therapy {
        id: Some(id),
        name: name.into(),
        description: description.into(),
        image: Some(image.into()),
    };
    vec![
        therapy(1, "CAR-T Cell Therapy", THERAPY_DESCRIPTION, "https://images.unsplash.com/photo-1576091160399-112ba8d25d1d?w=800"),
        therapy(
            2,
            "Gene Therapy",
            "Cutting-edge treatment that modifies genes to fight cancer at the molecular level, offering personalized solutions for various cancer types.",
            "https://images.unsplash.com/photo-1579154204601-01588f351e67?w=800",
        ),
        therapy(
            3,
            "Immunotherapy",
            "Harnesses the power of your immune system to target and eliminate cancer cells with precision and minimal side effects.",
            "https://images.unsplash.com/photo-1582719508461-905c673771fd?w=800",
        ),
    ]
}

fn resolve_therapy(item: &Value, ctx: &ResolveContext) -> Option<Therapy> {
    let id = item.get("id").and_then(page_content_path::as_i64);
    let item = unwrap_attributes(item);
    let name = first_text(item, &["name", "title"])?;
    Some(Therapy {
        id,
        name,
        description: first_rich_text(item, &["description", "desc"])
            .unwrap_or_else(|| THERAPY_DESCRIPTION.into()),
        image: first_media(item, &["featuredImage", "image"], &ctx.media),
    })
}

impl Section for Therapies {
    const KIND: SectionKind = SectionKind::Therapies;
    type View = TherapiesView;

    fn resolve(input: SectionInput<'_>, ctx: &ResolveContext) -> Option<TherapiesView> {
        let src = source_fields(&input);

        let label = ctx
            .required(first_text(&src, &["heading", "label"]), LABEL)?
            .to_uppercase();
        let title = ctx.required(first_text(&src, &["subheading", "title"]), TITLE)?;

        let therapies: Vec<Therapy> = first_list(&src, &["Therapy", "therapies"])
            .unwrap_or_default()
            .iter()
            .filter_map(|item| resolve_therapy(item, ctx))
            .collect();
        let therapies = ctx.required_list(therapies, default_therapies)?;

        Some(TherapiesView {
            label,
            title,
            description: ctx.optional(first_rich_text(&src, &["description"]), DESCRIPTION),
            therapies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::ContentBlock;
    use serde_json::json;

    #[test]
    fn heading_becomes_uppercase_label() {
        let block = ContentBlock::new(
            "dynamic-zone.therapy-section",
            json!({
                "heading": "Innovative care",
                "subheading": "New options",
                "Therapy": [
                    {"id": 7, "name": "CAR-T", "featuredImage": {"data": {"attributes": {"url": "/uploads/cart.png"}}}},
                    {"id": 8, "title": "Proton", "desc": "Precise radiation"},
                    {"id": 9, "description": "no name"}
                ]
            }),
        );
        let view = Therapies::resolve(
            SectionInput { source: Some(&block), page: &[] },
            &ResolveContext::lenient("https://cms.test"),
        )
        .unwrap();
        assert_eq!(view.label, "INNOVATIVE CARE");
        assert_eq!(view.title, "New options");
        assert_eq!(view.therapies.len(), 2);
        assert_eq!(view.therapies[0].image.as_deref(), Some("https://cms.test/uploads/cart.png"));
        assert_eq!(view.therapies[0].description, THERAPY_DESCRIPTION);
        assert_eq!(view.therapies[1].id, Some(8));
        assert_eq!(view.therapies[1].description, "Precise radiation");
        assert_eq!(view.therapies[1].image, None);
    }

    #[test]
    fn defaults_and_strict() {
        let lenient = Therapies::resolve(SectionInput { source: None, page: &[] }, &ResolveContext::lenient(""))
            .unwrap();
        assert_eq!(lenient.label, LABEL);
        assert_eq!(lenient.therapies, default_therapies());

        let no_list = ContentBlock::new(
            "dynamic-zone.therapy-section",
            json!({"heading": "Care", "subheading": "Therapies"}),
        );
        assert_eq!(
            Therapies::resolve(SectionInput { source: Some(&no_list), page: &[] }, &ResolveContext::strict("")),
            None
        );
    }
}
