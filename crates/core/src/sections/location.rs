use serde::Serialize;
use serde_json::Value;

use crate::block::SectionKind;
use crate::lookup::{first_f64, first_list, first_rich_text, first_text, unwrap_attributes};
use crate::resolve::{ResolveContext, Section, SectionInput};
use crate::sections::source_fields;

const LABEL: &str = "LOCATION";
const TITLE: &str = "Global Network of Leading Doctors & Partner Hospitals";
const DESCRIPTION: &str = "CancerFax collaborates with globally acclaimed oncologists and accredited medical institutions to ensure every patient receives scientifically guided, world-class treatment. From consultation to recovery, you're supported by the best minds in modern cancer care.";

/// Map center when no hospital is available.
pub const DEFAULT_CENTER: [f64; 2] = [35.0, 115.0];

/// Partner hospital map.
pub struct Location;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationView {
    pub label: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub hospitals: Vec<Hospital>,
    /// `[latitude, longitude]` of the initially selected hospital.
    pub center: [f64; 2],
}

pub fn default_hospitals() -> Vec<Hospital> {
    [
        ("Cancer Hospital, Chinese Academy of Medical Sciences, Beijing", 39.9042, 116.4074),
        ("Children's Hospital of Nanjing Medical University (DPNJMU)", 32.0603, 118.7969),
        ("Hong Kong University Shenzhen Hospital", 22.5431, 114.0579),
        ("Beijing Tiantan Hospital", 39.8817, 116.4134),
        ("The First Affiliated Hospital, Zhejiang University School of Medicine, Hangzhou", 30.2741, 120.1551),
        ("Anhui provincial hospital", 31.8206, 117.2272),
    ]
    .iter()
    .zip(1..)
    .map(|(&(name, latitude, longitude), n)| Hospital {
        id: n,
        name: name.into(),
        latitude,
        longitude,
        order: n,
    })
    .collect()
}

/// Hospitals need a name and non-zero coordinates to be placed on the map.
fn resolve_hospital(index: usize, raw: &Value) -> Option<Hospital> {
    let position = index as i64 + 1;
    let id = raw
        .get("id")
        .and_then(page_content_path::as_i64)
        .unwrap_or(position);
    let item = unwrap_attributes(raw);
    let name = first_text(item, &["name", "title"])?;
    let latitude = first_f64(item, &["latitude", "lat"]).filter(|v| *v != 0.0)?;
    let longitude = first_f64(item, &["longitude", "lng"]).filter(|v| *v != 0.0)?;
    let order = item
        .get("order")
        .and_then(page_content_path::as_i64)
        .unwrap_or(position);
    Some(Hospital {
        id,
        name,
        latitude,
        longitude,
        order,
    })
}

impl Section for Location {
    const KIND: SectionKind = SectionKind::Location;
    type View = LocationView;

    fn resolve(input: SectionInput<'_>, ctx: &ResolveContext) -> Option<LocationView> {
        let src = source_fields(&input);
        let title = ctx.required(first_text(&src, &["subheading", "title"]), TITLE)?;

        let hospitals: Vec<Hospital> = first_list(&src, &["hospitals"])
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter_map(|(index, item)| resolve_hospital(index, item))
            .collect();
        let hospitals = ctx.required_list(hospitals, default_hospitals)?;
        let center = hospitals
            .first()
            .map(|h| [h.latitude, h.longitude])
            .unwrap_or(DEFAULT_CENTER);

        Some(LocationView {
            label: ctx.optional(first_text(&src, &["heading", "label"]), LABEL),
            title,
            description: ctx.optional(first_rich_text(&src, &["description"]), DESCRIPTION),
            hospitals,
            center,
        })
    }
}
