use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use page_content_path::as_i64;

const TAG_PREFIX: &str = "dynamic-zone.";

/// One typed unit of remote page content (a dynamic-zone entry).
///
/// `fields` is always a JSON object; a Strapi `attributes` envelope is
/// flattened into it on construction. Blocks are never mutated after fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentBlock {
    #[serde(rename = "__component")]
    pub kind_tag: String,
    /// Mirrors `fields["id"]`, which is what gets serialized.
    #[serde(skip)]
    pub id: Option<i64>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ContentBlock {
    pub fn new(kind_tag: impl Into<String>, fields: Value) -> Self {
        let fields = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let id = fields.get("id").and_then(as_i64);
        Self {
            kind_tag: kind_tag.into(),
            id,
            fields,
        }
    }

    /// Build a block from a raw dynamic-zone entry. Entries without a type
    /// tag are not blocks.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let mut fields = match obj.get("attributes") {
            Some(Value::Object(attrs)) => {
                let mut merged = attrs.clone();
                if let Some(id) = obj.get("id") {
                    merged.insert("id".into(), id.clone());
                }
                merged
            }
            _ => obj.clone(),
        };
        let tag = match fields.remove("__component") {
            Some(Value::String(tag)) if !tag.trim().is_empty() => tag,
            _ => return None,
        };
        let id = fields.get("id").and_then(as_i64);
        Some(Self {
            kind_tag: tag,
            id,
            fields,
        })
    }

    /// Parse a dynamic zone, skipping malformed entries.
    pub fn list_from_value(value: &Value) -> Vec<Self> {
        value
            .as_array()
            .map(|items| items.iter().filter_map(Self::from_value).collect())
            .unwrap_or_default()
    }

    pub fn kind(&self) -> Option<SectionKind> {
        SectionKind::from_tag(&self.kind_tag)
    }

    /// Fields as a JSON value, suitable for accessor-path evaluation.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Fields plus the type tag, in wire shape.
    pub fn to_wire(&self) -> Value {
        let mut map = self.fields.clone();
        map.insert("__component".into(), Value::String(self.kind_tag.clone()));
        Value::Object(map)
    }
}

/// Section renderers known to the page orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Hero,
    Slider,
    About,
    Statistics,
    Therapies,
    Testimonials,
    VideoTestimonials,
    Trials,
    GetInTouch,
    Location,
    HowItWorks,
    Resources,
}

impl SectionKind {
    pub const ALL: [SectionKind; 12] = [
        SectionKind::Hero,
        SectionKind::Slider,
        SectionKind::About,
        SectionKind::Statistics,
        SectionKind::Therapies,
        SectionKind::Testimonials,
        SectionKind::VideoTestimonials,
        SectionKind::Trials,
        SectionKind::GetInTouch,
        SectionKind::Location,
        SectionKind::HowItWorks,
        SectionKind::Resources,
    ];

    /// Map a block type tag (with or without the `dynamic-zone.` prefix) to a kind.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let name = tag.trim();
        let name = name.strip_prefix(TAG_PREFIX).unwrap_or(name);
        let kind = match name {
            "hero" | "hero-section" => SectionKind::Hero,
            "slider-section" | "clinical-trials-showcase" => SectionKind::Slider,
            "about" | "about-section" => SectionKind::About,
            "statistics" => SectionKind::Statistics,
            "therapy-section" | "innovative-care" => SectionKind::Therapies,
            "testimonial-slider" | "testimony" | "testimonials-section" => SectionKind::Testimonials,
            "testimonials" | "video-testimonials" => SectionKind::VideoTestimonials,
            "trials-section" => SectionKind::Trials,
            "get-in-touch" | "get-in-touch-section" => SectionKind::GetInTouch,
            "location" | "location-section" => SectionKind::Location,
            "how-it-works" | "how-it-works-section" => SectionKind::HowItWorks,
            "resources" | "resources-section" => SectionKind::Resources,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical wire tag.
    pub fn tag(&self) -> &'static str {
        match self {
            SectionKind::Hero => "dynamic-zone.hero",
            SectionKind::Slider => "dynamic-zone.slider-section",
            SectionKind::About => "dynamic-zone.about",
            SectionKind::Statistics => "dynamic-zone.statistics",
            SectionKind::Therapies => "dynamic-zone.therapy-section",
            SectionKind::Testimonials => "dynamic-zone.testimonial-slider",
            SectionKind::VideoTestimonials => "dynamic-zone.testimonials",
            SectionKind::Trials => "dynamic-zone.trials-section",
            SectionKind::GetInTouch => "dynamic-zone.get-in-touch",
            SectionKind::Location => "dynamic-zone.location",
            SectionKind::HowItWorks => "dynamic-zone.how-it-works",
            SectionKind::Resources => "dynamic-zone.resources",
        }
    }
}

/// Relations the primary page query does not deep-populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
    SliderMedia,
    TestimonialStories,
    TherapyImages,
    NavbarLogo,
    FooterLogo,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::SliderMedia => "slider_media",
            Relation::TestimonialStories => "testimonial_stories",
            Relation::TherapyImages => "therapy_images",
            Relation::NavbarLogo => "navbar_logo",
            Relation::FooterLogo => "footer_logo",
        }
    }

    /// The section whose blocks a page-level relation enriches.
    pub fn section(&self) -> Option<SectionKind> {
        match self {
            Relation::SliderMedia => Some(SectionKind::Slider),
            Relation::TestimonialStories => Some(SectionKind::Testimonials),
            Relation::TherapyImages => Some(SectionKind::Therapies),
            Relation::NavbarLogo | Relation::FooterLogo => None,
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fetched page: its ordered blocks plus page-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePayload {
    pub slug: String,
    pub page_id: Option<i64>,
    pub blocks: Vec<ContentBlock>,
    pub seo: Option<Value>,
    /// Supplementary relations that failed to load; their blocks are un-enriched.
    pub degraded: Vec<Relation>,
}

impl PagePayload {
    pub fn first_of(&self, kind: SectionKind) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| b.kind() == Some(kind))
    }
}

/// The site-wide resource: navigation, footer and the home page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalPayload {
    pub navbar: Option<Value>,
    pub footer: Option<Value>,
    pub logo: Option<Value>,
    pub seo: Option<Value>,
    pub contact: Option<Value>,
    pub social_media_links: Option<Value>,
    pub home: Option<PagePayload>,
    pub degraded: Vec<Relation>,
}
