use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde_json::Value;

use crate::block::SectionKind;
use crate::lookup::{first_list, first_media, first_text, unwrap_attributes};
use crate::resolve::{ResolveContext, Section, SectionInput};
use crate::sections::{source_fields, Cta};

const LABEL: &str = "RESOURCES";
const TITLE: &str = "Explore the Latest Insights in Cancer Research";
const BUTTON_TEXT: &str = "View all Insights";
const BUTTON_URL: &str = "/blog";

const AUTHOR: &str = "Author name goes here";
const CATEGORY: &str = "Research";
const PUBLISHED: &str = "May 27, 2024";
const READ_MINUTES: &str = "7";

/// One featured card plus three small ones.
pub const MIN_ARTICLES: usize = 4;

/// Latest blog insights.
pub struct Resources;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub published_at: String,
    pub read_time: String,
    pub category: String,
    pub image: Option<String>,
    pub featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesView {
    pub label: Option<String>,
    pub title: String,
    pub view_all: Option<Cta>,
    pub articles: Vec<Article>,
}

pub fn default_articles() -> Vec<Article> {
    [
        ("Atezolizumab Plus Chemotherapy Improves Survival in Advanced-Stage Small-Cell Lung Cancer: Insights from the IMpower133 Study", "https://images.unsplash.com/photo-1576091160399-112ba8d25d1d?w=800"),
        ("Darolutamide is approved by the USFDA for metastatic castration-sensitive prostate cancer", "https://images.unsplash.com/photo-1579154204601-01588f351e67?w=400"),
        ("Taletrectinib is approved by the USFDA for ROS1-positive non-small cell lung cancer", "https://images.unsplash.com/photo-1582719508461-905c673771fd?w=400"),
        ("Neoadjuvant and adjuvant pembrolizumab is approved by the USFDA for resectable locally adv...", "https://images.unsplash.com/photo-1631217868264-e5b90bb7e133?w=400"),
    ]
    .iter()
    .zip(1..)
    .map(|(&(title, image), id)| Article {
        id,
        title: title.into(),
        author_name: AUTHOR.into(),
        author_avatar: None,
        published_at: PUBLISHED.into(),
        read_time: format!("{READ_MINUTES} min read"),
        category: CATEGORY.into(),
        image: Some(image.into()),
        featured: id == 1,
    })
    .collect()
}

/// Long US-style date, e.g. `May 27, 2024`. Unparseable input is shown as is.
pub fn format_published(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%B %-d, %Y").to_string();
    }
    let date_part = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn resolve_article(
    index: usize,
    raw: &Value,
    defaults: &[Article],
    ctx: &ResolveContext,
) -> Option<Article> {
    let id = raw
        .get("id")
        .and_then(page_content_path::as_i64)
        .unwrap_or(index as i64 + 1);
    let item = unwrap_attributes(raw);
    let title = first_text(item, &["title", "heading", "name", "headline"])?;

    let author_name = first_text(
        item,
        &["author.firstName", "author.name", "author.fullName", "authorName", "author"],
    )
    .unwrap_or_else(|| AUTHOR.into());
    let author_avatar = first_media(item, &["author.avatar", "authorAvatar"], &ctx.media);
    let image = first_media(item, &["image", "featuredImage", "coverImage", "thumbnail"], &ctx.media)
        .or_else(|| {
            defaults
                .get(index)
                .filter(|_| !ctx.strict)
                .and_then(|a| a.image.clone())
        });
    let category = first_text(item, &["category", "category.name", "tag", "type"])
        .unwrap_or_else(|| CATEGORY.into());
    let published_at = first_text(item, &["publishedAt", "published_at", "date", "createdAt"])
        .map(|d| format_published(&d))
        .unwrap_or_else(|| PUBLISHED.into());
    let minutes = first_text(item, &["readTime", "read_time", "readingTime"])
        .unwrap_or_else(|| READ_MINUTES.into());

    Some(Article {
        id,
        title,
        author_name,
        author_avatar,
        published_at,
        read_time: format!("{minutes} min read"),
        category,
        image,
        featured: false,
    })
}

impl Section for Resources {
    const KIND: SectionKind = SectionKind::Resources;
    type View = ResourcesView;

    fn resolve(input: SectionInput<'_>, ctx: &ResolveContext) -> Option<ResourcesView> {
        let src = source_fields(&input);
        let title = ctx.required(first_text(&src, &["subheading", "title"]), TITLE)?;

        let defaults = default_articles();
        let articles: Vec<Article> = first_list(&src, &["resources", "blogs"])
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter_map(|(index, item)| resolve_article(index, item, &defaults, ctx))
            .collect();
        let articles = ctx.required_list(articles, || defaults.clone())?;
        let mut articles = ctx.pad_positional(articles, &defaults, MIN_ARTICLES);
        for (index, article) in articles.iter_mut().enumerate() {
            article.featured = index == 0;
        }

        Some(ResourcesView {
            label: ctx.optional(first_text(&src, &["heading", "label"]), LABEL),
            title,
            view_all: Cta::resolve(&src, ctx, BUTTON_TEXT, BUTTON_URL),
            articles,
        })
    }
}
