use serde::Serialize;

use crate::block::SectionKind;
use crate::lookup::{first_media, first_text};
use crate::resolve::{ResolveContext, Section, SectionInput};
use crate::sections::source_fields;

const LABEL: &str = "TESTIMONIALS";
const TITLE: &str = "Watch Real Patient Stories in Our Video Testimonials";
const BACKGROUND: &str = "../images/video-testimonial-img.jpg";

pub struct VideoTestimonials;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoTestimonialsView {
    pub label: Option<String>,
    pub title: String,
    pub background: Option<String>,
    pub video_url: String,
}

impl Section for VideoTestimonials {
    const KIND: SectionKind = SectionKind::VideoTestimonials;
    type View = VideoTestimonialsView;

    fn resolve(input: SectionInput<'_>, ctx: &ResolveContext) -> Option<VideoTestimonialsView> {
        let src = source_fields(&input);
        let title = ctx.required(first_text(&src, &["sub_heading", "title"]), TITLE)?;

        // The poster frame is stored on `featuredVideo`.
        let background = first_media(&src, &["featuredVideo", "backgroundImage"], &ctx.media)
            .or_else(|| ctx.optional(None, BACKGROUND));

        Some(VideoTestimonialsView {
            label: ctx.optional(first_text(&src, &["heading", "label"]), LABEL),
            title,
            background,
            video_url: first_text(&src, &["videoUrl", "cta.URL"]).unwrap_or_else(|| "#".into()),
        })
    }
}
