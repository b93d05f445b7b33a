//! Section renderers.
//!
//! Each submodule defines a zero-sized marker implementing
//! [`Section`](crate::resolve::Section) plus the view model it resolves to.
//! Field candidates are listed in priority order; static defaults live next
//! to the section that uses them.

use serde::Serialize;
use serde_json::Value;

use crate::block::ContentBlock;
use crate::lookup::first_text;
use crate::resolve::{ResolveContext, SectionInput};

pub mod about;
pub mod contact_form;
pub mod get_in_touch;
pub mod hero;
pub mod how_it_works;
pub mod location;
pub mod resources;
pub mod slider;
pub mod testimonials;
pub mod therapies;
pub mod trials;
pub mod trials_about;
pub mod video_testimonials;

pub use about::{About, AboutView, Statistic};
pub use contact_form::{ContactFormView, InquiryOption};
pub use get_in_touch::{GetInTouch, GetInTouchView};
pub use hero::{Hero, HeroView};
pub use how_it_works::{HowItWorks, HowItWorksView, Step};
pub use location::{Hospital, Location, LocationView};
pub use resources::{Article, Resources, ResourcesView};
pub use slider::{Slide, Slider, SliderView};
pub use testimonials::{Testimonials, TestimonialsView};
pub use therapies::{Therapies, TherapiesView, Therapy};
pub use trials::{TrialLink, Trials, TrialsView};
pub use trials_about::{TrialsAbout, TrialsAboutView};
pub use video_testimonials::{VideoTestimonials, VideoTestimonialsView};

/// Field values of the selected source block, or `Null` when there is none.
pub(crate) fn source_fields(input: &SectionInput<'_>) -> Value {
    input
        .source
        .map(ContentBlock::to_value)
        .unwrap_or(Value::Null)
}

/// A call to action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cta {
    pub text: String,
    pub url: String,
}

impl Cta {
    /// Resolve `cta.text`/`cta.URL` with defaults. `None` in strict mode
    /// when no button text is configured.
    pub(crate) fn resolve(
        source: &Value,
        ctx: &ResolveContext,
        default_text: &str,
        default_url: &str,
    ) -> Option<Self> {
        let text = ctx.optional(first_text(source, &["cta.text", "CTAs[0].text"]), default_text)?;
        let url = first_text(source, &["cta.URL", "cta.url", "cta.link", "CTAs[0].URL"])
            .unwrap_or_else(|| default_url.to_string());
        Some(Self { text, url })
    }
}
