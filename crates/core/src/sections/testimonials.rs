use serde::Serialize;

use crate::block::SectionKind;
use crate::lookup::{first_rich_text, first_text};
use crate::resolve::{ResolveContext, Section, SectionInput};
use crate::sections::source_fields;

const STORY: &str = "After exhausting options at home, CancerFax connected me to a CAR-T trial in the US. Today, I'm in complete remission. Their team guided my entire journey, from medical coordination to travel logistics.";
const AUTHOR: &str = "- Elena, Spain";

/// A single survivor quote.
pub struct Testimonials;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialsView {
    pub story: String,
    pub author: String,
}

impl Section for Testimonials {
    const KIND: SectionKind = SectionKind::Testimonials;
    type View = TestimonialsView;

    fn resolve(input: SectionInput<'_>, ctx: &ResolveContext) -> Option<TestimonialsView> {
        let src = source_fields(&input);

        let story = first_rich_text(&src, &["survivor_story.story", "survivor_story.data.attributes.story"]);
        let name = first_text(&src, &["survivor_story.name", "survivor_story.data.attributes.name"]);
        let location = first_text(
            &src,
            &["survivor_story.location", "survivor_story.data.attributes.location"],
        );
        let author = match (name, location) {
            (Some(name), Some(location)) => Some(format!("- {name}, {location}")),
            (Some(name), None) => Some(format!("- {name}")),
            (None, _) => None,
        };

        Some(TestimonialsView {
            story: ctx.required(story, STORY)?,
            author: ctx.required(author, AUTHOR)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::ContentBlock;
    use serde_json::json;

    fn resolve(block: &ContentBlock, ctx: &ResolveContext) -> Option<TestimonialsView> {
        Testimonials::resolve(SectionInput { source: Some(block), page: &[] }, ctx)
    }

    #[test]
    fn author_line_from_name_and_location() {
        let block = ContentBlock::new(
            "dynamic-zone.testimonial-slider",
            json!({"survivor_story": {
                "story": [{"type": "paragraph", "children": [{"type": "text", "text": "I am cancer free."}]}],
                "name": "Priya",
                "location": "India"
            }}),
        );
        let view = resolve(&block, &ResolveContext::lenient("")).unwrap();
        assert_eq!(view.story, "I am cancer free.");
        assert_eq!(view.author, "- Priya, India");

        let no_location = ContentBlock::new(
            "dynamic-zone.testimonial-slider",
            json!({"survivor_story": {"story": "Thanks", "name": "Tom"}}),
        );
        assert_eq!(resolve(&no_location, &ResolveContext::lenient("")).unwrap().author, "- Tom");
    }

    #[test]
    fn unenriched_relation_falls_back() {
        // Without the deep populate the relation is just an id reference.
        let block = ContentBlock::new("dynamic-zone.testimonial-slider", json!({"survivor_story": {"id": 3}}));
        let view = resolve(&block, &ResolveContext::lenient("")).unwrap();
        assert_eq!(view.story, STORY);
        assert_eq!(view.author, AUTHOR);
        assert_eq!(resolve(&block, &ResolveContext::strict("")), None);
    }
}
