//! The content resolution procedure shared by every section renderer.

use std::fmt::Debug;

use serde::Serialize;

use crate::block::{ContentBlock, PagePayload, SectionKind};
use crate::error::FetchFailure;
use crate::media::MediaResolver;

/// Tri-state of one content scope.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Ready(T),
    Failed(FetchFailure),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> FetchState<&T> {
        match self {
            FetchState::Loading => FetchState::Loading,
            FetchState::Ready(value) => FetchState::Ready(value),
            FetchState::Failed(f) => FetchState::Failed(f.clone()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FetchState::Loading => "loading",
            FetchState::Ready(_) => "ready",
            FetchState::Failed(_) => "failed",
        }
    }
}

/// Settings every resolver receives.
#[derive(Debug, Clone)]
pub struct ResolveContext {
    pub media: MediaResolver,
    /// Hide sections with missing required content instead of showing defaults.
    pub strict: bool,
}

impl ResolveContext {
    pub fn new(media: MediaResolver, strict: bool) -> Self {
        Self { media, strict }
    }

    pub fn lenient(origin: &str) -> Self {
        Self::new(MediaResolver::new(origin), false)
    }

    pub fn strict(origin: &str) -> Self {
        Self::new(MediaResolver::new(origin), true)
    }

    /// A required field: the resolved value, else the default, or `None` in
    /// strict mode so the caller can bail out with `?`.
    pub fn required(&self, value: Option<String>, default: &str) -> Option<String> {
        match value {
            Some(v) => Some(v),
            None if self.strict => None,
            None => Some(default.to_string()),
        }
    }

    /// A non-required field. Same fallback as [`required`](Self::required),
    /// but the caller stores the `None` instead of hiding the section.
    pub fn optional(&self, value: Option<String>, default: &str) -> Option<String> {
        self.required(value, default)
    }

    /// A required list: real items, else the defaults, or `None` in strict mode.
    pub fn required_list<T>(&self, items: Vec<T>, defaults: impl FnOnce() -> Vec<T>) -> Option<Vec<T>> {
        if !items.is_empty() {
            Some(items)
        } else if self.strict {
            None
        } else {
            Some(defaults())
        }
    }

    /// Pad a list up to `min_len` with the default at each missing index.
    /// Strict mode never pads with placeholders.
    pub fn pad_positional<T: Clone>(&self, mut items: Vec<T>, defaults: &[T], min_len: usize) -> Vec<T> {
        if self.strict || items.is_empty() {
            return items;
        }
        while items.len() < min_len {
            match defaults.get(items.len()) {
                Some(default) => items.push(default.clone()),
                None => break,
            }
        }
        items
    }
}

/// What a section resolver sees: its selected source block (if any) and the
/// rest of the page, for sections that read sibling blocks.
#[derive(Debug, Clone, Copy)]
pub struct SectionInput<'a> {
    pub source: Option<&'a ContentBlock>,
    pub page: &'a [ContentBlock],
}

/// A section renderer's resolution step.
pub trait Section {
    /// Blocks of this kind are picked up from the page payload.
    const KIND: SectionKind;

    type View: Serialize + Debug + Clone + PartialEq;

    fn resolve(input: SectionInput<'_>, ctx: &ResolveContext) -> Option<Self::View>;
}

/// Override if given, else the first block of `kind` in the page.
pub fn select_source<'a>(
    override_block: Option<&'a ContentBlock>,
    page: &'a [ContentBlock],
    kind: SectionKind,
) -> Option<&'a ContentBlock> {
    override_block.or_else(|| page.iter().find(|b| b.kind() == Some(kind)))
}

/// Resolve one section. Nothing is resolved while content is loading, so
/// defaults never flash before the real content arrives.
pub fn resolve_section<S: Section>(
    override_block: Option<&ContentBlock>,
    payload: &FetchState<PagePayload>,
    ctx: &ResolveContext,
) -> Option<S::View> {
    let page: &[ContentBlock] = match payload {
        FetchState::Loading => return None,
        FetchState::Ready(page) => &page.blocks,
        FetchState::Failed(_) => &[],
    };
    let source = select_source(override_block, page, S::KIND);
    S::resolve(SectionInput { source, page }, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::hero::Hero;
    use serde_json::json;

    fn hero_block(title: &str) -> ContentBlock {
        ContentBlock::new(
            "dynamic-zone.hero",
            json!({"sub_heading": title, "image": "/uploads/h.jpg"}),
        )
    }

    fn page(blocks: Vec<ContentBlock>) -> PagePayload {
        PagePayload {
            slug: "home".into(),
            blocks,
            ..Default::default()
        }
    }

    #[test]
    fn loading_always_resolves_to_nothing() {
        let over = hero_block("Override");
        for ctx in [ResolveContext::lenient("https://cms"), ResolveContext::strict("https://cms")] {
            assert_eq!(
                resolve_section::<Hero>(Some(&over), &FetchState::Loading, &ctx),
                None
            );
            assert_eq!(resolve_section::<Hero>(None, &FetchState::Loading, &ctx), None);
        }
    }

    #[test]
    fn override_beats_payload() {
        let ctx = ResolveContext::lenient("https://cms");
        let payload = FetchState::Ready(page(vec![hero_block("From page")]));
        let over = hero_block("Override");
        let view = resolve_section::<Hero>(Some(&over), &payload, &ctx).unwrap();
        assert_eq!(view.title, "Override");
        let view = resolve_section::<Hero>(None, &payload, &ctx).unwrap();
        assert_eq!(view.title, "From page");
    }

    #[test]
    fn failed_fetch_uses_defaults_unless_strict() {
        let failed = FetchState::Failed(FetchFailure {
            status: 503,
            message: "down".into(),
        });
        assert!(resolve_section::<Hero>(None, &failed, &ResolveContext::lenient("https://cms")).is_some());
        assert!(resolve_section::<Hero>(None, &failed, &ResolveContext::strict("https://cms")).is_none());
    }

    #[test]
    fn required_field_rules() {
        let lenient = ResolveContext::lenient("");
        let strict = ResolveContext::strict("");
        assert_eq!(lenient.required(None, "dflt"), Some("dflt".into()));
        assert_eq!(strict.required(None, "dflt"), None);
        assert_eq!(strict.required(Some("x".into()), "dflt"), Some("x".into()));
        assert_eq!(lenient.optional(None, "dflt"), Some("dflt".into()));
        assert_eq!(strict.optional(None, "dflt"), None);
    }

    #[test]
    fn padding_is_positional() {
        let ctx = ResolveContext::lenient("");
        let padded = ctx.pad_positional(vec!["real-0", "real-1"], &["d0", "d1", "d2", "d3"], 4);
        assert_eq!(padded, vec!["real-0", "real-1", "d2", "d3"]);
        let strict = ResolveContext::strict("");
        assert_eq!(strict.pad_positional(vec!["r"], &["d0", "d1"], 2), vec!["r"]);
    }
}
