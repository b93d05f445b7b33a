//! Media URL resolution.
//!
//! A media reference may be a bare path, an absolute URL, or an object
//! wrapping the path at one of several nesting depths. Resolution tries the
//! shapes in a fixed order and never fails on unexpected input.

use serde_json::Value;

use page_content_path::{get, is_blank};

const MAX_DEPTH: usize = 8;
const UPLOADS_PREFIX: &str = "/uploads";

/// Turns media references into absolute URLs against a configured origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaResolver {
    origin: String,
}

impl MediaResolver {
    pub fn new(origin: impl Into<String>) -> Self {
        let origin = origin.into();
        Self {
            origin: origin.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Prefix a path with the origin. Absolute URLs pass through unchanged.
    pub fn absolute(&self, path: &str) -> Option<String> {
        let path = path.trim();
        if is_blank(path) {
            return None;
        }
        if is_absolute(path) {
            return Some(path.to_string());
        }
        Some(format!("{}/{}", self.origin, path.trim_start_matches('/')))
    }

    /// Resolve any media reference to a single absolute URL.
    pub fn resolve(&self, media: &Value) -> Option<String> {
        self.resolve_at(media, 0)
    }

    fn resolve_at(&self, media: &Value, depth: usize) -> Option<String> {
        if depth > MAX_DEPTH {
            return None;
        }
        match media {
            Value::String(path) => self.absolute(path),
            Value::Array(items) => items
                .first()
                .and_then(|first| self.resolve_at(first, depth + 1)),
            Value::Object(map) => {
                let text_at = |path: &str| get(media, path).and_then(Value::as_str);

                if let Some(url) = text_at("url").and_then(|u| self.absolute(u)) {
                    return Some(url);
                }
                if let Some(url) = text_at("data.attributes.url").and_then(|u| self.absolute(u)) {
                    return Some(url);
                }
                if let Some(url) = text_at("attributes.url").and_then(|u| self.absolute(u)) {
                    return Some(url);
                }
                if let (Some(hash), Some(name)) = (text_at("hash"), text_at("name")) {
                    if !is_blank(hash) && !is_blank(name) {
                        return self.absolute(&format!(
                            "{UPLOADS_PREFIX}/{}_{}",
                            hash.trim(),
                            name.trim()
                        ));
                    }
                }
                // Less common envelopes seen on relation fields.
                ["data", "logo", "src"]
                    .iter()
                    .filter_map(|key| map.get(*key))
                    .find_map(|nested| self.resolve_at(nested, depth + 1))
            }
            _ => None,
        }
    }
}

fn is_absolute(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("//")
        || lower.starts_with("data:")
        || lower.starts_with("blob:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolver() -> MediaResolver {
        MediaResolver::new("https://cms.example.org/")
    }

    #[test]
    fn every_supported_shape_gives_the_same_url() {
        let expected = Some("https://cms.example.org/uploads/hero_1a2b.jpg".to_string());
        let shapes = [
            json!("/uploads/hero_1a2b.jpg"),
            json!({"url": "/uploads/hero_1a2b.jpg"}),
            json!({"data": {"attributes": {"url": "/uploads/hero_1a2b.jpg"}}}),
            json!({"attributes": {"url": "uploads/hero_1a2b.jpg"}}),
            json!([{"url": "/uploads/hero_1a2b.jpg"}, {"url": "/uploads/other.jpg"}]),
            json!({"hash": "hero_1a2b", "name": "jpg", "ext": ".jpg"}),
        ];
        // The hash+name shape synthesizes `{hash}_{name}`.
        for shape in &shapes[..5] {
            assert_eq!(resolver().resolve(shape), expected, "shape {shape}");
        }
        assert_eq!(
            resolver().resolve(&shapes[5]),
            Some("https://cms.example.org/uploads/hero_1a2b_jpg".to_string())
        );
    }

    #[test]
    fn absolute_urls_pass_through() {
        let url = "https://images.unsplash.com/photo-1?w=800";
        assert_eq!(resolver().resolve(&json!(url)), Some(url.to_string()));
        assert_eq!(
            resolver().resolve(&json!({"url": "//cdn.example.org/a.png"})),
            Some("//cdn.example.org/a.png".to_string())
        );
    }

    #[test]
    fn priority_is_positional() {
        let media = json!({
            "url": "/uploads/direct.png",
            "data": {"attributes": {"url": "/uploads/nested.png"}}
        });
        assert_eq!(
            resolver().resolve(&media),
            Some("https://cms.example.org/uploads/direct.png".to_string())
        );
    }

    #[test]
    fn data_array_envelope() {
        let media = json!({"data": [{"attributes": {"url": "/uploads/first.png"}}]});
        assert_eq!(
            resolver().resolve(&media),
            Some("https://cms.example.org/uploads/first.png".to_string())
        );
    }

    #[test]
    fn never_fails_on_odd_input() {
        let r = resolver();
        assert_eq!(r.resolve(&json!(null)), None);
        assert_eq!(r.resolve(&json!(17)), None);
        assert_eq!(r.resolve(&json!(true)), None);
        assert_eq!(r.resolve(&json!("   ")), None);
        assert_eq!(r.resolve(&json!("undefined")), None);
        assert_eq!(r.resolve(&json!([])), None);
        assert_eq!(r.resolve(&json!({"url": 5, "data": 3})), None);
        assert_eq!(r.resolve(&json!({"hash": "abc"})), None);
    }

    #[test]
    fn deep_nesting_is_bounded() {
        let mut media = json!("/uploads/deep.png");
        for _ in 0..20 {
            media = json!({ "data": media });
        }
        assert_eq!(resolver().resolve(&media), None);
    }
}
