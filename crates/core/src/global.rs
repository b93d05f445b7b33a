//! Site-wide view: navigation, footer and the home page.

use serde::Serialize;
use serde_json::Value;

use page_content_path::as_list;

use crate::block::{GlobalPayload, Relation};
use crate::footer::FooterView;
use crate::lookup::{first_list, first_media};
use crate::media::MediaResolver;
use crate::page::{PageView, SeoView};
use crate::resolve::ResolveContext;

/// Served when no logo resolves anywhere.
pub const KNOWN_LOGO_PATH: &str = "/uploads/logo_851ef64fcb.png";

const LOGO_PATHS: &[&str] = &["logo", "logo.image"];

/// Logo URLs after the fallback chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoUrls {
    pub navbar: String,
    pub footer: String,
    pub global: Option<String>,
}

impl LogoUrls {
    /// Each of navbar and footer falls back to the other, then to the
    /// global logo, then to the known upload.
    pub fn resolve(payload: &GlobalPayload, media: &MediaResolver) -> Self {
        let logo_of = |section: Option<&Value>| section.and_then(|s| first_media(s, LOGO_PATHS, media));
        let navbar = logo_of(payload.navbar.as_ref());
        let footer = logo_of(payload.footer.as_ref());
        let global = payload.logo.as_ref().and_then(|l| media.resolve(l));
        let known = || media.absolute(KNOWN_LOGO_PATH).unwrap_or_else(|| KNOWN_LOGO_PATH.to_string());

        let navbar_url = navbar
            .clone()
            .or_else(|| footer.clone())
            .or_else(|| global.clone())
            .unwrap_or_else(known);
        let footer_url = footer.or(navbar).or_else(|| global.clone()).unwrap_or_else(known);

        Self {
            navbar: navbar_url,
            footer: footer_url,
            global,
        }
    }
}

/// Social and contact entries: the site-wide list, else the footer's own.
fn link_items(payload: &GlobalPayload) -> Vec<Value> {
    payload
        .social_media_links
        .as_ref()
        .and_then(as_list)
        .or_else(|| {
            payload
                .footer
                .as_ref()
                .and_then(|f| first_list(f, &["social_media_links"]))
        })
        .map(<[Value]>::to_vec)
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalView {
    pub logos: LogoUrls,
    pub navbar: Option<Value>,
    pub footer: FooterView,
    pub seo: Option<SeoView>,
    pub contact: Option<Value>,
    pub home: Option<PageView>,
    pub degraded: Vec<Relation>,
}

impl GlobalView {
    pub fn build(payload: GlobalPayload, ctx: &ResolveContext) -> Self {
        let logos = LogoUrls::resolve(&payload, &ctx.media);
        let footer = FooterView::resolve(payload.footer.as_ref(), &link_items(&payload), ctx);
        let seo = payload.seo.as_ref().and_then(SeoView::from_value);

        let mut degraded = payload.degraded;
        if let Some(home) = &payload.home {
            degraded.extend(home.degraded.iter().copied());
        }

        Self {
            logos,
            navbar: payload.navbar,
            footer,
            seo,
            contact: payload.contact,
            home: payload.home.map(|home| PageView::build(home, ctx)),
            degraded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footer::SocialLink;
    use serde_json::json;

    const ORIGIN: &str = "https://cms.example.com";

    fn media() -> MediaResolver {
        MediaResolver::new(ORIGIN)
    }

    #[test]
    fn no_logo_anywhere_uses_known_upload() {
        let logos = LogoUrls::resolve(&GlobalPayload::default(), &media());
        let known = format!("{ORIGIN}{KNOWN_LOGO_PATH}");
        assert_eq!(logos.navbar, known);
        assert_eq!(logos.footer, known);
        assert_eq!(logos.global, None);
    }

    #[test]
    fn missing_navbar_logo_borrows_footer() {
        let payload = GlobalPayload {
            navbar: Some(json!({"links": []})),
            footer: Some(json!({"logo": {"data": {"attributes": {"url": "/uploads/footer.png"}}}})),
            logo: Some(json!("/uploads/global.png")),
            ..Default::default()
        };
        let logos = LogoUrls::resolve(&payload, &media());
        assert_eq!(logos.navbar, format!("{ORIGIN}/uploads/footer.png"));
        assert_eq!(logos.footer, format!("{ORIGIN}/uploads/footer.png"));
        assert_eq!(logos.global.as_deref(), Some("https://cms.example.com/uploads/global.png"));
    }

    #[test]
    fn missing_footer_logo_borrows_navbar_before_global() {
        let payload = GlobalPayload {
            navbar: Some(json!({"logo": {"url": "https://cdn.example.com/n.svg"}})),
            logo: Some(json!({"url": "/uploads/global.png"})),
            ..Default::default()
        };
        let logos = LogoUrls::resolve(&payload, &media());
        assert_eq!(logos.footer, "https://cdn.example.com/n.svg");
    }

    #[test]
    fn only_global_logo() {
        let payload = GlobalPayload {
            logo: Some(json!({"url": "/uploads/global.png"})),
            ..Default::default()
        };
        let logos = LogoUrls::resolve(&payload, &media());
        assert_eq!(logos.navbar, format!("{ORIGIN}/uploads/global.png"));
        assert_eq!(logos.footer, logos.navbar);
    }

    #[test]
    fn social_links_come_from_footer() {
        let payload = GlobalPayload {
            footer: Some(json!({"social_media_links": [
                {"link": {"URL": "https://facebook.com/x"}, "image": {"url": "/uploads/fb.svg"}},
                {"image": {"url": "/uploads/orphan.svg"}}
            ]})),
            ..Default::default()
        };
        let view = GlobalView::build(payload, &ResolveContext::lenient(ORIGIN));
        assert_eq!(
            view.footer.social_links,
            vec![SocialLink {
                label: None,
                url: "https://facebook.com/x".into(),
                icon: Some(format!("{ORIGIN}/uploads/fb.svg")),
            }]
        );
        assert_eq!(view.footer.legal_links, crate::footer::default_legal_links());
        assert!(view.home.is_none());
    }
}
