/// Page slug parsing utilities.
///
/// Page slugs follow the site's routing conventions:
/// - Home: `home` (or empty), served at `/`
/// - Reserved: `hospitals`, `contact`, `faq`, each with a dedicated page
/// - Dynamic: anything else, resolved from the CMS by slug

const HOME: &str = "home";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedRoute {
    Hospitals,
    Contact,
    Faq,
}

impl ReservedRoute {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservedRoute::Hospitals => "hospitals",
            ReservedRoute::Contact => "contact",
            ReservedRoute::Faq => "faq",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSlug {
    Home,
    Reserved(ReservedRoute),
    Dynamic(String),
}

impl PageSlug {
    /// Parse a raw route segment. Whitespace and surrounding slashes are
    /// trimmed and percent-escapes decoded; undecodable input is kept as is.
    pub fn parse(raw: &str) -> Self {
        let decoded = urlencoding::decode(raw.trim())
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| raw.trim().to_string());
        let slug = decoded.trim().trim_matches('/').trim();

        match slug {
            "" | HOME => PageSlug::Home,
            "hospitals" => PageSlug::Reserved(ReservedRoute::Hospitals),
            "contact" => PageSlug::Reserved(ReservedRoute::Contact),
            "faq" => PageSlug::Reserved(ReservedRoute::Faq),
            other => PageSlug::Dynamic(other.to_string()),
        }
    }

    /// The slug to query the CMS with.
    pub fn as_str(&self) -> &str {
        match self {
            PageSlug::Home => HOME,
            PageSlug::Reserved(route) => route.as_str(),
            PageSlug::Dynamic(slug) => slug,
        }
    }

    /// `/home` is never served directly; it redirects to `/`.
    pub fn redirect_target(raw: &str) -> Option<&'static str> {
        (raw.trim().trim_matches('/') == HOME).then_some("/")
    }

    pub fn is_home(&self) -> bool {
        matches!(self, PageSlug::Home)
    }

    pub fn is_reserved(&self) -> bool {
        matches!(self, PageSlug::Reserved(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_home() {
        assert_eq!(PageSlug::parse("home"), PageSlug::Home);
        assert_eq!(PageSlug::parse(" / "), PageSlug::Home);
        assert!(PageSlug::parse("").is_home());
        assert_eq!(PageSlug::redirect_target("/home"), Some("/"));
        assert_eq!(PageSlug::redirect_target("homepage"), None);
    }

    #[test]
    fn parse_reserved() {
        let slug = PageSlug::parse("faq");
        assert_eq!(slug, PageSlug::Reserved(ReservedRoute::Faq));
        assert_eq!(slug.as_str(), "faq");
        assert!(slug.is_reserved());
    }

    #[test]
    fn parse_dynamic_decodes_escapes() {
        let slug = PageSlug::parse("car-t%20therapy");
        assert_eq!(slug, PageSlug::Dynamic("car-t therapy".to_string()));
        assert_eq!(slug.as_str(), "car-t therapy");
        assert_eq!(PageSlug::parse("/clinical-trials/"), PageSlug::Dynamic("clinical-trials".into()));
    }
}
