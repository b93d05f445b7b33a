//! Site footer: link columns, office locations, contact details and legal links.

use serde::Serialize;
use serde_json::Value;

use crate::lookup::{first_list, first_media, first_text, unwrap_attributes};
use crate::media::MediaResolver;
use crate::resolve::ResolveContext;

const LOGO_TEXT: &str = "CancerFax";
const DESCRIPTION: &str = "Empowering patients with global access to advanced treatments, trials, and expert healthcare support for a healthier future. CancerFax connects patients with advanced global treatments, clinical trials, expert evaluations.";
const CTA_TITLE: &str = "Explore the Latest Insights in Cancer Research";
const CTA_BUTTON_TEXT: &str = "Connect with Our Experts";
const COPYRIGHT: &str = "Copyright © 2025 CancerFax";
const LOCATION_FLAG: &str = "📍";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterLink {
    pub text: String,
    pub url: String,
}

impl FooterLink {
    fn new(text: &str, url: &str) -> Self {
        Self {
            text: text.to_string(),
            url: url.to_string(),
        }
    }

    fn resolve(item: &Value) -> Option<Self> {
        let item = unwrap_attributes(item);
        Some(Self {
            text: first_text(item, &["text", "label"])?,
            url: first_text(item, &["URL", "url", "link"]).unwrap_or_else(|| "#".into()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterColumn {
    pub title: Option<String>,
    pub links: Vec<FooterLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterLocation {
    pub flag: String,
    pub country: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactKind {
    Email,
    Phone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactItem {
    pub kind: ContactKind,
    pub text: String,
    pub url: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub label: Option<String>,
    pub url: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterView {
    pub logo_text: Option<String>,
    pub description: Option<String>,
    pub cta_title: Option<String>,
    pub cta_button_text: Option<String>,
    pub copyright: Option<String>,
    pub columns: Vec<FooterColumn>,
    pub locations: Vec<FooterLocation>,
    pub contacts: Vec<ContactItem>,
    pub social_links: Vec<SocialLink>,
    pub legal_links: Vec<FooterLink>,
}

fn links(items: &[(&str, &str)]) -> Vec<FooterLink> {
    items.iter().map(|(text, url)| FooterLink::new(text, url)).collect()
}

pub fn default_columns() -> Vec<FooterColumn> {
    let column = |title: Option<&str>, items: &[(&str, &str)]| FooterColumn {
        title: title.map(str::to_string),
        links: links(items),
    };
    vec![
        column(
            Some("Quick Links"),
            &[
                ("About Us", "#about"),
                ("Blog", "#blog"),
                ("Hospitals", "#hospitals"),
                ("Doctors", "#doctors"),
                ("Cancer Updates", "#updates"),
                ("Contact Us", "#contact"),
                ("FAQ's", "#faq"),
                ("Stories", "#stories"),
            ],
        ),
        column(
            Some("Treatments"),
            &[
                ("Liver Cancer", "#liver"),
                ("Lung Cancer", "#lung"),
                ("Stomach Cancer", "#stomach"),
                ("Throat Cancer", "#throat"),
                ("Thyroid Cancer", "#thyroid"),
                ("Anal Cancer", "#anal"),
                ("Blood Cancer", "#blood"),
                ("Breast Cancer", "#breast"),
                ("Cervical Cancer", "#cervical"),
                ("Colorectal Cancer", "#colorectal"),
            ],
        ),
        column(
            None,
            &[
                ("Cancer Treatment In The USA", "#"),
                ("Proton Therapy In Singapore", "#"),
                ("CAR T-Cell Therapy In Israel", "#"),
                ("CAR T-Cell Therapy In China", "#"),
                ("CAR T-Cell Therapy In India", "#"),
                ("CAR T-Cell Therapy In Malaysia", "#"),
                ("CAR T-Cell Therapy In Korea", "#"),
                ("CAR T-Cell Therapy In Singapore", "#"),
                ("Cancer Treatment In India", "#"),
                ("CAR T-Cell Therapy In Autoimmune Disorders", "#"),
            ],
        ),
        column(
            None,
            &[
                ("Cancer Treatment In South-Korea", "#"),
                ("Clinical Trials", "#"),
                ("Lymphoma Treatment In India", "#"),
                ("Leukemia Treatment In India", "#"),
                ("Cancer Treatment Abroad", "#"),
                ("Blood Cancer Treatment In India", "#"),
                ("FUCASO Treatment For Multiple Myeloma", "#"),
                ("CAR T-Cell Therapy Clinical Trials In China", "#"),
                ("Cancer Treatment In China", "#"),
                ("Free Cancer Treatment In China", "#"),
            ],
        ),
    ]
}

pub fn default_locations() -> Vec<FooterLocation> {
    let location = |flag: &str, country: &str, address: &str, phone: &str| FooterLocation {
        flag: flag.to_string(),
        country: country.to_string(),
        address: Some(address.to_string()),
        phone: Some(phone.to_string()),
    };
    vec![
        location("🇨🇳", "China (Beijing)", "12th Floor, Gobroad Healthcare, Leeza Soho, Bei Jing Shi, Fengtai Distt. Li Ze Lu, Beijing - 100070,", "(+86) 182 1759 2149"),
        location("🇮🇳", "India (Hyderabad)", "Dr Bharat Patodiya, 4th Floor, Pi Cancer Care, Above Pi Electronics, Indira Nagar, Gachibowli, Hyderabad, India", "(+91) 83741 90429"),
        location("🇨🇳", "China (Shanghai)", "Tina Qian, 1st Floor, No. 373, Lane 1555, Jinshajiang, Shanghai, 201803", "(+86) 182 1759 2149"),
        location("🇭🇰", "Hong Kong", "Tower 1, 2/F, Tern Centre, 237 Queen's Road Central, Sheung Wan, Hong Kong", "(+852) 6428 1793"),
        location("🇷🇴", "Romania", "Andreea Milca\nBulevardul Lascăr Catargiu, Nr. 30, București", "(+40) 745 040 622"),
        location("🇰🇭", "Cambodia", "Dr Pheng Bora (Oncologist and Hematologist), #55B, rue 225, Sangkat Dépo II, Khan Toulkok, Phnom Penh, Cambodia", "(+40) 745 040 622"),
    ]
}

pub fn default_contacts() -> Vec<ContactItem> {
    [
        (ContactKind::Email, "info@cancerfax.com"),
        (ContactKind::Phone, "(+1) 213 789 56 55"),
        (ContactKind::Phone, "(+91) 96 1588 1588"),
    ]
    .into_iter()
    .map(|(kind, text)| ContactItem {
        kind,
        text: text.to_string(),
        url: text.to_string(),
        icon: None,
    })
    .collect()
}

pub fn default_social_links() -> Vec<SocialLink> {
    ["Facebook", "YouTube", "LinkedIn", "Instagram", "Twitter"]
        .into_iter()
        .map(|label| SocialLink {
            label: Some(label.to_string()),
            url: "#".to_string(),
            icon: None,
        })
        .collect()
}

pub fn default_legal_links() -> Vec<FooterLink> {
    links(&[
        ("Terms of Service", "#"),
        ("Privacy Policy", "#"),
        ("Refund Policy", "#"),
        ("Cookies", "#"),
    ])
}

/// Columns without any link are left out.
fn resolve_column(item: &Value) -> Option<FooterColumn> {
    let item = unwrap_attributes(item);
    let links: Vec<FooterLink> = first_list(item, &["links"])
        .unwrap_or_default()
        .iter()
        .filter_map(FooterLink::resolve)
        .collect();
    (!links.is_empty()).then(|| FooterColumn {
        title: first_text(item, &["title"]),
        links,
    })
}

fn resolve_location(item: &Value) -> Option<FooterLocation> {
    let item = unwrap_attributes(item);
    let country = first_text(item, &["country"])?;
    let phone = match (
        first_text(item, &["phone_country_code"]),
        first_text(item, &["phone_number"]),
    ) {
        (Some(code), Some(number)) => Some(format!("({code}) {number}")),
        _ => first_text(item, &["phone", "whatsapp_number"]),
    };
    Some(FooterLocation {
        flag: first_text(item, &["flag"]).unwrap_or_else(|| LOCATION_FLAG.to_string()),
        country,
        address: first_text(item, &["address"]),
        phone,
    })
}

fn link_text(item: &Value) -> Option<String> {
    first_text(item, &["link.text"])
}

fn is_contact(text: &str) -> bool {
    text.contains('@') || text.contains('+')
}

fn resolve_contact(item: &Value, media: &MediaResolver) -> Option<ContactItem> {
    let item = unwrap_attributes(item);
    let text = link_text(item).filter(|t| is_contact(t))?;
    Some(ContactItem {
        kind: if text.contains('@') { ContactKind::Email } else { ContactKind::Phone },
        url: first_text(item, &["link.URL", "link.url"]).unwrap_or_else(|| text.clone()),
        icon: first_media(item, &["image", "icon"], media),
        text,
    })
}

fn resolve_social(item: &Value, media: &MediaResolver) -> Option<SocialLink> {
    let item = unwrap_attributes(item);
    let label = link_text(item);
    if label.as_deref().is_some_and(is_contact) {
        return None;
    }
    Some(SocialLink {
        url: first_text(item, &["link.URL", "link.url", "link", "url"])?,
        icon: first_media(item, &["image", "icon"], media),
        label,
    })
}

/// Strict mode leaves an empty list empty.
fn or_defaults<T>(ctx: &ResolveContext, items: Vec<T>, defaults: fn() -> Vec<T>) -> Vec<T> {
    ctx.required_list(items, defaults).unwrap_or_default()
}

impl FooterView {
    /// `links` is the combined social and contact list; entries whose link
    /// text looks like an email address or phone number are contacts.
    pub fn resolve(footer: Option<&Value>, links: &[Value], ctx: &ResolveContext) -> Self {
        let footer = footer.unwrap_or(&Value::Null);
        let list = |candidates: &[&str]| -> Vec<Value> {
            first_list(footer, candidates).map(<[Value]>::to_vec).unwrap_or_default()
        };

        let columns: Vec<FooterColumn> = list(&["footer_columns", "columns"])
            .iter()
            .filter_map(resolve_column)
            .collect();
        let locations: Vec<FooterLocation> = list(&["locations"]).iter().filter_map(resolve_location).collect();
        let legal_links: Vec<FooterLink> = list(&["policy_links"]).iter().filter_map(FooterLink::resolve).collect();
        let contacts: Vec<ContactItem> = links.iter().filter_map(|i| resolve_contact(i, &ctx.media)).collect();
        let social_links: Vec<SocialLink> = links.iter().filter_map(|i| resolve_social(i, &ctx.media)).collect();

        Self {
            logo_text: ctx.optional(first_text(footer, &["logo.name"]), LOGO_TEXT),
            description: ctx.optional(first_text(footer, &["description"]), DESCRIPTION),
            cta_title: ctx.optional(first_text(footer, &["footer_bottom_text"]), CTA_TITLE),
            cta_button_text: ctx.optional(first_text(footer, &["cta.text"]), CTA_BUTTON_TEXT),
            copyright: ctx.optional(first_text(footer, &["copyright"]), COPYRIGHT),
            columns: or_defaults(ctx, columns, default_columns),
            locations: or_defaults(ctx, locations, default_locations),
            contacts: or_defaults(ctx, contacts, default_contacts),
            social_links: or_defaults(ctx, social_links, default_social_links),
            legal_links: or_defaults(ctx, legal_links, default_legal_links),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ORIGIN: &str = "https://cms.example.com";

    fn footer() -> Value {
        json!({
            "description": "Care across borders.",
            "copyright": "© CancerFax",
            "footer_columns": [
                {"title": "Company", "links": [{"text": "About", "URL": "/about"}, {"text": ""}]},
                {"title": "Empty", "links": []},
                {"links": [{"text": "Trials"}]}
            ],
            "locations": [
                {"country": "India", "phone_country_code": "+91", "phone_number": "83741 90429"},
                {"address": "Nowhere"},
                {"country": "Romania", "flag": "🇷🇴", "whatsapp_number": "+40 745"}
            ],
            "policy_links": [{"text": "Privacy", "URL": "/privacy"}]
        })
    }

    fn social_and_contact() -> Vec<Value> {
        vec![
            json!({"link": {"text": "info@example.com", "URL": "mailto:info@example.com"}, "image": {"url": "/uploads/mail.svg"}}),
            json!({"link": {"text": "(+1) 555 0100"}}),
            json!({"link": {"text": "Facebook", "URL": "https://facebook.com/x"}, "image": {"url": "/uploads/fb.svg"}}),
        ]
    }

    #[test]
    fn columns_and_locations_drop_incomplete_entries() {
        let view = FooterView::resolve(Some(&footer()), &[], &ResolveContext::lenient(ORIGIN));
        assert_eq!(
            view.columns,
            vec![
                FooterColumn {
                    title: Some("Company".into()),
                    links: vec![FooterLink::new("About", "/about")],
                },
                FooterColumn {
                    title: None,
                    links: vec![FooterLink::new("Trials", "#")],
                },
            ]
        );
        assert_eq!(view.locations.len(), 2);
        assert_eq!(view.locations[0].flag, LOCATION_FLAG);
        assert_eq!(view.locations[0].phone.as_deref(), Some("(+91) 83741 90429"));
        assert_eq!(view.locations[1].phone.as_deref(), Some("+40 745"));
        assert_eq!(view.legal_links, vec![FooterLink::new("Privacy", "/privacy")]);
        assert_eq!(view.description.as_deref(), Some("Care across borders."));
        assert_eq!(view.cta_title.as_deref(), Some(CTA_TITLE));
    }

    #[test]
    fn contact_items_are_split_from_social_links() {
        let view = FooterView::resolve(None, &social_and_contact(), &ResolveContext::lenient(ORIGIN));
        assert_eq!(view.contacts.len(), 2);
        assert_eq!(view.contacts[0].kind, ContactKind::Email);
        assert_eq!(view.contacts[0].url, "mailto:info@example.com");
        assert_eq!(view.contacts[0].icon.as_deref(), Some("https://cms.example.com/uploads/mail.svg"));
        assert_eq!(view.contacts[1].kind, ContactKind::Phone);
        assert_eq!(view.contacts[1].url, "(+1) 555 0100");
        assert_eq!(
            view.social_links,
            vec![SocialLink {
                label: Some("Facebook".into()),
                url: "https://facebook.com/x".into(),
                icon: Some("https://cms.example.com/uploads/fb.svg".into()),
            }]
        );
    }

    #[test]
    fn empty_footer_uses_defaults_unless_strict() {
        let view = FooterView::resolve(None, &[], &ResolveContext::lenient(ORIGIN));
        assert_eq!(view.columns, default_columns());
        assert_eq!(view.locations, default_locations());
        assert_eq!(view.contacts, default_contacts());
        assert_eq!(view.social_links, default_social_links());
        assert_eq!(view.legal_links, default_legal_links());
        assert_eq!(view.copyright.as_deref(), Some(COPYRIGHT));
        assert_eq!(view.logo_text.as_deref(), Some(LOGO_TEXT));

        let strict = FooterView::resolve(None, &[], &ResolveContext::strict(ORIGIN));
        assert!(strict.columns.is_empty());
        assert!(strict.locations.is_empty());
        assert_eq!(strict.description, None);
        assert_eq!(strict.copyright, None);
    }
}
