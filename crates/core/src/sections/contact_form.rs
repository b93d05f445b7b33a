use serde::Serialize;
use serde_json::Value;

use crate::lookup::{first_text, unwrap_attributes};

/// `(field name, label key, default label, placeholder key, default placeholder)`
const FIELDS: &[(&str, &str, &str, &str, &str)] = &[
    ("firstName", "firstNameLabel", "First Name*", "firstNamePlaceholder", "Enter first name"),
    ("lastName", "lastNameLabel", "Last Name*", "lastNamePlaceholder", "Enter last name"),
    ("email", "emailLabel", "Email Address*", "emailPlaceholder", "Enter email address"),
    ("phone", "phoneLabel", "Phone Number*", "phonePlaceholder", "Enter phone number"),
    ("zipCode", "zipCodeLabel", "Zip code*", "zipCodePlaceholder", "Enter zip code"),
    ("inquiryType", "inquiryTypeLabel", "Inquiry type*", "inquiryTypePlaceholder", "Select Inquiry type"),
    ("message", "messageLabel", "Message*", "messagePlaceholder", "Write your message"),
];

const DEFAULT_INQUIRY_TYPES: &[(&str, &str)] = &[
    ("General Inquiry", "general"),
    ("Treatment Information", "treatment"),
    ("Appointment Request", "appointment"),
    ("Support", "support"),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryOption {
    pub name: String,
    pub value: String,
}

/// Labels and options for the contact form. The form stays usable without
/// any CMS content, so every field falls back to its default even in strict
/// mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFormView {
    pub fields: Vec<FormField>,
    pub inquiry_types: Vec<InquiryOption>,
    pub terms_text: String,
    pub terms_link_text: String,
    pub terms_link: String,
    pub button_text: String,
}

impl ContactFormView {
    pub fn resolve(section: Option<&Value>, inquiry_types: &[Value]) -> Self {
        let null = Value::Null;
        let src = section.map(unwrap_attributes).unwrap_or(&null);
        let text = |key: &str, default: &str| first_text(src, &[key]).unwrap_or_else(|| default.to_string());

        let fields = FIELDS
            .iter()
            .map(|&(name, label_key, label, placeholder_key, placeholder)| FormField {
                name: name.into(),
                label: text(label_key, label),
                placeholder: text(placeholder_key, placeholder),
            })
            .collect();

        let mut options: Vec<InquiryOption> = inquiry_types
            .iter()
            .filter_map(|raw| {
                let item = unwrap_attributes(raw);
                let name = first_text(item, &["name"])?;
                let value = first_text(item, &["value"]).unwrap_or_else(|| name.clone());
                Some(InquiryOption { name, value })
            })
            .collect();
        if options.is_empty() {
            options = DEFAULT_INQUIRY_TYPES
                .iter()
                .map(|&(name, value)| InquiryOption {
                    name: name.into(),
                    value: value.into(),
                })
                .collect();
        }

        Self {
            fields,
            inquiry_types: options,
            terms_text: text("termsText", "By reaching out to us, you agree to our"),
            terms_link_text: text("termsLinkText", "Terms & Condition"),
            terms_link: text("termsLink", "#"),
            button_text: text("buttonText", "Send Message"),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }
}
