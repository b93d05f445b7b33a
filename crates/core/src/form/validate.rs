/// Contact form validation.
/// Invalid input is rejected locally and never sent upstream.
use std::collections::BTreeMap;

use thiserror::Error;

use super::{FieldValue, REQUIRED_FIELDS, TERMS_FIELD};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(String),
    #[error("email address is invalid")]
    InvalidEmail,
    #[error("terms must be accepted")]
    TermsNotAccepted,
}

/// Validate captured fields in form order, stopping at the first problem.
pub fn validate(fields: &BTreeMap<String, FieldValue>) -> Result<(), ValidationError> {
    for name in REQUIRED_FIELDS {
        match fields.get(name) {
            Some(FieldValue::Text(text)) if !text.trim().is_empty() => {}
            _ => return Err(ValidationError::MissingField(name.to_string())),
        }
    }
    match fields.get("email") {
        Some(FieldValue::Text(email)) if is_email(email) => {}
        _ => return Err(ValidationError::InvalidEmail),
    }
    match fields.get(TERMS_FIELD) {
        Some(FieldValue::Flag(true)) => Ok(()),
        _ => Err(ValidationError::TermsNotAccepted),
    }
}

fn is_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_email("ana@example.com"));
        assert!(is_email(" a@b "));
        assert!(!is_email("ana.example.com"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("a@b@c"));
    }
}
