//! Contact form capture and submission.

pub mod validate;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::GatewayError;

pub use validate::{validate, ValidationError};

/// Text fields, in the order they appear on the form.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "firstName",
    "lastName",
    "email",
    "phone",
    "zipCode",
    "inquiryType",
    "message",
];

pub const TERMS_FIELD: &str = "agreeToTerms";

/// How long a success stays visible before the form returns to idle.
pub const RESET_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    /// Scalars only; numbers are kept as text.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(FieldValue::Text(text.clone())),
            Value::Bool(flag) => Some(FieldValue::Flag(*flag)),
            Value::Number(n) => Some(FieldValue::Text(n.to_string())),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(text) => Value::String(text.clone()),
            FieldValue::Flag(flag) => Value::Bool(*flag),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<bool> for FieldValue {
    fn from(flag: bool) -> Self {
        FieldValue::Flag(flag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum SubmissionStatus {
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

/// Where submissions go.
#[async_trait]
pub trait FormSubmitter: Send + Sync {
    async fn submit(&self, fields: &Map<String, Value>) -> Result<(), GatewayError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Upstream(#[from] GatewayError),
}

/// Locally captured form state plus its submission status.
#[derive(Debug)]
pub struct ContactForm {
    fields: BTreeMap<String, FieldValue>,
    status: Arc<watch::Sender<SubmissionStatus>>,
    reset: Option<JoinHandle<()>>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        let (status, _) = watch::channel(SubmissionStatus::Idle);
        Self {
            fields: blank_fields(),
            status: Arc::new(status),
            reset: None,
        }
    }

    /// Capture every scalar entry of a JSON object.
    pub fn from_json(values: &Map<String, Value>) -> Self {
        let mut form = Self::new();
        for (name, value) in values {
            if let Some(value) = FieldValue::from_json(value) {
                form.set(name, value);
            }
        }
        form
    }

    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.fields.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.status.subscribe()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(&self.fields)
    }

    /// Flat payload, exactly as captured.
    pub fn to_payload(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect()
    }

    /// Validate, then send the whole field map in one request.
    ///
    /// Invalid input leaves the status untouched. On success the fields are
    /// cleared and the status returns from `Succeeded` to `Idle` after
    /// [`RESET_DELAY`], unless something else has changed it first.
    pub async fn submit(&mut self, submitter: &dyn FormSubmitter) -> Result<(), SubmitError> {
        self.validate()?;
        if let Some(reset) = self.reset.take() {
            reset.abort();
        }

        self.status.send_replace(SubmissionStatus::Pending);
        match submitter.submit(&self.to_payload()).await {
            Ok(()) => {
                info!(fields = self.fields.len(), "contact form submitted");
                self.fields = blank_fields();
                self.status.send_replace(SubmissionStatus::Succeeded);
                self.reset = Some(spawn_reset(self.status.clone()));
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "contact form submission failed");
                self.status.send_replace(SubmissionStatus::Failed(err.to_string()));
                Err(err.into())
            }
        }
    }
}

impl Drop for ContactForm {
    fn drop(&mut self) {
        if let Some(reset) = self.reset.take() {
            reset.abort();
        }
    }
}

fn blank_fields() -> BTreeMap<String, FieldValue> {
    let mut fields: BTreeMap<String, FieldValue> = REQUIRED_FIELDS
        .iter()
        .map(|name| (name.to_string(), FieldValue::Text(String::new())))
        .collect();
    fields.insert(TERMS_FIELD.to_string(), FieldValue::Flag(false));
    fields
}

fn spawn_reset(status: Arc<watch::Sender<SubmissionStatus>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(RESET_DELAY).await;
        status.send_if_modified(|current| {
            if *current == SubmissionStatus::Succeeded {
                *current = SubmissionStatus::Idle;
                true
            } else {
                false
            }
        });
    })
}
