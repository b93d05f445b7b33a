use serde::Serialize;

/// Failures talking to the content API.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("page not found: {0}")]
    NotFound(String),

    #[error("content API returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed content payload: {0}")]
    Decode(String),
}

impl GatewayError {
    /// HTTP-status-like code describing the failure.
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::NotFound(_) => 404,
            GatewayError::Http { status, .. } => *status,
            GatewayError::Transport(err) => err.status().map(|s| s.as_u16()).unwrap_or(503),
            GatewayError::Decode(_) => 502,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound(_)) || self.status_code() == 404
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

/// Cloneable summary of a failed fetch, kept in a [`crate::resolve::FetchState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchFailure {
    pub status: u16,
    pub message: String,
}

impl From<&GatewayError> for FetchFailure {
    fn from(err: &GatewayError) -> Self {
        Self {
            status: err.status_code(),
            message: err.to_string(),
        }
    }
}
