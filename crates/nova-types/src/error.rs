use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NovaError {
    /// Bad credentials or an auth response carrying no usable credential
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Registration rejected by the backend; `fields` maps field name to message
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        fields: BTreeMap<String, String>,
    },

    /// An authenticated call came back 401
    #[error("Session expired")]
    SessionExpired,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JS interop error: {0}")]
    JsInterop(String),
}

impl NovaError {
    pub fn validation(message: impl Into<String>) -> Self {
        NovaError::Validation {
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, NovaError::SessionExpired)
    }
}

impl From<serde_json::Error> for NovaError {
    fn from(e: serde_json::Error) -> Self {
        NovaError::Serialization(e.to_string())
    }
}
