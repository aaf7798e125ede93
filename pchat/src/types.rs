//! Chat request and result values exchanged with the boundary layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Blank or absent means "use the registry default".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            model: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Closed set of failure categories a caller can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    #[serde(rename = "INVALID_REQUEST")]
    InvalidRequest,
    #[serde(rename = "MODEL_NOT_AVAILABLE")]
    ModelUnavailable,
    #[serde(rename = "API_CONNECTION_ERROR")]
    ApiConnection,
    #[serde(rename = "UNKNOWN_ERROR")]
    Unknown,
}

impl ErrorKind {
    /// Stable code for error bodies produced by a boundary layer.
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::ModelUnavailable => "MODEL_NOT_AVAILABLE",
            Self::ApiConnection => "API_CONNECTION_ERROR",
            Self::Unknown => "UNKNOWN_ERROR",
        }
    }

    /// Whether the caller's input, rather than the provider, caused the failure.
    pub fn is_client_error(self) -> bool {
        matches!(self, Self::InvalidRequest | Self::ModelUnavailable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChatResult {
    Success {
        text: String,
        model: String,
        timestamp: DateTime<Utc>,
    },
    Failure {
        kind: ErrorKind,
        message: String,
    },
}

impl ChatResult {
    pub fn success(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self::Success {
            text: text.into(),
            model: model.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Success { text, .. } => Some(text),
            Self::Failure { .. } => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}
