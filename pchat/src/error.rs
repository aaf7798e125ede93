//! Classified chat failures.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::{ChatResult, ErrorKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl ChatFailure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message)
    }

    pub fn model_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ModelUnavailable, message)
    }

    pub fn api_connection(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ApiConnection, message)
    }
}

impl Display for ChatFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.code(), self.message)
    }
}

impl Error for ChatFailure {}

impl From<ChatFailure> for ChatResult {
    fn from(value: ChatFailure) -> Self {
        ChatResult::Failure {
            kind: value.kind,
            message: value.message,
        }
    }
}
