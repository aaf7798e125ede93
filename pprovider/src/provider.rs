//! Completion capability contract consumed by the gateway.
//!
//! ```rust
//! use pprovider::{CompletionRequest, ProviderId};
//! use pcommon::SamplingOptions;
//!
//! let request = CompletionRequest::new("Hello", "qwen/qwen3-coder:free")
//!     .with_options(SamplingOptions::default().with_max_tokens(32));
//! assert_eq!(request.options.max_tokens, 32);
//! assert_eq!(ProviderId::parse("openrouter"), Some(ProviderId::OpenRouter));
//! ```

use std::fmt::{Display, Formatter};

use pcommon::{BoxFuture, SamplingOptions};

use crate::ProviderError;

pub type ProviderFuture<'a, T> = BoxFuture<'a, T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenRouter,
    OpenAi,
}

impl ProviderId {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openrouter" => Some(Self::OpenRouter),
            "openai" => Some(Self::OpenAi),
            _ => None,
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenRouter => "https://openrouter.ai/api/v1",
            Self::OpenAi => "https://api.openai.com/v1",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            Self::OpenRouter => "openrouter",
            Self::OpenAi => "openai",
        };

        f.write_str(id)
    }
}

/// One single-turn completion call: a user prompt against a named model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub model: String,
    pub options: SamplingOptions,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
            options: SamplingOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SamplingOptions) -> Self {
        self.options = options;
        self
    }
}

pub trait CompletionProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Returns the assistant text for `request`.
    ///
    /// Implementations own their transport timeouts; callers never wrap a
    /// single call in a deadline of their own.
    fn complete<'a>(
        &'a self,
        request: CompletionRequest,
    ) -> ProviderFuture<'a, Result<String, ProviderError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_id_parses_case_insensitively() {
        assert_eq!(ProviderId::parse(" OpenRouter "), Some(ProviderId::OpenRouter));
        assert_eq!(ProviderId::parse("openai"), Some(ProviderId::OpenAi));
        assert_eq!(ProviderId::parse("anthropic"), None);
    }

    #[test]
    fn provider_id_display_matches_parse_input() {
        for id in [ProviderId::OpenRouter, ProviderId::OpenAi] {
            assert_eq!(ProviderId::parse(&id.to_string()), Some(id));
        }
    }

    #[test]
    fn completion_request_uses_default_sampling() {
        let request = CompletionRequest::new("hi", "m1");
        assert_eq!(request.options, SamplingOptions::default());
    }
}
