//! Adapter-level request and response values, independent of the wire format.

use crate::CompletionRequest;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub user_message: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl From<CompletionRequest> for ChatCompletionRequest {
    fn from(value: CompletionRequest) -> Self {
        Self {
            model: value.model,
            user_message: value.prompt,
            temperature: value.options.temperature,
            max_tokens: value.options.max_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletionResponse {
    pub model: Option<String>,
    pub content: String,
    pub finish_reason: Option<String>,
}
