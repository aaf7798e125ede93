//! Chat-completions adapter for OpenRouter and other OpenAI-compatible endpoints.

mod provider;
mod serde_api;
mod transport;
mod types;

pub use provider::OpenAiCompatibleProvider;
pub use transport::{ChatCompletionsTransport, HttpChatCompletionsTransport};
pub use types::{ChatCompletionRequest, ChatCompletionResponse};
