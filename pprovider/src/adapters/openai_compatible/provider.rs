//! Completion provider over a chat-completions transport.

use std::sync::Arc;

use crate::{
    CompletionProvider, CompletionRequest, ProviderError, ProviderFuture, ProviderId, SecretString,
};

use super::transport::ChatCompletionsTransport;
use super::types::ChatCompletionRequest;

#[derive(Clone)]
pub struct OpenAiCompatibleProvider {
    id: ProviderId,
    api_key: SecretString,
    transport: Arc<dyn ChatCompletionsTransport>,
}

impl OpenAiCompatibleProvider {
    pub fn new(
        id: ProviderId,
        api_key: SecretString,
        transport: Arc<dyn ChatCompletionsTransport>,
    ) -> Self {
        Self {
            id,
            api_key,
            transport,
        }
    }
}

impl std::fmt::Debug for OpenAiCompatibleProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleProvider")
            .field("id", &self.id)
            .field("api_key", &self.api_key)
            .field("transport", &self.transport)
            .finish()
    }
}

impl CompletionProvider for OpenAiCompatibleProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn complete<'a>(
        &'a self,
        request: CompletionRequest,
    ) -> ProviderFuture<'a, Result<String, ProviderError>> {
        Box::pin(async move {
            if request.model.trim().is_empty() {
                return Err(ProviderError::invalid_request("model must not be empty"));
            }

            let response = self
                .transport
                .complete(ChatCompletionRequest::from(request), &self.api_key)
                .await?;
            Ok(response.content)
        })
    }
}
