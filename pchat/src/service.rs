//! The chat gateway: model resolution, validation, resilient execution, and
//! result assembly for a single request.

use std::sync::Arc;
use std::time::Duration;

use pcommon::{RequestId, SamplingOptions};
use pprovider::{
    CompletionProvider, CompletionRequest, ModelRegistry, NoopOperationHooks,
    ProviderOperationHooks, RetryOutcome, RetryPolicy, execute_with_retry,
};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::{ChatFailure, ChatRequest, ChatResult, classify, validate};

const OPERATION: &str = "complete";

pub struct ChatGatewayBuilder {
    provider: Arc<dyn CompletionProvider>,
    registry: ModelRegistry,
    policy: RetryPolicy,
    hooks: Arc<dyn ProviderOperationHooks>,
    options: SamplingOptions,
    total_timeout: Option<Duration>,
}

impl ChatGatewayBuilder {
    pub fn new(provider: Arc<dyn CompletionProvider>, registry: ModelRegistry) -> Self {
        Self {
            provider,
            registry,
            policy: RetryPolicy::default(),
            hooks: Arc::new(NoopOperationHooks),
            options: SamplingOptions::default(),
            total_timeout: None,
        }
    }

    pub fn policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn options(mut self, options: SamplingOptions) -> Self {
        self.options = options;
        self
    }

    /// Upper bound on one whole request, retries and backoff included.
    /// Unset by default, in which case only the attempt limit bounds a request.
    pub fn total_timeout(mut self, total_timeout: Duration) -> Self {
        self.total_timeout = Some(total_timeout);
        self
    }

    pub fn build(self) -> ChatGateway {
        ChatGateway {
            provider: self.provider,
            registry: Arc::new(self.registry),
            policy: self.policy,
            hooks: self.hooks,
            options: self.options,
            total_timeout: self.total_timeout,
        }
    }
}

/// Cheap to clone; clones share the registry, provider and hooks.
#[derive(Clone)]
pub struct ChatGateway {
    provider: Arc<dyn CompletionProvider>,
    registry: Arc<ModelRegistry>,
    policy: RetryPolicy,
    hooks: Arc<dyn ProviderOperationHooks>,
    options: SamplingOptions,
    total_timeout: Option<Duration>,
}

impl ChatGateway {
    pub fn new(provider: Arc<dyn CompletionProvider>, registry: ModelRegistry) -> Self {
        Self::builder(provider, registry).build()
    }

    pub fn builder(
        provider: Arc<dyn CompletionProvider>,
        registry: ModelRegistry,
    ) -> ChatGatewayBuilder {
        ChatGatewayBuilder::new(provider, registry)
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn list_models(&self) -> Vec<String> {
        self.registry.allowed_models()
    }

    pub fn is_model_available(&self, model: &str) -> bool {
        self.registry.is_available(model)
    }

    /// The request's model when it is non-blank, otherwise the registry default.
    pub fn resolve_model(&self, requested: Option<&str>) -> String {
        match requested {
            Some(model) if !model.trim().is_empty() => model.to_string(),
            _ => self.registry.default_model().to_string(),
        }
    }

    pub async fn handle(&self, request: ChatRequest) -> ChatResult {
        self.handle_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Like [`ChatGateway::handle`], but `cancel` aborts the retry sequence.
    /// Cancellation is observed before each attempt and while backing off.
    pub async fn handle_with_cancel(
        &self,
        request: ChatRequest,
        cancel: &CancellationToken,
    ) -> ChatResult {
        let model = self.resolve_model(request.model.as_deref());
        let request_id = RequestId::generate();
        let span = info_span!("chat_request", request_id = %request_id, model = %model);

        self.process(request.message, model, cancel)
            .instrument(span)
            .await
    }

    async fn process(&self, message: String, model: String, cancel: &CancellationToken) -> ChatResult {
        info!(message_chars = message.chars().count(), "chat request received");

        if let Err(failure) = validate(&message, &model, &self.registry) {
            warn!(kind = failure.kind.code(), reason = %failure.message, "chat request rejected");
            return failure.into();
        }

        let outcome = match self.total_timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, self.execute(&message, &model, cancel)).await {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        let limit_ms = limit.as_millis();
                        error!(limit_ms, "chat request timed out");
                        return ChatFailure::api_connection(format!("timed out after {limit_ms}ms"))
                            .into();
                    }
                }
            }
            None => self.execute(&message, &model, cancel).await,
        };

        match outcome {
            RetryOutcome::Succeeded { value, attempts } => {
                info!(attempts, response_chars = value.chars().count(), "chat request completed");
                ChatResult::success(value, model)
            }
            RetryOutcome::Exhausted { error, attempts } => {
                let classification = classify(&error.message);
                error!(
                    attempts,
                    kind = classification.kind.code(),
                    cause = ?classification.cause,
                    error = %error.message,
                    "provider attempts exhausted"
                );
                ChatResult::failure(
                    classification.kind,
                    format!("exhausted {attempts} attempts: {}", error.message),
                )
            }
            RetryOutcome::Cancelled { attempts } => {
                error!(attempts, "chat request cancelled");
                ChatFailure::api_connection("call was cancelled").into()
            }
        }
    }

    async fn execute(
        &self,
        message: &str,
        model: &str,
        cancel: &CancellationToken,
    ) -> RetryOutcome<String> {
        execute_with_retry(
            self.provider.id(),
            OPERATION,
            &self.policy,
            self.hooks.as_ref(),
            cancel,
            |attempt| {
                debug!(attempt, max_attempts = self.policy.max_attempts, "calling provider");
                let request = CompletionRequest::new(message, model).with_options(self.options);
                self.provider.complete(request)
            },
            tokio::time::sleep,
        )
        .await
    }
}

impl std::fmt::Debug for ChatGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatGateway")
            .field("provider", &self.provider.id())
            .field("registry", &self.registry)
            .field("policy", &self.policy)
            .field("options", &self.options)
            .field("total_timeout", &self.total_timeout)
            .finish()
    }
}
