//! Common imports for most parley applications.

pub use crate::{BuildError, build_gateway, build_gateway_with_provider, default_hooks};
pub use crate::{
    ChatGateway, ChatRequest, ChatResult, CompletionProvider, CompletionRequest, ConfigError,
    ErrorKind, GatewayConfig, ModelRegistry, ProviderError, ProviderFuture, ProviderId,
    RetryPolicy, SamplingOptions,
};
