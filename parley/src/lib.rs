//! Unified facade over the parley workspace crates.
//!
//! Most applications only need this crate: it re-exports the gateway, the
//! provider contracts, and the observability hooks, and adds configuration
//! loading plus runtime wiring.

pub mod config;
pub mod prelude;
pub mod runtime;

pub use pchat;
pub use pcommon;
pub use pobserve;
pub use pprovider;

pub use config::{ConfigError, GatewayConfig};
pub use pchat::{
    ChatFailure, ChatGateway, ChatGatewayBuilder, ChatRequest, ChatResult, Classification,
    ErrorKind, FailureCause, MAX_MESSAGE_CHARS, classify, validate,
};
pub use pcommon::{BoxFuture, RequestId, SamplingOptions};
pub use pobserve::{
    FanoutOperationHooks, MetricsOperationHooks, SafeOperationHooks, TracingOperationHooks,
};
pub use pprovider::{
    CompletionProvider, CompletionRequest, ModelRegistry, NoopOperationHooks, ProviderError,
    ProviderErrorKind, ProviderFuture, ProviderId, ProviderOperationHooks, RetryOutcome,
    RetryPolicy, SecretString, execute_with_retry,
};
pub use runtime::{BuildError, build_gateway, build_gateway_with_provider, build_provider, default_hooks};
