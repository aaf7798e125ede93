//! Common `pprovider` imports for downstream crates.

pub use crate::{
    CompletionProvider, CompletionRequest, ModelRegistry, NoopOperationHooks, ProviderError,
    ProviderErrorKind, ProviderFuture, ProviderId, ProviderOperationHooks, RetryOutcome,
    RetryPolicy, SecretString, execute_with_retry,
};
pub use pcommon::{BoxFuture, SamplingOptions};
