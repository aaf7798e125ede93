//! Provider contracts, model whitelist, and the resilient completion executor.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use pprovider::{ModelRegistry, RetryPolicy};
//!
//! let registry = ModelRegistry::new("m1", ["m1"]);
//! let policy = RetryPolicy::new(3, Duration::from_secs(1));
//!
//! assert!(registry.is_available("m1"));
//! assert_eq!(policy.delay_before_attempt(3), Duration::from_secs(2));
//! ```

pub mod adapters;
mod credentials;
mod error;
pub mod prelude;
mod provider;
mod registry;
mod resilience;

pub use credentials::SecretString;
pub use error::{ProviderError, ProviderErrorKind};
pub use provider::{CompletionProvider, CompletionRequest, ProviderFuture, ProviderId};
pub use registry::ModelRegistry;
pub use resilience::{
    NoopOperationHooks, ProviderOperationHooks, RetryOutcome, RetryPolicy, execute_with_retry,
};
