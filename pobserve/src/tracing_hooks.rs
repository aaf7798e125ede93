//! Tracing-based hooks for provider retry sequences.
//!
//! ```rust
//! use pobserve::TracingOperationHooks;
//! use pprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = TracingOperationHooks;
//! accepts_provider_hooks(&hooks);
//! ```

use std::time::Duration;

use pprovider::{ProviderError, ProviderId, ProviderOperationHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingOperationHooks;

impl ProviderOperationHooks for TracingOperationHooks {
    fn on_attempt_start(&self, provider: ProviderId, operation: &str, attempt: u32) {
        tracing::debug!(
            event = "attempt_start",
            provider = %provider,
            operation,
            attempt
        );
    }

    fn on_attempt_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        attempt: u32,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        tracing::warn!(
            event = "attempt_failure",
            provider = %provider,
            operation,
            attempt,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error.message
        );
    }

    fn on_retry_scheduled(
        &self,
        provider: ProviderId,
        operation: &str,
        attempt: u32,
        delay: Duration,
        error: &ProviderError,
    ) {
        tracing::info!(
            event = "retry_scheduled",
            provider = %provider,
            operation,
            attempt,
            delay_ms = delay.as_millis() as u64,
            error_kind = ?error.kind
        );
    }

    fn on_success(&self, provider: ProviderId, operation: &str, attempts: u32, elapsed: Duration) {
        tracing::debug!(
            event = "success",
            provider = %provider,
            operation,
            attempts,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        attempts: u32,
        error: &ProviderError,
    ) {
        tracing::error!(
            event = "failure",
            provider = %provider,
            operation,
            attempts,
            error_kind = ?error.kind,
            error = %error.message
        );
    }

    fn on_cancelled(&self, provider: ProviderId, operation: &str, attempts: u32) {
        tracing::warn!(
            event = "cancelled",
            provider = %provider,
            operation,
            attempts
        );
    }
}
