//! Forwards every callback to several hook sets in registration order.

use std::sync::Arc;
use std::time::Duration;

use pprovider::{ProviderError, ProviderId, ProviderOperationHooks};

#[derive(Clone, Default)]
pub struct FanoutOperationHooks {
    hooks: Vec<Arc<dyn ProviderOperationHooks>>,
}

impl FanoutOperationHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<H>(mut self, hooks: H) -> Self
    where
        H: ProviderOperationHooks + 'static,
    {
        self.hooks.push(Arc::new(hooks));
        self
    }

    pub fn with_shared(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks.push(hooks);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl std::fmt::Debug for FanoutOperationHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutOperationHooks")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl ProviderOperationHooks for FanoutOperationHooks {
    fn on_attempt_start(&self, provider: ProviderId, operation: &str, attempt: u32) {
        for hooks in &self.hooks {
            hooks.on_attempt_start(provider, operation, attempt);
        }
    }

    fn on_attempt_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        attempt: u32,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        for hooks in &self.hooks {
            hooks.on_attempt_failure(provider, operation, attempt, elapsed, error);
        }
    }

    fn on_retry_scheduled(
        &self,
        provider: ProviderId,
        operation: &str,
        attempt: u32,
        delay: Duration,
        error: &ProviderError,
    ) {
        for hooks in &self.hooks {
            hooks.on_retry_scheduled(provider, operation, attempt, delay, error);
        }
    }

    fn on_success(&self, provider: ProviderId, operation: &str, attempts: u32, elapsed: Duration) {
        for hooks in &self.hooks {
            hooks.on_success(provider, operation, attempts, elapsed);
        }
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        attempts: u32,
        error: &ProviderError,
    ) {
        for hooks in &self.hooks {
            hooks.on_failure(provider, operation, attempts, error);
        }
    }

    fn on_cancelled(&self, provider: ProviderId, operation: &str, attempts: u32) {
        for hooks in &self.hooks {
            hooks.on_cancelled(provider, operation, attempts);
        }
    }
}
