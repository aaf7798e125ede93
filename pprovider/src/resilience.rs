//! Retry/backoff policy, the cancellable retry executor, and operational hook contracts.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::{ProviderError, ProviderId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Wait scheduled after `attempt` fails: `base_delay * 2^(attempt - 1)`.
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let factor = 1_u32.checked_shl(exponent).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Wait inserted before `attempt` starts; zero for the first attempt.
    pub fn delay_before_attempt(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            Duration::ZERO
        } else {
            self.backoff_for_attempt(attempt - 1)
        }
    }
}

/// Terminal state of one retry sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T> {
    Succeeded { value: T, attempts: u32 },
    Exhausted { error: ProviderError, attempts: u32 },
    Cancelled { attempts: u32 },
}

impl<T> RetryOutcome<T> {
    /// Remote calls made before reaching this state.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Succeeded { attempts, .. }
            | Self::Exhausted { attempts, .. }
            | Self::Cancelled { attempts } => *attempts,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

pub trait ProviderOperationHooks: Send + Sync {
    fn on_attempt_start(&self, _provider: ProviderId, _operation: &str, _attempt: u32) {}

    fn on_attempt_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _attempt: u32,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
    }

    fn on_retry_scheduled(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _attempt: u32,
        _delay: Duration,
        _error: &ProviderError,
    ) {
    }

    fn on_success(&self, _provider: ProviderId, _operation: &str, _attempts: u32, _elapsed: Duration) {
    }

    fn on_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _attempts: u32,
        _error: &ProviderError,
    ) {
    }

    fn on_cancelled(&self, _provider: ProviderId, _operation: &str, _attempts: u32) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl ProviderOperationHooks for NoopOperationHooks {}

/// Runs `execute` until it succeeds, the policy runs out of attempts, or
/// `cancel` fires while waiting between attempts.
///
/// Attempts are strictly sequential. `sleep` is the only place the executor
/// waits on its own; a cancellation observed there ends the sequence without
/// another call. An in-flight `execute` future is never interrupted.
pub async fn execute_with_retry<T, Op, OpFuture, Sleep, SleepFuture>(
    provider: ProviderId,
    operation: &str,
    policy: &RetryPolicy,
    hooks: &dyn ProviderOperationHooks,
    cancel: &CancellationToken,
    mut execute: Op,
    mut sleep: Sleep,
) -> RetryOutcome<T>
where
    Op: FnMut(u32) -> OpFuture,
    OpFuture: Future<Output = Result<T, ProviderError>>,
    Sleep: FnMut(Duration) -> SleepFuture,
    SleepFuture: Future<Output = ()>,
{
    let mut attempt = 1;

    loop {
        if cancel.is_cancelled() {
            let attempts = attempt - 1;
            hooks.on_cancelled(provider, operation, attempts);
            return RetryOutcome::Cancelled { attempts };
        }

        hooks.on_attempt_start(provider, operation, attempt);
        let started = Instant::now();

        match execute(attempt).await {
            Ok(value) => {
                hooks.on_success(provider, operation, attempt, started.elapsed());
                return RetryOutcome::Succeeded {
                    value,
                    attempts: attempt,
                };
            }
            Err(error) => {
                hooks.on_attempt_failure(provider, operation, attempt, started.elapsed(), &error);

                if !policy.should_retry(attempt) {
                    hooks.on_failure(provider, operation, attempt, &error);
                    return RetryOutcome::Exhausted {
                        error,
                        attempts: attempt,
                    };
                }

                let delay = policy.backoff_for_attempt(attempt);
                hooks.on_retry_scheduled(provider, operation, attempt, delay, &error);

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        hooks.on_cancelled(provider, operation, attempt);
                        return RetryOutcome::Cancelled { attempts: attempt };
                    }
                    _ = sleep(delay) => {}
                }

                attempt += 1;
            }
        }
    }
}
