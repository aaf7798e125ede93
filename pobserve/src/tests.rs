use std::sync::{Arc, Mutex};
use std::time::Duration;

use pprovider::{ProviderError, ProviderId, ProviderOperationHooks};

use crate::{
    FanoutOperationHooks, MetricsOperationHooks, SafeOperationHooks, TracingOperationHooks,
};

fn fire_all_callbacks(hooks: &dyn ProviderOperationHooks) {
    let error = ProviderError::timeout("request timeout: operation timed out");

    hooks.on_attempt_start(ProviderId::OpenRouter, "complete", 1);
    hooks.on_attempt_failure(
        ProviderId::OpenRouter,
        "complete",
        1,
        Duration::from_millis(40),
        &error,
    );
    hooks.on_retry_scheduled(
        ProviderId::OpenRouter,
        "complete",
        1,
        Duration::from_secs(1),
        &error,
    );
    hooks.on_success(ProviderId::OpenRouter, "complete", 2, Duration::from_millis(35));
    hooks.on_failure(ProviderId::OpenRouter, "complete", 3, &error);
    hooks.on_cancelled(ProviderId::OpenRouter, "complete", 1);
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    fire_all_callbacks(&TracingOperationHooks);
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    fire_all_callbacks(&MetricsOperationHooks);
}

#[derive(Default, Clone)]
struct RecordingHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingHooks {
    fn events(&self) -> Vec<&'static str> {
        self.events.lock().expect("events lock").clone()
    }

    fn push(&self, event: &'static str) {
        self.events.lock().expect("events lock").push(event);
    }
}

impl ProviderOperationHooks for RecordingHooks {
    fn on_attempt_start(&self, _provider: ProviderId, _operation: &str, _attempt: u32) {
        self.push("attempt_start");
    }

    fn on_attempt_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _attempt: u32,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
        self.push("attempt_failure");
    }

    fn on_retry_scheduled(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _attempt: u32,
        _delay: Duration,
        _error: &ProviderError,
    ) {
        self.push("retry_scheduled");
    }

    fn on_success(&self, _provider: ProviderId, _operation: &str, _attempts: u32, _elapsed: Duration) {
        self.push("success");
    }

    fn on_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _attempts: u32,
        _error: &ProviderError,
    ) {
        self.push("failure");
    }

    fn on_cancelled(&self, _provider: ProviderId, _operation: &str, _attempts: u32) {
        self.push("cancelled");
    }
}

struct PanicHooks;

impl ProviderOperationHooks for PanicHooks {
    fn on_attempt_start(&self, _provider: ProviderId, _operation: &str, _attempt: u32) {
        panic!("attempt_start panic");
    }

    fn on_attempt_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _attempt: u32,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
        panic!("attempt_failure panic");
    }

    fn on_retry_scheduled(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _attempt: u32,
        _delay: Duration,
        _error: &ProviderError,
    ) {
        panic!("retry_scheduled panic");
    }

    fn on_success(&self, _provider: ProviderId, _operation: &str, _attempts: u32, _elapsed: Duration) {
        panic!("success panic");
    }

    fn on_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _attempts: u32,
        _error: &ProviderError,
    ) {
        panic!("failure panic");
    }

    fn on_cancelled(&self, _provider: ProviderId, _operation: &str, _attempts: u32) {
        panic!("cancelled panic");
    }
}

#[test]
fn safe_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingHooks::default();
    let hooks = SafeOperationHooks::new(inner.clone());

    fire_all_callbacks(&hooks);

    assert_eq!(
        inner.events(),
        vec![
            "attempt_start",
            "attempt_failure",
            "retry_scheduled",
            "success",
            "failure",
            "cancelled"
        ]
    );
}

#[test]
fn safe_hooks_swallow_panics() {
    fire_all_callbacks(&SafeOperationHooks::new(PanicHooks));
}

#[test]
fn fanout_forwards_in_registration_order() {
    let order = Arc::new(Mutex::new(Vec::new()));

    struct Tagged {
        tag: &'static str,
        order: Arc<Mutex<Vec<&'static str>>>,
    }

    impl ProviderOperationHooks for Tagged {
        fn on_cancelled(&self, _provider: ProviderId, _operation: &str, _attempts: u32) {
            self.order.lock().expect("order lock").push(self.tag);
        }
    }

    let hooks = FanoutOperationHooks::new()
        .with(Tagged {
            tag: "first",
            order: Arc::clone(&order),
        })
        .with(Tagged {
            tag: "second",
            order: Arc::clone(&order),
        });

    hooks.on_cancelled(ProviderId::OpenAi, "complete", 0);

    assert_eq!(hooks.len(), 2);
    assert_eq!(*order.lock().expect("order lock"), vec!["first", "second"]);
}

#[test]
fn safe_panicking_member_does_not_starve_later_members() {
    let recorder = RecordingHooks::default();
    let hooks = FanoutOperationHooks::new()
        .with(SafeOperationHooks::new(PanicHooks))
        .with_shared(Arc::new(recorder.clone()));

    fire_all_callbacks(&hooks);

    assert_eq!(recorder.events().len(), 6);
}

#[test]
fn empty_fanout_is_a_noop() {
    let hooks = FanoutOperationHooks::new();
    assert!(hooks.is_empty());
    fire_all_callbacks(&hooks);
}
