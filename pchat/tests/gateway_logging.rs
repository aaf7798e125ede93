use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pchat::prelude::*;
use pprovider::{
    CompletionProvider, CompletionRequest, ModelRegistry, ProviderError, ProviderFuture,
    ProviderId, RetryPolicy,
};
use tokio_util::sync::CancellationToken;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

type Events = Arc<Mutex<Vec<(Level, String)>>>;

#[derive(Clone, Default)]
struct CaptureLayer {
    events: Events,
}

impl CaptureLayer {
    fn level_of(&self, message: &str) -> Option<Level> {
        self.events
            .lock()
            .expect("events lock")
            .iter()
            .find(|(_, recorded)| recorded == message)
            .map(|(level, _)| *level)
    }
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.events
            .lock()
            .expect("events lock")
            .push((*event.metadata().level(), visitor.0));
    }
}

#[derive(Debug)]
struct FailingProvider;

impl CompletionProvider for FailingProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenRouter
    }

    fn complete<'a>(
        &'a self,
        _request: CompletionRequest,
    ) -> ProviderFuture<'a, Result<String, ProviderError>> {
        Box::pin(async move { Err(ProviderError::unavailable("503 Service Unavailable")) })
    }
}

fn gateway() -> ChatGateway {
    ChatGateway::builder(Arc::new(FailingProvider), ModelRegistry::new("m1", ["m1"]))
        .policy(RetryPolicy::new(1, Duration::ZERO))
        .build()
}

fn capture() -> (CaptureLayer, tracing::subscriber::DefaultGuard) {
    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (layer, guard)
}

#[tokio::test]
async fn cancelled_requests_log_at_error() {
    let (layer, _guard) = capture();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = gateway()
        .handle_with_cancel(ChatRequest::new("hello"), &cancel)
        .await;

    assert_eq!(result.error_kind(), Some(ErrorKind::ApiConnection));
    assert_eq!(layer.level_of("chat request cancelled"), Some(Level::ERROR));
}

#[tokio::test]
async fn exhausted_and_rejected_requests_log_at_their_levels() {
    let (layer, _guard) = capture();
    let gateway = gateway();

    let exhausted = gateway.handle(ChatRequest::new("hello")).await;
    assert_eq!(exhausted.error_kind(), Some(ErrorKind::ApiConnection));
    assert_eq!(layer.level_of("provider attempts exhausted"), Some(Level::ERROR));

    let rejected = gateway.handle(ChatRequest::new("  ")).await;
    assert_eq!(rejected.error_kind(), Some(ErrorKind::InvalidRequest));
    assert_eq!(layer.level_of("chat request rejected"), Some(Level::WARN));
    assert_eq!(layer.level_of("chat request received"), Some(Level::INFO));
}
