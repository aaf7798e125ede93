#![cfg(feature = "provider-openai-compatible")]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use pprovider::adapters::openai_compatible::{
    ChatCompletionRequest, ChatCompletionResponse, ChatCompletionsTransport,
    OpenAiCompatibleProvider,
};
use pprovider::{
    CompletionProvider, CompletionRequest, NoopOperationHooks, ProviderError, ProviderFuture,
    ProviderId, RetryOutcome, RetryPolicy, SecretString, execute_with_retry,
};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
struct FakeTransport {
    captured_key: Mutex<Option<String>>,
    captured_requests: Mutex<Vec<ChatCompletionRequest>>,
    failures_before_success: Mutex<u32>,
}

impl FakeTransport {
    fn failing(times: u32) -> Self {
        Self {
            failures_before_success: Mutex::new(times),
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.captured_requests.lock().expect("requests lock").len()
    }
}

impl ChatCompletionsTransport for FakeTransport {
    fn complete<'a>(
        &'a self,
        request: ChatCompletionRequest,
        api_key: &'a SecretString,
    ) -> ProviderFuture<'a, Result<ChatCompletionResponse, ProviderError>> {
        Box::pin(async move {
            *self.captured_key.lock().expect("key lock") = Some(api_key.expose().to_string());
            let model = request.model.clone();
            self.captured_requests
                .lock()
                .expect("requests lock")
                .push(request);

            let mut remaining = self.failures_before_success.lock().expect("failures lock");
            if *remaining > 0 {
                *remaining -= 1;
                return Err(ProviderError::unavailable(
                    "request failed with status 503 Service Unavailable: upstream busy",
                ));
            }

            Ok(ChatCompletionResponse {
                model: Some(model),
                content: "Hello there".to_string(),
                finish_reason: Some("stop".to_string()),
            })
        })
    }
}

fn provider_with(transport: Arc<FakeTransport>) -> OpenAiCompatibleProvider {
    OpenAiCompatibleProvider::new(
        ProviderId::OpenRouter,
        SecretString::api_key("sk-or-test").expect("key should be valid"),
        transport,
    )
}

#[tokio::test]
async fn provider_forwards_prompt_model_sampling_and_key() {
    let transport = Arc::new(FakeTransport::default());
    let provider = provider_with(Arc::clone(&transport));

    let text = provider
        .complete(CompletionRequest::new("Hi", "qwen/qwen3-coder:free"))
        .await
        .expect("completion should succeed");

    assert_eq!(text, "Hello there");
    assert_eq!(provider.id(), ProviderId::OpenRouter);
    assert_eq!(
        transport.captured_key.lock().expect("key lock").as_deref(),
        Some("sk-or-test")
    );

    let requests = transport.captured_requests.lock().expect("requests lock");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].model, "qwen/qwen3-coder:free");
    assert_eq!(requests[0].user_message, "Hi");
    assert_eq!(requests[0].temperature, 0.7);
    assert_eq!(requests[0].max_tokens, 1000);
}

#[tokio::test]
async fn provider_rejects_blank_model_without_calling_transport() {
    let transport = Arc::new(FakeTransport::default());
    let provider = provider_with(Arc::clone(&transport));

    let error = provider
        .complete(CompletionRequest::new("Hi", "  "))
        .await
        .expect_err("blank model should fail");

    assert_eq!(error.kind, pprovider::ProviderErrorKind::InvalidRequest);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn provider_debug_output_redacts_key() {
    let provider = provider_with(Arc::new(FakeTransport::default()));
    let rendered = format!("{provider:?}");

    assert!(!rendered.contains("sk-or-test"));
    assert!(rendered.contains("[REDACTED]"));
}

#[tokio::test]
async fn retry_executor_recovers_from_transient_transport_failures() {
    let transport = Arc::new(FakeTransport::failing(2));
    let provider = provider_with(Arc::clone(&transport));
    let policy = RetryPolicy::new(3, Duration::from_millis(5));
    let cancel = CancellationToken::new();
    let sleeps = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&sleeps);

    let outcome = execute_with_retry(
        ProviderId::OpenRouter,
        "complete",
        &policy,
        &NoopOperationHooks,
        &cancel,
        |_| provider.complete(CompletionRequest::new("Hi", "m1")),
        move |delay| {
            recorded.lock().expect("sleeps lock").push(delay);
            std::future::ready(())
        },
    )
    .await;

    match outcome {
        RetryOutcome::Succeeded { value, attempts } => {
            assert_eq!(value, "Hello there");
            assert_eq!(attempts, 3);
        }
        other => panic!("expected success, got {other:?}"),
    }
    assert_eq!(transport.calls(), 3);
    assert_eq!(
        *sleeps.lock().expect("sleeps lock"),
        vec![Duration::from_millis(5), Duration::from_millis(10)]
    );
}
