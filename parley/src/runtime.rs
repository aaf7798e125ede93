//! Runtime wiring from a [`GatewayConfig`] to a ready [`ChatGateway`].

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use pchat::ChatGateway;
use pobserve::{FanoutOperationHooks, MetricsOperationHooks, SafeOperationHooks, TracingOperationHooks};
use pprovider::{CompletionProvider, ProviderError, ProviderOperationHooks};

use crate::{ConfigError, GatewayConfig};

#[derive(Debug)]
pub enum BuildError {
    Config(ConfigError),
    Provider(ProviderError),
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Provider(err) => write!(f, "provider setup failed: {err}"),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Provider(err) => Some(err),
        }
    }
}

impl From<ConfigError> for BuildError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ProviderError> for BuildError {
    fn from(value: ProviderError) -> Self {
        Self::Provider(value)
    }
}

/// Tracing and metrics hooks, each isolated so a panic in one cannot reach
/// the retry loop or the other.
pub fn default_hooks() -> Arc<dyn ProviderOperationHooks> {
    Arc::new(
        FanoutOperationHooks::new()
            .with(SafeOperationHooks::new(TracingOperationHooks))
            .with(SafeOperationHooks::new(MetricsOperationHooks)),
    )
}

pub fn build_gateway(config: &GatewayConfig) -> Result<ChatGateway, BuildError> {
    let provider = build_provider(config)?;
    build_gateway_with_provider(config, provider)
}

/// Wires a caller-supplied provider; useful for tests and custom transports.
pub fn build_gateway_with_provider(
    config: &GatewayConfig,
    provider: Arc<dyn CompletionProvider>,
) -> Result<ChatGateway, BuildError> {
    config.validate()?;

    let mut builder = ChatGateway::builder(provider, config.registry())
        .policy(config.retry_policy())
        .hooks(default_hooks());

    if let Some(limit) = config.total_timeout {
        builder = builder.total_timeout(limit);
    }

    tracing::info!(config = %config.summary(), "chat gateway configured");
    Ok(builder.build())
}

#[cfg(feature = "provider-openai-compatible")]
pub fn build_provider(config: &GatewayConfig) -> Result<Arc<dyn CompletionProvider>, BuildError> {
    use pprovider::adapters::openai_compatible::{
        HttpChatCompletionsTransport, OpenAiCompatibleProvider,
    };

    let api_key = config.api_key()?.clone();
    let http = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()
        .map_err(|err| ProviderError::transport(err.to_string()))?;

    let mut transport =
        HttpChatCompletionsTransport::new(http, config.base_url.clone()).with_app_name(&config.app_name);
    if let Some(referer) = &config.referer {
        transport = transport.with_referer(referer);
    }

    Ok(Arc::new(OpenAiCompatibleProvider::new(
        config.provider,
        api_key,
        Arc::new(transport),
    )))
}

#[cfg(not(feature = "provider-openai-compatible"))]
pub fn build_provider(_config: &GatewayConfig) -> Result<Arc<dyn CompletionProvider>, BuildError> {
    Err(BuildError::Provider(ProviderError::invalid_request(
        "no provider adapter compiled in; enable the provider-openai-compatible feature",
    )))
}
