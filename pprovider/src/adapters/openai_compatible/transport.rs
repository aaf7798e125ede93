//! Chat-completions transport trait and reqwest-based HTTP implementation.

use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::{ProviderError, ProviderFuture, SecretString};

use super::serde_api::{ApiRequest, ApiResponse, extract_error_message};
use super::types::{ChatCompletionRequest, ChatCompletionResponse};

const MAX_ERROR_BODY_CHARS: usize = 200;

pub trait ChatCompletionsTransport: Send + Sync + std::fmt::Debug {
    fn complete<'a>(
        &'a self,
        request: ChatCompletionRequest,
        api_key: &'a SecretString,
    ) -> ProviderFuture<'a, Result<ChatCompletionResponse, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct HttpChatCompletionsTransport {
    client: Client,
    base_url: String,
    app_name: Option<String>,
    referer: Option<String>,
}

impl HttpChatCompletionsTransport {
    /// `client` carries the per-request timeout; the transport adds none of its own.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            app_name: None,
            referer: None,
        }
    }

    /// Sent as `X-Title`, which OpenRouter uses for app attribution.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Sent as `HTTP-Referer`, the site URL OpenRouter shows for the app.
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn request_builder(
        &self,
        request: ChatCompletionRequest,
        api_key: &SecretString,
    ) -> RequestBuilder {
        let builder = self
            .client
            .post(self.endpoint("chat/completions"))
            .bearer_auth(api_key.expose())
            .json(&ApiRequest::from(request));

        self.apply_headers(builder)
    }

    fn apply_headers(&self, mut builder: RequestBuilder) -> RequestBuilder {
        if let Some(app_name) = &self.app_name {
            builder = builder.header("X-Title", app_name);
        }

        if let Some(referer) = &self.referer {
            builder = builder.header("HTTP-Referer", referer);
        }

        builder
    }

    async fn parse_error(response: Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        status_error(status, &body)
    }
}

impl ChatCompletionsTransport for HttpChatCompletionsTransport {
    fn complete<'a>(
        &'a self,
        request: ChatCompletionRequest,
        api_key: &'a SecretString,
    ) -> ProviderFuture<'a, Result<ChatCompletionResponse, ProviderError>> {
        Box::pin(async move {
            let response = self
                .request_builder(request, api_key)
                .send()
                .await
                .map_err(send_error)?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let parsed: ApiResponse = response.json().await.map_err(|err| {
                if err.is_timeout() {
                    ProviderError::timeout(format!("response timeout: {err}"))
                } else {
                    ProviderError::transport(format!("malformed response body: {err}"))
                }
            })?;

            ChatCompletionResponse::try_from(parsed)
        })
    }
}

fn send_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::timeout(format!("request timeout: {err}"))
    } else if err.is_connect() {
        ProviderError::transport(format!("connection failed: {err}"))
    } else {
        ProviderError::transport(err.to_string())
    }
}

/// Error for a non-2xx response. The message always leads with the numeric
/// status so text-based classification sees codes such as `401` or `503`.
pub(crate) fn status_error(status: StatusCode, body: &str) -> ProviderError {
    let detail = extract_error_message(body).unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            "no error details".to_string()
        } else {
            trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
        }
    });
    let message = format!("request failed with status {status}: {detail}");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::authentication(message),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ProviderError::timeout(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ProviderError::invalid_request(message)
        }
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
            ProviderError::unavailable(message)
        }
        _ => ProviderError::transport(message),
    }
}
