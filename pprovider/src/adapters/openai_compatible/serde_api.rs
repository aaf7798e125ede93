//! Chat-completions HTTP payload serde models and conversion helpers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ProviderError;

use super::types::{ChatCompletionRequest, ChatCompletionResponse};

#[derive(Debug, Serialize)]
pub(crate) struct ApiRequest {
    pub model: String,
    pub messages: Vec<ApiMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ApiMessage {
    pub role: &'static str,
    pub content: String,
}

impl From<ChatCompletionRequest> for ApiRequest {
    fn from(value: ChatCompletionRequest) -> Self {
        Self {
            model: value.model,
            messages: vec![ApiMessage {
                role: "user",
                content: value.user_message,
            }],
            temperature: value.temperature,
            max_tokens: value.max_tokens,
            stream: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ApiChoice>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiChoice {
    pub message: ApiResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    pub message: String,
    #[serde(default)]
    pub code: Option<Value>,
}

impl ApiError {
    fn describe(&self) -> String {
        match &self.code {
            Some(Value::String(code)) => format!("{code}: {}", self.message),
            Some(Value::Number(code)) => format!("{code}: {}", self.message),
            _ => self.message.clone(),
        }
    }
}

impl TryFrom<ApiResponse> for ChatCompletionResponse {
    type Error = ProviderError;

    fn try_from(value: ApiResponse) -> Result<Self, Self::Error> {
        // Some gateways report upstream failures inside a 200 body.
        if let Some(error) = value.error {
            return Err(ProviderError::other(format!(
                "provider returned error {}",
                error.describe()
            )));
        }

        let choice = value.choices.into_iter().next().ok_or_else(|| {
            ProviderError::other("provider response contained no completion choices")
        })?;

        Ok(Self {
            model: value.model,
            content: choice.message.content.unwrap_or_default(),
            finish_reason: choice.finish_reason,
        })
    }
}

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ApiErrorEnvelope>(body).ok()?;
    Some(parsed.error.describe())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_single_user_message_and_sampling() {
        let request = ApiRequest::from(ChatCompletionRequest {
            model: "qwen/qwen3-coder:free".to_string(),
            user_message: "Hi".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
        });

        let json = serde_json::to_value(&request).expect("request should serialize");
        assert_eq!(json["model"], "qwen/qwen3-coder:free");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Hi");
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn response_uses_first_choice_and_tolerates_null_content() {
        let parsed: ApiResponse = serde_json::from_str(
            r#"{"model":"m1","choices":[{"message":{"content":null},"finish_reason":"stop"}]}"#,
        )
        .expect("response should parse");

        let response = ChatCompletionResponse::try_from(parsed).expect("response should convert");
        assert_eq!(response.content, "");
        assert_eq!(response.model.as_deref(), Some("m1"));
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    }

    #[test]
    fn embedded_error_becomes_provider_error_with_code() {
        let parsed: ApiResponse = serde_json::from_str(
            r#"{"error":{"message":"Rate limit exceeded","code":429}}"#,
        )
        .expect("response should parse");

        let error = ChatCompletionResponse::try_from(parsed).expect_err("should fail");
        assert!(error.message.contains("429"));
        assert!(error.message.contains("Rate limit exceeded"));
    }

    #[test]
    fn empty_choices_are_rejected() {
        let parsed: ApiResponse =
            serde_json::from_str(r#"{"choices":[]}"#).expect("response should parse");
        assert!(ChatCompletionResponse::try_from(parsed).is_err());
    }

    #[test]
    fn extract_error_message_reads_envelope() {
        assert_eq!(
            extract_error_message(r#"{"error":{"message":"No auth credentials found","code":401}}"#),
            Some("401: No auth credentials found".to_string())
        );
        assert_eq!(extract_error_message("<html>bad gateway</html>"), None);
    }
}
