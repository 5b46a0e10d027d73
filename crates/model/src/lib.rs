//! # Triage Model
//!
//! Client for the hosted language model that writes the assistant's free-text reply.
//!
//! The rest of the workspace talks to the model only through [`ModelClient`], so handlers and
//! tests can swap in any implementation. [`ChatCompletionsClient`] speaks the OpenAI-compatible
//! `/chat/completions` API (Groq by default).

pub mod config;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

pub use config::ModelConfig;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("invalid model configuration: {0}")]
    Config(String),
    #[error("model request timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("could not reach model endpoint: {0}")]
    Connect(String),
    #[error("model api error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("model returned an empty response")]
    EmptyResponse,
    #[error("model http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ModelError {
    /// Whether a caller-side retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ModelError::Timeout(_) | ModelError::Connect(_) => true,
            ModelError::Api { status, .. } => *status == 429 || (500..=599).contains(status),
            _ => false,
        }
    }
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Anything that can turn a prompt into reply text.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> ModelResult<String>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

/// OpenAI-compatible chat completions client.
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    cfg: ModelConfig,
}

impl ChatCompletionsClient {
    /// Create a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Http` if the underlying HTTP client cannot be built.
    pub fn new(cfg: ModelConfig) -> ModelResult<Self> {
        let client = reqwest::Client::builder().timeout(cfg.timeout()).build()?;
        Ok(Self { client, cfg })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.cfg
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ApiRequest<'a> {
        ApiRequest {
            model: self.cfg.model(),
            messages: vec![ApiMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.cfg.max_tokens(),
        }
    }
}

#[async_trait]
impl ModelClient for ChatCompletionsClient {
    async fn generate(&self, prompt: &str) -> ModelResult<String> {
        let url = format!("{}/chat/completions", self.cfg.base_url());

        tracing::debug!(model = self.cfg.model(), "calling model");

        let resp = match self
            .client
            .post(url)
            .bearer_auth(self.cfg.api_key())
            .json(&self.request_body(prompt))
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) if e.is_timeout() => return Err(ModelError::Timeout(self.cfg.timeout())),
            Err(e) if e.is_connect() => return Err(ModelError::Connect(e.to_string())),
            Err(e) => return Err(e.into()),
        };

        let status = resp.status();
        if status != StatusCode::OK {
            let text = resp.text().await.unwrap_or_default();
            return Err(api_error(status, &text));
        }

        let body: ApiResponse = resp.json().await?;
        let text = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ModelError::EmptyResponse);
        }

        Ok(text)
    }

    fn model_name(&self) -> &str {
        self.cfg.model()
    }
}

fn api_error(status: StatusCode, body: &str) -> ModelError {
    const MAX_RAW_ERROR_CHARS: usize = 200;

    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|| body.chars().take(MAX_RAW_ERROR_CHARS).collect());

    ModelError::Api {
        status: status.as_u16(),
        message,
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ApiChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_prefers_structured_message() {
        let err = api_error(
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#,
        );
        assert!(matches!(
            err,
            ModelError::Api { status: 401, ref message } if message == "Invalid API Key"
        ));
        assert!(!err.is_retryable());
    }

    #[test]
    fn api_error_truncates_raw_body() {
        let body = "x".repeat(500);
        match api_error(StatusCode::BAD_GATEWAY, &body) {
            ModelError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message.len(), 200);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn retryable_kinds() {
        assert!(ModelError::Timeout(std::time::Duration::from_secs(1)).is_retryable());
        assert!(ModelError::Connect("refused".into()).is_retryable());
        assert!(ModelError::Api {
            status: 429,
            message: String::new()
        }
        .is_retryable());
        assert!(!ModelError::EmptyResponse.is_retryable());
        assert!(!ModelError::Config("x".into()).is_retryable());
    }
}
