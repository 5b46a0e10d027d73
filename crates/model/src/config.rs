//! Model client configuration, resolved once at startup.

use std::time::Duration;

use crate::{ModelError, ModelResult};

/// Groq's OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

pub const DEFAULT_MAX_TOKENS: u32 = 150;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection and generation settings for the hosted model.
#[derive(Clone)]
pub struct ModelConfig {
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

impl ModelConfig {
    /// Create a new `ModelConfig`.
    ///
    /// Trailing slashes are removed from `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Config` if the API key or model is blank, the base URL is not
    /// http(s), or `max_tokens` / `timeout` is zero.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        max_tokens: u32,
        timeout: Duration,
    ) -> ModelResult<Self> {
        let api_key = api_key.into();
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        let model = model.into();

        if api_key.trim().is_empty() {
            return Err(ModelError::Config("api key cannot be empty".into()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ModelError::Config(format!(
                "base url must start with http:// or https://: {base_url}"
            )));
        }
        if model.trim().is_empty() {
            return Err(ModelError::Config("model cannot be empty".into()));
        }
        if max_tokens == 0 {
            return Err(ModelError::Config("max tokens must be positive".into()));
        }
        if timeout.is_zero() {
            return Err(ModelError::Config("timeout must be positive".into()));
        }

        Ok(Self {
            api_key,
            base_url,
            model,
            max_tokens,
            timeout,
        })
    }

    /// Build a config from raw environment values, applying defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Config` if the API key is missing or a numeric value does not
    /// parse, plus anything [`ModelConfig::new`] rejects.
    pub fn from_env_values(
        api_key: Option<String>,
        base_url: Option<String>,
        model: Option<String>,
        max_tokens: Option<String>,
        timeout_secs: Option<String>,
    ) -> ModelResult<Self> {
        let api_key = non_blank(api_key)
            .ok_or_else(|| ModelError::Config("GROQ_API_KEY is not set".into()))?;
        let base_url = non_blank(base_url).unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let model = non_blank(model).unwrap_or_else(|| DEFAULT_MODEL.into());

        let max_tokens = match non_blank(max_tokens) {
            Some(v) => v
                .parse::<u32>()
                .map_err(|_| ModelError::Config(format!("max tokens is not a number: {v}")))?,
            None => DEFAULT_MAX_TOKENS,
        };
        let timeout = match non_blank(timeout_secs) {
            Some(v) => Duration::from_secs(
                v.parse::<u64>()
                    .map_err(|_| ModelError::Config(format!("timeout is not a number: {v}")))?,
            ),
            None => DEFAULT_TIMEOUT,
        };

        Self::new(api_key, base_url, model, max_tokens, timeout)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

// Hand-written so the key never reaches a log line.
impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_values_apply_defaults() {
        let cfg = ModelConfig::from_env_values(Some("gsk-test".into()), None, None, None, None)
            .expect("valid config");
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
        assert_eq!(cfg.model(), DEFAULT_MODEL);
        assert_eq!(cfg.max_tokens(), DEFAULT_MAX_TOKENS);
        assert_eq!(cfg.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn env_values_require_api_key() {
        let err = ModelConfig::from_env_values(Some("  ".into()), None, None, None, None)
            .expect_err("missing key rejected");
        assert!(matches!(err, ModelError::Config(msg) if msg.contains("GROQ_API_KEY")));
    }

    #[test]
    fn env_values_reject_bad_numbers() {
        let err = ModelConfig::from_env_values(
            Some("k".into()),
            None,
            None,
            Some("many".into()),
            None,
        )
        .expect_err("bad max tokens");
        assert!(matches!(err, ModelError::Config(msg) if msg.contains("max tokens")));

        assert!(
            ModelConfig::from_env_values(Some("k".into()), None, None, None, Some("0".into()))
                .is_err()
        );
    }

    #[test]
    fn trims_trailing_slash_and_checks_scheme() {
        let cfg = ModelConfig::new("k", "http://localhost:11434/v1/", "m", 10, DEFAULT_TIMEOUT)
            .expect("valid config");
        assert_eq!(cfg.base_url(), "http://localhost:11434/v1");

        assert!(ModelConfig::new("k", "ftp://example.com", "m", 10, DEFAULT_TIMEOUT).is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let cfg = ModelConfig::new("gsk-secret", DEFAULT_BASE_URL, "m", 10, DEFAULT_TIMEOUT)
            .expect("valid config");
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("gsk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
