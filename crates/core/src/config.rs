//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handlers never read environment variables themselves.

use crate::constants::{DEFAULT_RESPONSE_WORD_LIMIT, MAX_RESPONSE_WORD_LIMIT};
use crate::{TriageError, TriageResult};
use triage_types::Locale;

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    default_locale: Locale,
    response_word_limit: u32,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` if `response_word_limit` is zero or above
    /// [`MAX_RESPONSE_WORD_LIMIT`].
    pub fn new(default_locale: Locale, response_word_limit: u32) -> TriageResult<Self> {
        if response_word_limit == 0 || response_word_limit > MAX_RESPONSE_WORD_LIMIT {
            return Err(TriageError::InvalidInput(format!(
                "response word limit must be between 1 and {MAX_RESPONSE_WORD_LIMIT}"
            )));
        }

        Ok(Self {
            default_locale,
            response_word_limit,
        })
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    pub fn response_word_limit(&self) -> u32 {
        self.response_word_limit
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::En,
            response_word_limit: DEFAULT_RESPONSE_WORD_LIMIT,
        }
    }
}

/// Resolve the default locale from an optional environment value.
///
/// Missing, blank or unrecognised values all resolve to English.
pub fn locale_from_env_value(value: Option<String>) -> Locale {
    value
        .as_deref()
        .map(Locale::from_tag)
        .unwrap_or_default()
}

/// Parse the response word limit from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_RESPONSE_WORD_LIMIT`].
pub fn word_limit_from_env_value(value: Option<String>) -> TriageResult<u32> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_RESPONSE_WORD_LIMIT),
        Some(v) => v.parse::<u32>().map_err(|_| {
            TriageError::InvalidInput(format!("response word limit is not a number: {v}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_word_limit() {
        let err = CoreConfig::new(Locale::En, 0).expect_err("zero rejected");
        assert!(matches!(err, TriageError::InvalidInput(msg) if msg.contains("between 1")));
    }

    #[test]
    fn rejects_oversized_word_limit() {
        assert!(CoreConfig::new(Locale::En, MAX_RESPONSE_WORD_LIMIT + 1).is_err());
        assert!(CoreConfig::new(Locale::En, MAX_RESPONSE_WORD_LIMIT).is_ok());
    }

    #[test]
    fn default_matches_constants() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.default_locale(), Locale::En);
        assert_eq!(cfg.response_word_limit(), DEFAULT_RESPONSE_WORD_LIMIT);
    }

    #[test]
    fn locale_env_value_falls_back() {
        assert_eq!(locale_from_env_value(None), Locale::En);
        assert_eq!(locale_from_env_value(Some("fr".into())), Locale::Fr);
        assert_eq!(locale_from_env_value(Some("  ".into())), Locale::En);
        assert_eq!(locale_from_env_value(Some("it".into())), Locale::En);
    }

    #[test]
    fn word_limit_env_value_parses() {
        assert_eq!(
            word_limit_from_env_value(None).expect("default"),
            DEFAULT_RESPONSE_WORD_LIMIT
        );
        assert_eq!(
            word_limit_from_env_value(Some(" 60 ".into())).expect("parsed"),
            60
        );
        assert!(word_limit_from_env_value(Some("lots".into())).is_err());
    }
}
