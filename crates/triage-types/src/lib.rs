//! Shared primitive types for the triage workspace.
//!
//! These types sit below both the core engine and the API crates so that a user message, a
//! locale tag or a severity level means the same thing on every side of the HTTP boundary.

use serde::{Deserialize, Serialize};

/// Errors that can occur when creating validated message types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("No message provided")]
    Empty,
}

/// A user turn that is guaranteed to contain at least one non-whitespace character.
///
/// Leading and trailing whitespace is trimmed during construction. Interior content is kept
/// byte-for-byte; the classifier does its own normalisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage(String);

impl UserMessage {
    /// Creates a new `UserMessage` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `Err(TextError::Empty)` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the message in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for UserMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UserMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for UserMessage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UserMessage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        UserMessage::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Supported response locales.
///
/// The set is closed. Any unrecognised tag resolves to [`Locale::En`] rather than failing, so a
/// client sending `"de"` or `"en-GB"` still gets an answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    En,
    Es,
    Fr,
}

impl Locale {
    /// All supported locales, in declaration order.
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Es, Locale::Fr];

    /// Resolve a locale tag, falling back to English.
    ///
    /// Matching is case-insensitive and ignores a region suffix, so `"ES"`, `"es-MX"` and
    /// `"es_ES"` all resolve to Spanish.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "es" => Locale::Es,
            "fr" => Locale::Fr,
            _ => Locale::En,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
            Locale::Fr => "fr",
        }
    }

    /// English name of the language, used when instructing the model.
    pub fn language_name(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Es => "Spanish",
            Locale::Fr => "French",
        }
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Locale::from_tag(tag)
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for Locale {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Locale::from_tag(&s))
    }
}

/// Severity level attached to a message or a candidate condition.
///
/// Ordered so that `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_trims_and_rejects_blank() {
        let msg = UserMessage::new("  I have a headache \n").expect("valid message");
        assert_eq!(msg.as_str(), "I have a headache");

        assert!(matches!(UserMessage::new(""), Err(TextError::Empty)));
        assert!(matches!(UserMessage::new(" \t\n"), Err(TextError::Empty)));
    }

    #[test]
    fn user_message_counts_chars_not_bytes() {
        let msg = UserMessage::new("fièvre 😂").expect("valid message");
        assert_eq!(msg.char_len(), 8);
    }

    #[test]
    fn user_message_deserialize_rejects_blank() {
        let err = serde_json::from_str::<UserMessage>("\"   \"").expect_err("blank rejected");
        assert!(err.to_string().contains("No message provided"));
    }

    #[test]
    fn locale_resolves_known_tags() {
        assert_eq!(Locale::from_tag("en"), Locale::En);
        assert_eq!(Locale::from_tag("ES"), Locale::Es);
        assert_eq!(Locale::from_tag("fr-CA"), Locale::Fr);
        assert_eq!(Locale::from_tag("es_MX"), Locale::Es);
    }

    #[test]
    fn locale_falls_back_to_english() {
        assert_eq!(Locale::from_tag("de"), Locale::En);
        assert_eq!(Locale::from_tag(""), Locale::En);
        assert_eq!(Locale::from_tag("klingon"), Locale::En);

        let parsed: Locale = serde_json::from_str("\"pt-BR\"").expect("never fails");
        assert_eq!(parsed, Locale::En);
    }

    #[test]
    fn severity_serialises_lowercase_and_orders() {
        assert_eq!(
            serde_json::to_string(&Severity::High).expect("serialise"),
            "\"high\""
        );
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
    }
}
