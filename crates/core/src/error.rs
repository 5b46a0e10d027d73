use triage_types::{Locale, TextError};

#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("duplicate symptom pattern id: {0}")]
    DuplicatePattern(&'static str),
    #[error("symptom pattern '{0}' has no keywords")]
    PatternWithoutKeywords(&'static str),
    #[error("missing {locale} translation for condition '{condition}'")]
    MissingTranslation {
        condition: &'static str,
        locale: Locale,
    },
}

impl From<TextError> for TriageError {
    fn from(err: TextError) -> Self {
        TriageError::InvalidInput(err.to_string())
    }
}

pub type TriageResult<T> = std::result::Result<T, TriageError>;
