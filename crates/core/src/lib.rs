//! # Triage Core
//!
//! Deterministic core of the symptom triage assistant.
//!
//! This crate contains pure, offline logic only:
//! - Message classification (emergency, false alarm, severity)
//! - Symptom knowledge lookup over a static, localised catalog
//! - Prompt assembly for the hosted model
//!
//! **No API concerns**: HTTP servers, the model client and response envelopes belong in
//! `api-rest`, `triage-model` and `api-shared`.

pub mod classifier;
pub mod config;
pub mod constants;
pub mod error;
pub mod knowledge;
pub mod prompt;

use std::sync::Arc;

pub use classifier::{classify, ClassificationResult};
pub use config::CoreConfig;
pub use error::{TriageError, TriageResult};
pub use knowledge::{lookup, Condition, ConditionId, HealthAnalysis, KnowledgeBase};
pub use prompt::{build_prompt, PromptContext};
pub use triage_types::{Locale, Severity, UserMessage};

/// One inbound chat turn as the core sees it.
#[derive(Clone, Debug, Default)]
pub struct Turn {
    /// Raw user text. Blank text is rejected by [`TriageService::assess`].
    pub message: String,
    /// Emergency state the caller already holds from an earlier turn.
    pub is_emergency: bool,
    /// Requested locale; `None` uses the configured default.
    pub locale: Option<Locale>,
    /// Opaque prior-turn context, only ever appended to the prompt.
    pub follow_up_answers: Vec<String>,
}

/// Everything the core derives from one turn.
#[derive(Clone, Debug)]
pub struct Assessment {
    pub message: UserMessage,
    pub locale: Locale,
    pub classification: ClassificationResult,
    pub analysis: HealthAnalysis,
    pub prompt: String,
}

/// Triage operations over the built-in knowledge base.
#[derive(Clone, Debug)]
pub struct TriageService {
    cfg: Arc<CoreConfig>,
    knowledge: &'static KnowledgeBase,
}

impl TriageService {
    /// Creates a new `TriageService` backed by the built-in knowledge base.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            cfg,
            knowledge: KnowledgeBase::builtin(),
        }
    }

    /// Creates a service over a caller-supplied knowledge base.
    pub fn with_knowledge(cfg: Arc<CoreConfig>, knowledge: &'static KnowledgeBase) -> Self {
        Self { cfg, knowledge }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        self.knowledge
    }

    /// Classify a turn, look up guidance and build the model prompt.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::InvalidInput` if the message is empty or whitespace only.
    pub fn assess(&self, turn: &Turn) -> TriageResult<Assessment> {
        let message = UserMessage::new(&turn.message)?;
        let locale = turn.locale.unwrap_or(self.cfg.default_locale());

        let classification = classify(message.as_str(), turn.is_emergency);
        let analysis = self.knowledge.analyze(message.as_str(), locale);

        tracing::info!(
            chars = message.char_len(),
            locale = %locale,
            emergency = classification.is_emergency,
            false_alarm = classification.is_false_alarm,
            severity = %classification.severity,
            patterns = analysis.matched_patterns.len(),
            "assessed turn"
        );

        let prompt = build_prompt(&PromptContext {
            message: message.as_str(),
            locale,
            classification: &classification,
            analysis: Some(&analysis),
            follow_up_answers: &turn.follow_up_answers,
            word_limit: self.cfg.response_word_limit(),
        });

        Ok(Assessment {
            message,
            locale,
            classification,
            analysis,
            prompt,
        })
    }
}

impl Default for TriageService {
    fn default() -> Self {
        Self::new(Arc::new(CoreConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(message: &str) -> Turn {
        Turn {
            message: message.into(),
            ..Turn::default()
        }
    }

    #[test]
    fn rejects_blank_message() {
        let service = TriageService::default();
        for msg in ["", "   ", "\n\t"] {
            let err = service.assess(&turn(msg)).expect_err("blank rejected");
            assert!(
                matches!(err, TriageError::InvalidInput(ref m) if m == "No message provided"),
                "unexpected error {err:?}"
            );
        }
    }

    #[test]
    fn assesses_symptom_turn() {
        let service = TriageService::default();
        let assessment = service
            .assess(&turn("I have a severe headache"))
            .expect("assessed");

        assert_eq!(assessment.locale, Locale::En);
        assert_eq!(assessment.classification.severity, Severity::High);
        assert!(!assessment.classification.is_emergency);
        assert_eq!(assessment.analysis.matched_patterns, ["headache"]);
        assert!(assessment.prompt.contains("I have a severe headache"));
    }

    #[test]
    fn uses_configured_default_locale() {
        let cfg = CoreConfig::new(Locale::Fr, 50).expect("valid config");
        let service = TriageService::new(Arc::new(cfg));

        let assessment = service.assess(&turn("toux")).expect("assessed");
        assert_eq!(assessment.locale, Locale::Fr);
        assert_eq!(assessment.analysis.conditions[0].name, "Rhume");
        assert!(assessment.prompt.contains("Respond in French."));
        assert!(assessment.prompt.ends_with("Keep responses under 50 words."));

        let explicit = Turn {
            locale: Some(Locale::Es),
            ..turn("toux")
        };
        let assessment = service.assess(&explicit).expect("assessed");
        assert_eq!(assessment.locale, Locale::Es);
    }

    #[test]
    fn carries_asserted_emergency() {
        let service = TriageService::default();
        let assessment = service
            .assess(&Turn {
                is_emergency: true,
                ..turn("just kidding")
            })
            .expect("assessed");

        assert!(assessment.classification.is_emergency);
        assert!(assessment.classification.is_false_alarm);
        assert!(assessment.prompt.contains("emergency number"));
    }
}
