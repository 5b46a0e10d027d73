//! Constants used throughout the triage core crate.

/// Word limit given to the model when no override is configured.
pub const DEFAULT_RESPONSE_WORD_LIMIT: u32 = 100;

/// Upper bound accepted for the configured response word limit.
pub const MAX_RESPONSE_WORD_LIMIT: u32 = 1_000;

/// Persona line that opens every prompt.
pub const ASSISTANT_PERSONA: &str = "You are a medical assistant AI.";

/// Disclaimer returned alongside every assistant reply.
pub const MEDICAL_DISCLAIMER: &str = "This AI provides general health information only. \
Always consult healthcare professionals for medical advice.";
