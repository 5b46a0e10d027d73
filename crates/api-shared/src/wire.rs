//! JSON wire models for the triage HTTP API.
//!
//! Field names are camelCase on the wire to match the browser client. These types carry no
//! behaviour; conversion from core types happens in `api-rest`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// One user turn.
///
/// `message` is optional at the type level so that a missing message produces the
/// "No message provided" error rather than a generic body rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatReq {
    #[serde(default)]
    pub message: Option<String>,
    /// Running emergency state held by the client from earlier turns.
    #[serde(default)]
    pub is_emergency: bool,
    /// Locale tag (`en`, `es`, `fr`); anything else is treated as `en`.
    #[serde(default)]
    pub language: Option<String>,
    /// Answers to earlier follow-up questions. Passed to the model as context only.
    #[serde(default)]
    pub follow_up_answers: Vec<String>,
}

/// A candidate condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConditionRes {
    pub name: String,
    pub description: String,
    /// `low`, `medium` or `high`.
    pub severity: String,
}

/// Structured guidance from the symptom catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRes {
    pub conditions: Vec<ConditionRes>,
    pub care_tips: Vec<String>,
    pub seek_help: Vec<String>,
    pub matched_patterns: Vec<String>,
}

/// Reply to a chat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRes {
    /// Model-generated reply text.
    pub response: String,
    pub is_emergency: bool,
    pub is_false_alarm: bool,
    pub severity: String,
    pub language: String,
    pub analysis: AnalysisRes,
    pub disclaimer: String,
}

/// Offline classification and lookup, without a model call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRes {
    pub is_emergency: bool,
    pub is_false_alarm: bool,
    pub severity: String,
    pub language: String,
    pub analysis: AnalysisRes,
}

/// Error body returned with 4xx/5xx statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_req_reads_camel_case_and_defaults() {
        let req: ChatReq = serde_json::from_str(
            r#"{"message":"hi","isEmergency":true,"followUpAnswers":["two days"]}"#,
        )
        .expect("parse");
        assert_eq!(req.message.as_deref(), Some("hi"));
        assert!(req.is_emergency);
        assert_eq!(req.language, None);
        assert_eq!(req.follow_up_answers, ["two days"]);

        let empty: ChatReq = serde_json::from_str("{}").expect("parse");
        assert_eq!(empty, ChatReq::default());
    }

    #[test]
    fn error_res_omits_missing_details() {
        let body = serde_json::to_value(ErrorRes::new("No message provided")).expect("serialise");
        assert_eq!(body, serde_json::json!({"error": "No message provided"}));

        let body = serde_json::to_value(
            ErrorRes::new("Failed to get AI response").with_details("timed out"),
        )
        .expect("serialise");
        assert_eq!(body["details"], "timed out");
    }
}
