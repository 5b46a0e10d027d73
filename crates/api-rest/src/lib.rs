//! # API REST
//!
//! REST API implementation for the triage assistant.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON envelopes, status codes, CORS)
//!
//! Classification, lookup and prompt assembly come from `triage-core`; the reply text comes
//! from whatever [`ModelClient`] the state holds.

#![warn(rust_2018_idioms)]

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    AnalysisRes, AnalyzeRes, ChatReq, ChatRes, ConditionRes, ErrorRes, HealthRes, HealthService,
};
use triage_core::{
    config::{locale_from_env_value, word_limit_from_env_value},
    constants::MEDICAL_DISCLAIMER,
    Assessment, CoreConfig, HealthAnalysis, KnowledgeBase, Locale, TriageError, TriageService,
    Turn,
};
use triage_model::{ChatCompletionsClient, ModelClient, ModelConfig};

/// Default listen address for the REST server.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

const NO_MESSAGE: &str = "No message provided";
const MODEL_FAILURE: &str = "Failed to get AI response";

type ApiError = (StatusCode, Json<ErrorRes>);

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    triage: TriageService,
    model: Arc<dyn ModelClient>,
}

impl AppState {
    pub fn new(triage: TriageService, model: Arc<dyn ModelClient>) -> Self {
        Self { triage, model }
    }

    /// Resolve configuration from the process environment.
    ///
    /// # Environment Variables
    /// - `TRIAGE_DEFAULT_LOCALE`: locale used when a request names none (default: `en`)
    /// - `TRIAGE_RESPONSE_WORD_LIMIT`: word limit given to the model (default: 100)
    /// - `GROQ_API_KEY`: API key for the model endpoint (required)
    /// - `TRIAGE_MODEL_BASE_URL`: OpenAI-compatible base URL (default: Groq)
    /// - `TRIAGE_MODEL`: model name (default: `llama-3.1-8b-instant`)
    /// - `TRIAGE_MAX_TOKENS`: completion token cap (default: 150)
    /// - `TRIAGE_MODEL_TIMEOUT_SECS`: model request timeout (default: 30)
    ///
    /// # Errors
    /// Returns an error if:
    /// - a configured value is invalid,
    /// - the built-in knowledge base is missing a translation, or
    /// - the HTTP client for the model cannot be built.
    pub fn from_env() -> anyhow::Result<Self> {
        KnowledgeBase::builtin().validate()?;

        let cfg = CoreConfig::new(
            locale_from_env_value(std::env::var("TRIAGE_DEFAULT_LOCALE").ok()),
            word_limit_from_env_value(std::env::var("TRIAGE_RESPONSE_WORD_LIMIT").ok())?,
        )?;

        let model_cfg = ModelConfig::from_env_values(
            std::env::var("GROQ_API_KEY").ok(),
            std::env::var("TRIAGE_MODEL_BASE_URL").ok(),
            std::env::var("TRIAGE_MODEL").ok(),
            std::env::var("TRIAGE_MAX_TOKENS").ok(),
            std::env::var("TRIAGE_MODEL_TIMEOUT_SECS").ok(),
        )?;

        tracing::info!(
            locale = %cfg.default_locale(),
            word_limit = cfg.response_word_limit(),
            model = model_cfg.model(),
            base_url = model_cfg.base_url(),
            "resolved configuration"
        );

        let model = ChatCompletionsClient::new(model_cfg)?;
        Ok(Self::new(
            TriageService::new(Arc::new(cfg)),
            Arc::new(model),
        ))
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, chat, analyze),
    components(schemas(
        HealthRes,
        ChatReq,
        ChatRes,
        AnalyzeRes,
        AnalysisRes,
        ConditionRes,
        ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with OpenAPI docs and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/analyze", post(analyze))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("-- Triage REST API listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatReq,
    responses(
        (status = 200, description = "Assistant reply with triage flags", body = ChatRes),
        (status = 400, description = "No message provided", body = ErrorRes),
        (status = 500, description = "Model call failed", body = ErrorRes)
    )
)]
/// Handle one chat turn
///
/// Classifies the message, looks up catalog guidance, asks the model for a reply and folds all
/// three into one response.
///
/// # Errors
/// Returns `400 Bad Request` if the body is malformed or the message is missing or blank, and
/// `500 Internal Server Error` if the model call fails.
#[axum::debug_handler]
async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatReq>, JsonRejection>,
) -> Result<Json<ChatRes>, ApiError> {
    let assessment = assess(&state, payload)?;

    let reply = match state.model.generate(&assessment.prompt).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(
                model = state.model.model_name(),
                retryable = e.is_retryable(),
                "Model call error: {e}"
            );
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorRes::new(MODEL_FAILURE).with_details(e.to_string())),
            ));
        }
    };

    let classification = assessment.classification;
    Ok(Json(ChatRes {
        response: reply,
        is_emergency: classification.is_emergency,
        is_false_alarm: classification.is_false_alarm,
        severity: classification.severity.to_string(),
        language: assessment.locale.to_string(),
        analysis: analysis_res(assessment.analysis),
        disclaimer: MEDICAL_DISCLAIMER.to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = ChatReq,
    responses(
        (status = 200, description = "Offline triage flags and catalog guidance", body = AnalyzeRes),
        (status = 400, description = "No message provided", body = ErrorRes)
    )
)]
/// Classify and look up a message without calling the model
#[axum::debug_handler]
async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<ChatReq>, JsonRejection>,
) -> Result<Json<AnalyzeRes>, ApiError> {
    let assessment = assess(&state, payload)?;
    let classification = assessment.classification;

    Ok(Json(AnalyzeRes {
        is_emergency: classification.is_emergency,
        is_false_alarm: classification.is_false_alarm,
        severity: classification.severity.to_string(),
        language: assessment.locale.to_string(),
        analysis: analysis_res(assessment.analysis),
    }))
}

fn assess(
    state: &AppState,
    payload: Result<Json<ChatReq>, JsonRejection>,
) -> Result<Assessment, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!("Rejected request body: {rejection}");
        bad_request(ErrorRes::new(NO_MESSAGE).with_details(rejection.body_text()))
    })?;

    let turn = Turn {
        message: req.message.unwrap_or_default(),
        is_emergency: req.is_emergency,
        locale: req.language.as_deref().map(Locale::from_tag),
        follow_up_answers: req.follow_up_answers,
    };

    state.triage.assess(&turn).map_err(|e| match e {
        TriageError::InvalidInput(_) => bad_request(ErrorRes::new(NO_MESSAGE)),
        other => {
            tracing::error!("Assess error: {other:?}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorRes::new("Internal error")),
            )
        }
    })
}

fn bad_request(body: ErrorRes) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(body))
}

fn analysis_res(analysis: HealthAnalysis) -> AnalysisRes {
    AnalysisRes {
        conditions: analysis
            .conditions
            .into_iter()
            .map(|c| ConditionRes {
                name: c.name,
                description: c.description,
                severity: c.severity.to_string(),
            })
            .collect(),
        care_tips: analysis.care_tips,
        seek_help: analysis.seek_help,
        matched_patterns: analysis.matched_patterns,
    }
}
