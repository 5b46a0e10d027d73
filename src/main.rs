use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, DEFAULT_REST_ADDR, serve};
use triage_core::KnowledgeBase;

/// Main entry point for the triage assistant
///
/// Resolves configuration once, checks the built-in knowledge base and starts the REST server.
///
/// # Environment Variables
/// - `TRIAGE_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `TRIAGE_DEFAULT_LOCALE`, `TRIAGE_RESPONSE_WORD_LIMIT`: triage settings
/// - `GROQ_API_KEY`, `TRIAGE_MODEL_BASE_URL`, `TRIAGE_MODEL`, `TRIAGE_MAX_TOKENS`,
///   `TRIAGE_MODEL_TIMEOUT_SECS`: model client settings
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("triage_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("triage_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("TRIAGE_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());

    let knowledge = KnowledgeBase::builtin();
    tracing::info!(
        patterns = knowledge.patterns().len(),
        "++ Loaded symptom catalog"
    );
    tracing::info!("++ Starting triage REST on {}", rest_addr);

    let state = AppState::from_env()?;
    serve(&rest_addr, state).await
}
