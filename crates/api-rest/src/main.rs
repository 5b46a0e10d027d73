//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the triage REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging when you only want the REST server (with
//! OpenAPI/Swagger UI). The workspace's main `triage-run` binary starts the same router.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{serve, AppState, DEFAULT_REST_ADDR};

/// Main entry point for the REST API server
///
/// # Environment Variables
/// - `TRIAGE_REST_ADDR`: server address (default: "0.0.0.0:3000")
/// - see [`AppState::from_env`] for the triage and model settings
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("triage_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("TRIAGE_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());
    tracing::info!("++ Starting triage REST API on {}", addr);

    let state = AppState::from_env()?;
    serve(&addr, state).await
}
