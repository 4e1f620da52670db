mod config;
mod errors;
mod extract;
mod llm_client;
mod results;
mod routes;
mod screening;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extract::FileTextExtractor;
use crate::llm_client::{OpenAiBackend, ScoringClient};
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing or malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Screener API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the scoring client
    let backend = OpenAiBackend::new(
        config.openai_api_key.clone(),
        config.openai_model.clone(),
        config.call_timeout_secs,
    );
    let scoring = ScoringClient::new(Arc::new(backend), config.max_tokens, config.temperature);
    info!("Scoring client initialized (model: {})", config.openai_model);

    // Build app state
    let state = AppState {
        sessions: SessionStore::default(),
        scoring,
        extractor: Arc::new(FileTextExtractor),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
