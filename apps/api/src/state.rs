use std::sync::Arc;

use crate::config::Config;
use crate::extract::TextExtractor;
use crate::llm_client::ScoringClient;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub scoring: ScoringClient,
    /// Pluggable text extractor. Default: FileTextExtractor (PDF and DOCX).
    pub extractor: Arc<dyn TextExtractor>,
    pub config: Config,
}
