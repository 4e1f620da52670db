//! Axum route handlers for the Screening API: job setup, the analysis run,
//! cancellation, and the connection test.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::results::AnalysisResult;
use crate::screening::orchestrator::{analyze_all, AnalyzeError, AnalyzeOptions, CancelFlag};
use crate::screening::priorities::{extract_priorities, PriorityError, PriorityProfile};
use crate::screening::prompt::WeightConfig;
use crate::session::JobProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SetJobRequest {
    pub title: String,
    pub description: String,
    /// Optional custom scoring weights; defaults apply when omitted.
    pub weights: Option<WeightConfig>,
}

#[derive(Debug, Serialize)]
pub struct SetJobResponse {
    pub title: String,
    pub weights: WeightConfig,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analyzed: usize,
    /// Whether the dynamic rubric from priority extraction was applied, as
    /// opposed to the default fallback.
    pub priorities_applied: bool,
    pub results: Vec<AnalysisResult>,
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub cancelled: bool,
}

#[derive(Debug, Serialize)]
pub struct ConnectionTestResponse {
    pub connected: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/sessions/:id/job
///
/// Sets (or replaces) the job profile and scoring weights for the session.
/// Previously extracted priorities are discarded; the next analysis run
/// re-extracts them from the new description.
pub async fn handle_set_job(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SetJobRequest>,
) -> Result<Json<SetJobResponse>, AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Job title cannot be empty".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description cannot be empty".to_string(),
        ));
    }

    let weights = request.weights.unwrap_or_default();
    weights.validate().map_err(|sum| {
        AppError::Validation(format!("Scoring weights must sum to 100, got {sum}"))
    })?;

    let title = request.title.clone();
    state
        .sessions
        .with_mut(session_id, |s| {
            s.job = Some(JobProfile {
                title: request.title,
                description: request.description,
                extracted_priorities: None,
            });
            s.weights = weights;
        })
        .await?;

    Ok(Json(SetJobResponse { title, weights }))
}

/// POST /api/v1/sessions/:id/analyze
///
/// Runs the full analysis pipeline over every queued document: priority
/// extraction first, then batched extract → score → parse per document.
/// The canonical result collection is replaced wholesale on completion.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    // Snapshot the inputs and arm a fresh cancel flag. Document blobs are
    // `Bytes`, so the clone is cheap; no lock is held during the run.
    let cancel = CancelFlag::default();
    let (job, weights, documents) = {
        let cancel = cancel.clone();
        state
            .sessions
            .with_mut(session_id, move |s| {
                s.cancel = cancel;
                (
                    s.job.clone(),
                    s.weights,
                    s.documents.documents().to_vec(),
                )
            })
            .await?
    };

    let mut job = job.ok_or_else(|| {
        AppError::Validation("Set a job title and description before analyzing".to_string())
    })?;
    if documents.is_empty() {
        return Err(AppError::Validation(
            "No documents queued for analysis".to_string(),
        ));
    }

    job.extracted_priorities =
        run_priority_extraction(&state, &job.title, &job.description).await?;
    let priorities_applied = job.extracted_priorities.is_some();

    let options = AnalyzeOptions {
        batch_size: state.config.batch_size,
        batch_delay: Duration::from_millis(state.config.batch_delay_ms),
        call_timeout: Duration::from_secs(state.config.call_timeout_secs),
    };

    let results = analyze_all(
        &documents,
        &job,
        &weights,
        &state.scoring,
        state.extractor.as_ref(),
        &options,
        &cancel,
    )
    .await
    .map_err(|e| match e {
        AnalyzeError::InvalidWeights(_) => AppError::Validation(e.to_string()),
    })?;

    let analyzed = results.len();
    state
        .sessions
        .with_mut(session_id, |s| {
            s.job = Some(job);
            s.results.replace(results.clone());
        })
        .await?;

    tracing::info!("Session {session_id}: analysis complete, {analyzed} results");
    Ok(Json(AnalyzeResponse {
        analyzed,
        priorities_applied,
        results,
    }))
}

/// Priority extraction ahead of the batch run. A malformed reply falls back
/// to the default rubric; a remote failure aborts the run before any batch,
/// since every scoring call would hit the same error.
async fn run_priority_extraction(
    state: &AppState,
    title: &str,
    description: &str,
) -> Result<Option<PriorityProfile>, AppError> {
    match extract_priorities(&state.scoring, title, description).await {
        Ok(profile) => Ok(Some(profile)),
        Err(PriorityError::MalformedResponse) => {
            tracing::warn!("Priority extraction returned no usable JSON, using default rubric");
            Ok(None)
        }
        Err(PriorityError::Remote(e)) => Err(AppError::Remote(e)),
    }
}

/// POST /api/v1/sessions/:id/analyze/cancel
///
/// Signals the in-flight analysis run to stop at the next batch boundary.
pub async fn handle_cancel_analysis(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CancelResponse>, AppError> {
    state
        .sessions
        .with(session_id, |s| s.cancel.cancel())
        .await?;
    tracing::info!("Session {session_id}: cancellation requested");
    Ok(Json(CancelResponse { cancelled: true }))
}

/// GET /api/v1/connection-test
///
/// Round-trips a minimal prompt through the scoring API.
pub async fn handle_connection_test(
    State(state): State<AppState>,
) -> Json<ConnectionTestResponse> {
    Json(ConnectionTestResponse {
        connected: state.scoring.test_connection().await,
    })
}
