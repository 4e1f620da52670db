//! Axum route handlers for the Results API: derived views, analytics, and
//! exports. All of these are read-only projections of the canonical result
//! collection.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::results::analytics::{score_distribution, skills_cloud, ScoreBucket, SkillTag};
use crate::results::export;
use crate::results::view::{apply_filters, build_view, sort_results, ResultPage, ViewQuery};
use crate::results::AnalysisResult;
use crate::state::AppState;

/// Words shown in the skills cloud.
const SKILLS_CLOUD_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Report,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub total: usize,
    pub distribution: Vec<ScoreBucket>,
    pub skills_cloud: Vec<SkillTag>,
}

/// GET /api/v1/sessions/:id/results
///
/// Filtered, sorted, paginated view of the result collection. Recomputed per
/// request; no view state is stored server-side.
pub async fn handle_get_results(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ResultPage>, AppError> {
    let page = state
        .sessions
        .with(session_id, |s| build_view(s.results.all(), &query))
        .await?;
    Ok(Json(page))
}

/// GET /api/v1/sessions/:id/analytics
///
/// Score distribution and skills cloud over the filtered (unpaginated) view.
pub async fn handle_get_analytics(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let filtered = filtered_view(&state, session_id, &query).await?;
    Ok(Json(AnalyticsResponse {
        total: filtered.len(),
        distribution: score_distribution(&filtered),
        skills_cloud: skills_cloud(&filtered, SKILLS_CLOUD_LIMIT),
    }))
}

/// GET /api/v1/sessions/:id/export/:format
///
/// Exports the filtered, sorted view (all pages) as a downloadable file.
pub async fn handle_export(
    State(state): State<AppState>,
    Path((session_id, format)): Path<(Uuid, ExportFormat)>,
    Query(query): Query<ViewQuery>,
) -> Result<Response, AppError> {
    let results = filtered_view(&state, session_id, &query).await?;
    if results.is_empty() {
        return Err(AppError::Validation("No results to export".to_string()));
    }

    let (content_type, file_name, body) = match format {
        ExportFormat::Csv => (
            "text/csv",
            "cv_analysis_results.csv",
            export::to_csv(&results)?,
        ),
        ExportFormat::Json => (
            "application/json",
            "cv_analysis_results.json",
            export::to_json(&results)?,
        ),
        ExportFormat::Report => (
            "text/plain",
            "cv_analysis_report.txt",
            export::to_report(&results),
        ),
    };

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response())
}

/// The filtered and sorted (but unpaginated) view used by analytics and
/// exports, so they always agree with what the results table shows.
async fn filtered_view(
    state: &AppState,
    session_id: Uuid,
    query: &ViewQuery,
) -> Result<Vec<AnalysisResult>, AppError> {
    state
        .sessions
        .with(session_id, |s| {
            let mut filtered = apply_filters(s.results.all(), &query.filters());
            sort_results(&mut filtered, query.sort);
            filtered
        })
        .await
}
