//! Axum route handlers for the Session API: lifecycle and document intake.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SessionSummaryResponse {
    pub session_id: Uuid,
    pub job_title: Option<String>,
    pub document_count: usize,
    pub result_count: usize,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Per-file upload verdict. Rejections carry the human-readable reason so the
/// caller can show it next to the file name.
#[derive(Debug, Serialize)]
pub struct UploadVerdict {
    pub file_name: String,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub verdicts: Vec<UploadVerdict>,
    pub queued: usize,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<Json<CreateSessionResponse>, AppError> {
    let session_id = state.sessions.create().await;
    tracing::info!("Created session {session_id}");
    Ok(Json(CreateSessionResponse { session_id }))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSummaryResponse>, AppError> {
    let summary = state
        .sessions
        .with(session_id, |s| SessionSummaryResponse {
            session_id: s.id,
            job_title: s.job.as_ref().map(|j| j.title.clone()),
            document_count: s.documents.len(),
            result_count: s.results.len(),
            created_at: s.created_at,
        })
        .await?;
    Ok(Json(summary))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<StatusResponse>, AppError> {
    if !state.sessions.remove(session_id).await {
        return Err(AppError::NotFound(format!("Session {session_id} not found")));
    }
    tracing::info!("Deleted session {session_id}");
    Ok(Json(StatusResponse { status: "deleted" }))
}

/// POST /api/v1/sessions/:id/clear
///
/// Resets the session to its initial state (job, documents, results) while
/// keeping the session id valid.
pub async fn handle_clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<StatusResponse>, AppError> {
    state
        .sessions
        .with_mut(session_id, |s| s.clear_all())
        .await?;
    Ok(Json(StatusResponse { status: "cleared" }))
}

/// POST /api/v1/sessions/:id/documents
///
/// Multipart upload of candidate files. Each file is admitted or rejected
/// independently; one bad file never fails the whole request.
pub async fn handle_upload_documents(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut uploads = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue; // non-file form fields are ignored
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read '{file_name}': {e}")))?;
        uploads.push((file_name, data));
    }

    if uploads.is_empty() {
        return Err(AppError::Validation(
            "No files present in the upload".to_string(),
        ));
    }

    let verdicts = state
        .sessions
        .with_mut(session_id, |s| {
            uploads
                .into_iter()
                .map(|(file_name, data)| match s.documents.admit(&file_name, data) {
                    Ok(()) => UploadVerdict {
                        file_name,
                        accepted: true,
                        reason: None,
                    },
                    Err(e) => UploadVerdict {
                        file_name,
                        accepted: false,
                        reason: Some(e.to_string()),
                    },
                })
                .collect::<Vec<_>>()
        })
        .await?;

    let queued = verdicts.iter().filter(|v| v.accepted).count();
    tracing::info!(
        "Session {session_id}: queued {queued}/{} uploaded files",
        verdicts.len()
    );
    Ok(Json(UploadResponse { verdicts, queued }))
}

/// DELETE /api/v1/sessions/:id/documents/:file_name
pub async fn handle_remove_document(
    State(state): State<AppState>,
    Path((session_id, file_name)): Path<(Uuid, String)>,
) -> Result<Json<StatusResponse>, AppError> {
    let removed = state
        .sessions
        .with_mut(session_id, |s| s.documents.remove(&file_name))
        .await?;
    if !removed {
        return Err(AppError::NotFound(format!(
            "Document '{file_name}' is not in this session"
        )));
    }
    Ok(Json(StatusResponse { status: "removed" }))
}
