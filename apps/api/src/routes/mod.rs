pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::session::documents::MAX_FILE_BYTES;

use crate::results::handlers as results_handlers;
use crate::screening::handlers as screening_handlers;
use crate::session::handlers as session_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/connection-test",
            get(screening_handlers::handle_connection_test),
        )
        // Session lifecycle
        .route(
            "/api/v1/sessions",
            post(session_handlers::handle_create_session),
        )
        .route(
            "/api/v1/sessions/:id",
            get(session_handlers::handle_get_session)
                .delete(session_handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/clear",
            post(session_handlers::handle_clear_session),
        )
        // Document intake
        .route(
            "/api/v1/sessions/:id/documents",
            post(session_handlers::handle_upload_documents),
        )
        .route(
            "/api/v1/sessions/:id/documents/:file_name",
            delete(session_handlers::handle_remove_document),
        )
        // Screening
        .route(
            "/api/v1/sessions/:id/job",
            put(screening_handlers::handle_set_job),
        )
        .route(
            "/api/v1/sessions/:id/analyze",
            post(screening_handlers::handle_analyze),
        )
        .route(
            "/api/v1/sessions/:id/analyze/cancel",
            post(screening_handlers::handle_cancel_analysis),
        )
        // Results
        .route(
            "/api/v1/sessions/:id/results",
            get(results_handlers::handle_get_results),
        )
        .route(
            "/api/v1/sessions/:id/analytics",
            get(results_handlers::handle_get_analytics),
        )
        .route(
            "/api/v1/sessions/:id/export/:format",
            get(results_handlers::handle_export),
        )
        // Uploads may carry several files per request; cap well above the
        // per-file admission limit instead of axum's 2 MB default.
        .layer(DefaultBodyLimit::max(8 * MAX_FILE_BYTES))
        .with_state(state)
}
