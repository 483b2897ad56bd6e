pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers as session_handlers;
use crate::intake::handlers as intake_handlers;
use crate::pricing;
use crate::state::AppState;

/// Multipart body ceiling. Larger than the 5 MiB per-file limit on purpose:
/// oversized files must reach the validator so the caller gets the
/// distinguishable FILE_TOO_LARGE rejection instead of a transport error.
const MAX_UPLOAD_BODY_BYTES: usize = 16 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
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
        // Intake
        .route(
            "/api/v1/sessions/:id/files",
            post(intake_handlers::handle_upload).delete(intake_handlers::handle_clear),
        )
        .route(
            "/api/v1/sessions/:id/files/:index",
            delete(intake_handlers::handle_remove),
        )
        // Analysis + ad gate
        .route(
            "/api/v1/sessions/:id/analyze",
            post(session_handlers::handle_analyze),
        )
        .route(
            "/api/v1/sessions/:id/ad/start",
            post(session_handlers::handle_start_ad),
        )
        .route(
            "/api/v1/sessions/:id/ad/dismiss",
            post(session_handlers::handle_dismiss_ad),
        )
        // Pricing
        .route("/api/v1/pricing/tiers", get(pricing::handle_list_tiers))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES))
        .with_state(state)
}
