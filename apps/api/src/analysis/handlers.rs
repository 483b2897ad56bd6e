use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::analysis::runner::{spawn_ad_playback, spawn_analysis_job, JobTimings};
use crate::analysis::session::SessionSnapshot;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let session = state.sessions.create(
        state.config.ad_gate_required,
        state.config.ad_duration_secs as u32,
    );
    let snapshot = session.lock().await.snapshot();
    tracing::info!(session_id = %snapshot.id, "session created");
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(session_id)?;
    let snapshot = session.lock().await.snapshot();
    Ok(Json(snapshot))
}

/// DELETE /api/v1/sessions/:id — teardown; any ticking tasks are aborted
/// when the store entry drops.
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(session_id)?;
    tracing::info!(%session_id, "session removed");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/analyze
///
/// 202 when the simulated job starts. An empty file set is a 400; an
/// unsatisfied gate parks the session in `Gating` and returns 409 so the
/// client can show the ad overlay.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let session = state.sessions.get(session_id)?;

    // Transition first; only spawn the ticker once the machine is Running.
    session
        .lock()
        .await
        .request_analysis(state.notifier.as_ref())?;

    let job = spawn_analysis_job(
        session.clone(),
        state.analyzer.clone(),
        state.notifier.clone(),
        JobTimings::from_config(&state.config),
    );
    state.sessions.attach_analysis_job(session_id, job);

    let snapshot = session.lock().await.snapshot();
    Ok((StatusCode::ACCEPTED, Json(snapshot)))
}

/// POST /api/v1/sessions/:id/ad/start
pub async fn handle_start_ad(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let session = state.sessions.get(session_id)?;

    let playing = {
        let mut session = session.lock().await;
        session.start_ad(state.notifier.as_ref());
        session.gate().is_playing()
    };

    // Starting an already-satisfied gate is a no-op; no ticker to run.
    if playing {
        let job = spawn_ad_playback(
            session.clone(),
            state.notifier.clone(),
            Duration::from_secs(1),
        );
        state.sessions.attach_ad_job(session_id, job);
    }

    let snapshot = session.lock().await.snapshot();
    Ok((StatusCode::ACCEPTED, Json(snapshot)))
}

/// POST /api/v1/sessions/:id/ad/dismiss
///
/// While the ad is required and unwatched this re-signals the requirement
/// (409); once satisfied it is an accepted no-op.
pub async fn handle_dismiss_ad(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(session_id)?;
    let mut session = session.lock().await;
    session.dismiss_ad(state.notifier.as_ref())?;
    Ok(Json(session.snapshot()))
}
