use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::session::SessionSnapshot;
use crate::errors::AppError;
use crate::intake::models::{CandidateFile, FileEntry};
use crate::state::AppState;

/// Per-file rejection item. The upload as a whole still succeeds for the
/// accepted subset.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedFile {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub accepted: Vec<FileEntry>,
    pub rejected: Vec<RejectedFile>,
}

/// POST /api/v1/sessions/:id/files
pub async fn handle_upload(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let session = state.sessions.get(session_id)?;

    let mut candidates = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let filename = field
            .file_name()
            .unwrap_or("upload")
            .to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await?;
        candidates.push(CandidateFile {
            filename,
            content_type,
            bytes,
        });
    }

    let mut session = session.lock().await;
    let outcome = session.submit_files(candidates, state.notifier.as_ref());

    Ok(Json(UploadResponse {
        accepted: outcome.accepted,
        rejected: outcome
            .rejected
            .iter()
            .map(|err| RejectedFile {
                code: err.code().to_string(),
                message: err.to_string(),
            })
            .collect(),
    }))
}

/// DELETE /api/v1/sessions/:id/files/:index
pub async fn handle_remove(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(Uuid, usize)>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(session_id)?;
    let mut session = session.lock().await;
    session.remove_file(index)?;
    Ok(Json(session.snapshot()))
}

/// DELETE /api/v1/sessions/:id/files
pub async fn handle_clear(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(session_id)?;
    let mut session = session.lock().await;
    session.clear_files();
    Ok(Json(session.snapshot()))
}
