use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every intake/session failure is recoverable: the session keeps its files
/// and the caller simply retries the action.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    #[error("File too large: {0}")]
    FileTooLarge(String),

    #[error("No files to analyze")]
    NoFiles,

    #[error("Advertisement must be watched before analysis")]
    GateUnsatisfied,

    #[error("Analysis already in progress")]
    AnalysisInProgress,

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code, also used in upload rejection items.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidFileType(_) => "INVALID_FILE_TYPE",
            AppError::FileTooLarge(_) => "FILE_TOO_LARGE",
            AppError::NoFiles => "NO_FILES",
            AppError::GateUnsatisfied => "AD_GATE_REQUIRED",
            AppError::AnalysisInProgress => "ANALYSIS_IN_PROGRESS",
            AppError::AnalysisFailed(_) => "ANALYSIS_FAILED",
            AppError::Multipart(_) => "MALFORMED_UPLOAD",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::InvalidFileType(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::FileTooLarge(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::NoFiles => (
                StatusCode::BAD_REQUEST,
                "Please upload a resume or cover letter first.".to_string(),
            ),
            AppError::GateUnsatisfied => (
                StatusCode::CONFLICT,
                "Please watch the advertisement to unlock your free analysis.".to_string(),
            ),
            AppError::AnalysisInProgress => (
                StatusCode::CONFLICT,
                "An analysis is already running for this session.".to_string(),
            ),
            AppError::AnalysisFailed(msg) => {
                tracing::error!("Analysis error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "There was an error analyzing your resume. Please try again.".to_string(),
                )
            }
            AppError::Multipart(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
