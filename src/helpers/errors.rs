use axum::{http::StatusCode, response::Json};
use compute::ComputeError;
use tracing::{error, warn};

use crate::schemas::ErrorResponse;

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Builds the error tuple returned by handlers.
pub fn error_response(status: StatusCode, code: &str, error: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Maps compute failures onto HTTP statuses.
pub fn compute_error(err: ComputeError) -> HandlerError {
    match &err {
        ComputeError::InvalidRange { .. } => {
            warn!("Rejected request: {}", err);
            error_response(StatusCode::BAD_REQUEST, "INVALID_RANGE", err.to_string())
        }
        ComputeError::InvalidInput(_) => {
            warn!("Rejected request: {}", err);
            error_response(StatusCode::BAD_REQUEST, "INVALID_INPUT", err.to_string())
        }
        ComputeError::NotFound(_) => {
            warn!("Lookup failed: {}", err);
            error_response(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string())
        }
        ComputeError::InvalidSettings(_) => {
            error!("Settings error while serving request: {}", err);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "SETTINGS_ERROR", err.to_string())
        }
    }
}
