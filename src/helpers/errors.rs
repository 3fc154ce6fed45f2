use axum::http::StatusCode;
use axum::response::Json;
use compute::error::ComputeError;
use tracing::{error, warn};

use crate::schemas::ErrorResponse;

/// Map a compute-layer error onto the HTTP error envelope.
///
/// NotFound becomes 404, Validation 422, Conflict 409 and database failures
/// 500 with the underlying message surfaced.
pub fn compute_error_response(err: ComputeError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &err {
        ComputeError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ComputeError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
        ComputeError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
        ComputeError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Request failed: {}", err);
    } else {
        warn!("Request rejected: {}", err);
    }

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: code.to_string(),
            success: false,
        }),
    )
}
