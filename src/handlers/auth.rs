use crate::handlers::users::UserResponse;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use compute::error::ComputeError;
use model::entities::user;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, trace, warn};
use utoipa::ToSchema;

use crate::helpers::errors::compute_error_response;

/// Request body for logging in
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Log a user in.
///
/// This is a plaintext comparison stub, kept for parity with the rest of the
/// API surface; it issues no session or token.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = ApiResponse<UserResponse>),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering login function");

    let user_model = user::Entity::find()
        .filter(user::Column::Email.eq(request.email.as_str()))
        .one(&state.db)
        .await
        .map_err(|e| compute_error_response(ComputeError::Database(e)))?;

    match user_model {
        Some(user_model) if user_model.password == request.password => {
            info!("User {} logged in", user_model.id);
            let response = ApiResponse {
                data: UserResponse::from(user_model),
                message: "Login successful".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        _ => {
            warn!("Rejected login attempt for email: {}", request.email);
            Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Invalid credentials".to_string(),
                    code: "INVALID_CREDENTIALS".to_string(),
                    success: false,
                }),
            ))
        }
    }
}
