use crate::helpers::errors::compute_error_response;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use compute::error::ComputeError;
use model::entities::user;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for registering a new user
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct RegisterUserRequest {
    /// Email address (must be unique)
    #[validate(email)]
    pub email: String,
    /// Optional display name
    pub username: Option<String>,
    /// Password, stored as-is by the login stub
    pub password: String,
}

/// User response model. The password is never echoed back.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub username: Option<String>,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            username: model.username,
        }
    }
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/users/register",
    tag = "users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<UserResponse>),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn register_user(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<RegisterUserRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering register_user function");
    debug!("Registering user with email: {}", request.email);

    // Check if the email already exists
    let existing = user::Entity::find()
        .filter(user::Column::Email.eq(request.email.as_str()))
        .one(&state.db)
        .await
        .map_err(|e| compute_error_response(ComputeError::Database(e)))?;
    if existing.is_some() {
        warn!("Registration rejected, email already taken: {}", request.email);
        return Err(compute_error_response(ComputeError::Conflict(
            "Email already registered".to_string(),
        )));
    }

    let new_user = user::ActiveModel {
        email: Set(request.email.clone()),
        username: Set(request.username.clone()),
        password: Set(request.password.clone()),
        ..Default::default()
    };

    match new_user.insert(&state.db).await {
        Ok(user_model) => {
            info!(
                "User registered successfully with ID: {}, email: {}",
                user_model.id, user_model.email
            );
            let response = ApiResponse {
                data: UserResponse::from(user_model),
                message: "User registered successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to register user '{}': {}", request.email, db_error);
            Err(compute_error_response(ComputeError::Database(db_error)))
        }
    }
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_user function for user_id: {}", user_id);

    let user_model = crate::helpers::lookup::user_by_id(&state.db, user_id)
        .await
        .map_err(compute_error_response)?;

    debug!("Successfully retrieved user with ID: {}", user_model.id);
    let response = ApiResponse {
        data: UserResponse::from(user_model),
        message: "User retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
