use crate::helpers::errors::compute_error_response;
use crate::helpers::lookup;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use compute::error::ComputeError;
use compute::goals::{self, GoalRow};
use compute::kinds::GoalKind;
use model::entities::user;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;

/// A goal as shown on the profile: its month and stored percentage.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GoalInfo {
    pub date: NaiveDate,
    pub value: Decimal,
}

impl From<GoalRow> for GoalInfo {
    fn from(row: GoalRow) -> Self {
        Self {
            date: row.date,
            value: row.value,
        }
    }
}

/// Profile response: user info plus, per kind, the current month's goal or
/// the most recent one.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub expense_goal: Option<GoalInfo>,
    pub saving_goal: Option<GoalInfo>,
    pub investment_goal: Option<GoalInfo>,
}

/// Request body for updating a profile
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Get a user's profile
#[utoipa::path(
    get,
    path = "/profile/{user_id}",
    tag = "profile",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "Profile retrieved successfully", body = ApiResponse<ProfileResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_profile(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ProfileResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_profile function for user_id: {}", user_id);

    let user_model = lookup::user_by_id(&state.db, user_id)
        .await
        .map_err(compute_error_response)?;

    let today = chrono::Utc::now().date_naive();
    let expense_goal = goals::current_or_latest_goal(&state.db, GoalKind::Expense, user_id, today)
        .await
        .map_err(compute_error_response)?;
    let saving_goal = goals::current_or_latest_goal(&state.db, GoalKind::Saving, user_id, today)
        .await
        .map_err(compute_error_response)?;
    let investment_goal =
        goals::current_or_latest_goal(&state.db, GoalKind::Investment, user_id, today)
            .await
            .map_err(compute_error_response)?;

    let username = user_model
        .username
        .clone()
        .unwrap_or_else(|| user_model.email.clone());

    debug!("Profile assembled for user {}", user_id);
    let response = ApiResponse {
        data: ProfileResponse {
            id: user_model.id,
            email: user_model.email,
            username,
            expense_goal: expense_goal.map(GoalInfo::from),
            saving_goal: saving_goal.map(GoalInfo::from),
            investment_goal: investment_goal.map(GoalInfo::from),
        },
        message: "Profile retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Update a user's profile
#[utoipa::path(
    put,
    path = "/profile/{user_id}",
    tag = "profile",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated successfully", body = ApiResponse<ProfileResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn update_profile(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<ProfileResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_profile function for user_id: {}", user_id);

    let user_model = lookup::user_by_id(&state.db, user_id)
        .await
        .map_err(compute_error_response)?;

    let mut user_active: user::ActiveModel = user_model.clone().into();

    if let Some(email) = request.email.as_deref() {
        let email = email.trim();
        if email != user_model.email {
            let taken = user::Entity::find()
                .filter(user::Column::Email.eq(email))
                .one(&state.db)
                .await
                .map_err(|e| compute_error_response(ComputeError::Database(e)))?;
            if taken.is_some() {
                warn!("Profile update rejected, email already taken: {}", email);
                return Err(compute_error_response(ComputeError::Conflict(
                    "Another user already has that email".to_string(),
                )));
            }
            user_active.email = Set(email.to_string());
        }
    }

    if let Some(username) = request.username.as_deref() {
        user_active.username = Set(Some(username.trim().to_string()));
    }

    if let Some(password) = request.password {
        if !password.is_empty() {
            user_active.password = Set(password);
        }
    }

    let updated = user_active
        .update(&state.db)
        .await
        .map_err(|e| compute_error_response(ComputeError::Database(e)))?;

    info!("Profile updated for user {}", user_id);
    let username = updated
        .username
        .clone()
        .unwrap_or_else(|| updated.email.clone());
    let response = ApiResponse {
        data: ProfileResponse {
            id: updated.id,
            email: updated.email,
            username,
            expense_goal: None,
            saving_goal: None,
            investment_goal: None,
        },
        message: "Profile updated successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
