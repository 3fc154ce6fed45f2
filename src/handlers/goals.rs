use crate::helpers::errors::compute_error_response;
use crate::helpers::lookup;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use chrono::NaiveDate;
use compute::error::ComputeError;
use compute::goals::{self, GoalRow};
use compute::kinds::GoalKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, trace};
use utoipa::ToSchema;

/// Request body shared by all goal endpoints
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct GoalRequest {
    pub user_id: i32,
    /// Any date inside the target month (YYYY-MM-DD); stored normalized to
    /// the first of that month
    pub date: NaiveDate,
    /// Goal value, a percentage of the month's income
    pub value: Decimal,
}

/// Goal response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GoalResponse {
    pub user_id: i32,
    pub date: NaiveDate,
    pub value: Decimal,
}

impl From<GoalRow> for GoalResponse {
    fn from(row: GoalRow) -> Self {
        Self {
            user_id: row.user_id,
            date: row.date,
            value: row.value,
        }
    }
}

async fn upsert(
    state: &AppState,
    kind: GoalKind,
    request: GoalRequest,
) -> Result<GoalResponse, ComputeError> {
    lookup::user_by_id(&state.db, request.user_id).await?;
    let row = goals::upsert_goal(
        &state.db,
        kind,
        request.user_id,
        request.date,
        request.value,
    )
    .await?;
    info!(
        "{} goal saved for user {} in {}",
        kind,
        row.user_id,
        row.date.format("%Y-%m")
    );
    Ok(row.into())
}

async fn create(
    state: &AppState,
    kind: GoalKind,
    request: GoalRequest,
) -> Result<GoalResponse, ComputeError> {
    lookup::user_by_id(&state.db, request.user_id).await?;
    let row = goals::insert_goal(
        &state.db,
        kind,
        request.user_id,
        request.date,
        request.value,
    )
    .await?;
    Ok(row.into())
}

/// Set the expense goal for a month, overwriting any existing one.
#[utoipa::path(
    post,
    path = "/goals/expense",
    tag = "goals",
    request_body = GoalRequest,
    responses(
        (status = 200, description = "Expense goal saved", body = ApiResponse<GoalResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn upsert_expense_goal(
    State(state): State<AppState>,
    Json(request): Json<GoalRequest>,
) -> Result<Json<ApiResponse<GoalResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering upsert_expense_goal function");
    match upsert(&state, GoalKind::Expense, request).await {
        Ok(goal) => Ok(Json(ApiResponse {
            data: goal,
            message: "Expense goal saved successfully".to_string(),
            success: true,
        })),
        Err(err) => Err(compute_error_response(err)),
    }
}

/// Set the saving goal for a month, overwriting any existing one.
#[utoipa::path(
    post,
    path = "/goals/saving",
    tag = "goals",
    request_body = GoalRequest,
    responses(
        (status = 200, description = "Saving goal saved", body = ApiResponse<GoalResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn upsert_saving_goal(
    State(state): State<AppState>,
    Json(request): Json<GoalRequest>,
) -> Result<Json<ApiResponse<GoalResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering upsert_saving_goal function");
    match upsert(&state, GoalKind::Saving, request).await {
        Ok(goal) => Ok(Json(ApiResponse {
            data: goal,
            message: "Saving goal saved successfully".to_string(),
            success: true,
        })),
        Err(err) => Err(compute_error_response(err)),
    }
}

/// Set the investment goal for a month, overwriting any existing one.
#[utoipa::path(
    post,
    path = "/goals/investment",
    tag = "goals",
    request_body = GoalRequest,
    responses(
        (status = 200, description = "Investment goal saved", body = ApiResponse<GoalResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn upsert_investment_goal(
    State(state): State<AppState>,
    Json(request): Json<GoalRequest>,
) -> Result<Json<ApiResponse<GoalResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering upsert_investment_goal function");
    match upsert(&state, GoalKind::Investment, request).await {
        Ok(goal) => Ok(Json(ApiResponse {
            data: goal,
            message: "Investment goal saved successfully".to_string(),
            success: true,
        })),
        Err(err) => Err(compute_error_response(err)),
    }
}

/// Create an expense goal, rejecting duplicates for the month.
///
/// Legacy behavior; prefer the upsert endpoint.
#[utoipa::path(
    post,
    path = "/goals/expense/create",
    tag = "goals",
    request_body = GoalRequest,
    responses(
        (status = 201, description = "Expense goal created", body = ApiResponse<GoalResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "A goal already exists for this month", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn create_expense_goal(
    State(state): State<AppState>,
    Json(request): Json<GoalRequest>,
) -> Result<(StatusCode, Json<ApiResponse<GoalResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_expense_goal function");
    match create(&state, GoalKind::Expense, request).await {
        Ok(goal) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse {
                data: goal,
                message: "Expense goal created successfully".to_string(),
                success: true,
            }),
        )),
        Err(err) => Err(compute_error_response(err)),
    }
}

/// Create a saving goal, rejecting duplicates for the month.
///
/// Legacy behavior; prefer the upsert endpoint.
#[utoipa::path(
    post,
    path = "/goals/saving/create",
    tag = "goals",
    request_body = GoalRequest,
    responses(
        (status = 201, description = "Saving goal created", body = ApiResponse<GoalResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "A goal already exists for this month", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn create_saving_goal(
    State(state): State<AppState>,
    Json(request): Json<GoalRequest>,
) -> Result<(StatusCode, Json<ApiResponse<GoalResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_saving_goal function");
    match create(&state, GoalKind::Saving, request).await {
        Ok(goal) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse {
                data: goal,
                message: "Saving goal created successfully".to_string(),
                success: true,
            }),
        )),
        Err(err) => Err(compute_error_response(err)),
    }
}

/// Create an investment goal, rejecting duplicates for the month.
///
/// Legacy behavior; prefer the upsert endpoint.
#[utoipa::path(
    post,
    path = "/goals/investment/create",
    tag = "goals",
    request_body = GoalRequest,
    responses(
        (status = 201, description = "Investment goal created", body = ApiResponse<GoalResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "A goal already exists for this month", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn create_investment_goal(
    State(state): State<AppState>,
    Json(request): Json<GoalRequest>,
) -> Result<(StatusCode, Json<ApiResponse<GoalResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_investment_goal function");
    match create(&state, GoalKind::Investment, request).await {
        Ok(goal) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse {
                data: goal,
                message: "Investment goal created successfully".to_string(),
                success: true,
            }),
        )),
        Err(err) => Err(compute_error_response(err)),
    }
}
