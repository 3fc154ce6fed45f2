use crate::helpers::errors::compute_error_response;
use crate::helpers::lookup;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use common::HistoryResponse;
use compute::calendar;
use compute::history;
use compute::kinds::DataType;
use serde::Deserialize;
use tracing::{debug, instrument, trace};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for the history endpoint
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct HistoryQuery {
    /// Email of the user whose history to build
    pub email: String,
    /// Months back: 1, 6, 12, 36 or 60. Defaults to 12.
    pub period: Option<String>,
    /// One of income, expenses, savings, investments, expense_goals,
    /// saving_goals, investment_goals
    pub data_type: String,
}

/// Month-bucketed history for one transaction or goal kind.
///
/// Transaction kinds yield a simple series with sum and average; goal kinds
/// yield goal-vs-actual entries with the met percentage. Parameters are
/// validated before any query runs.
#[utoipa::path(
    get,
    path = "/history/",
    tag = "history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "History retrieved successfully", body = ApiResponse<HistoryResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Invalid period or data_type", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<HistoryResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_history function");

    // Reject bad parameters before touching the database.
    let data_type: DataType = query
        .data_type
        .parse()
        .map_err(compute_error_response)?;
    let months = history::parse_period(query.period.as_deref().unwrap_or("12"))
        .map_err(compute_error_response)?;

    let user = lookup::user_by_email(&state.db, &query.email)
        .await
        .map_err(compute_error_response)?;

    let today = chrono::Utc::now().date_naive();
    let start = calendar::window_start(today, months);
    debug!(
        "Building {}-month history of {:?} for user {} from {}",
        months, data_type, user.id, start
    );

    let data = match data_type {
        DataType::Transactions(kind) => HistoryResponse::Simple(
            history::simple_history(&state.db, kind, user.id, start)
                .await
                .map_err(compute_error_response)?,
        ),
        DataType::Goals(kind) => HistoryResponse::Goal(
            history::goal_history(&state.db, kind, user.id, start)
                .await
                .map_err(compute_error_response)?,
        ),
    };

    let response = ApiResponse {
        data,
        message: "History retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
