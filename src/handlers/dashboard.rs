use crate::helpers::errors::compute_error_response;
use crate::helpers::lookup;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use common::DashboardResponse;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};
use utoipa::ToSchema;

/// Request body identifying whose dashboard to assemble
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DashboardRequest {
    pub email: String,
}

/// Current-month dashboard: totals per kind, stored goal percents, raw
/// listings and per-category breakdowns.
#[utoipa::path(
    get,
    path = "/dashboard/",
    tag = "dashboard",
    request_body = DashboardRequest,
    responses(
        (status = 200, description = "Dashboard retrieved successfully", body = ApiResponse<DashboardResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Json(request): Json<DashboardRequest>,
) -> Result<Json<ApiResponse<DashboardResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_dashboard function");

    let user = lookup::user_by_email(&state.db, &request.email)
        .await
        .map_err(compute_error_response)?;

    let today = chrono::Utc::now().date_naive();
    debug!("Assembling dashboard for user {} on {}", user.id, today);

    let snapshot = compute::dashboard::compose(&state.db, user.id, today)
        .await
        .map_err(compute_error_response)?;

    let response = ApiResponse {
        data: snapshot,
        message: "Dashboard retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
