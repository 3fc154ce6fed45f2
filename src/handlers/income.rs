use crate::helpers::errors::compute_error_response;
use crate::helpers::lookup;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use chrono::NaiveDate;
use compute::error::ComputeError;
use compute::ledger;
use model::entities::income;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

/// Request body for recording a month's income
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateIncomeRequest {
    pub user_id: i32,
    /// Income date as a YYYY-MM-DD string
    pub date: String,
    /// Amount, non-negative
    pub amount: Decimal,
}

/// Income response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IncomeResponse {
    pub user_id: i32,
    pub date: NaiveDate,
    pub amount: Decimal,
}

impl From<income::Model> for IncomeResponse {
    fn from(model: income::Model) -> Self {
        Self {
            user_id: model.user_id,
            date: model.date,
            amount: model.amount,
        }
    }
}

/// Record income for a date, overwriting any row already on that date.
#[utoipa::path(
    post,
    path = "/income/",
    tag = "income",
    request_body = CreateIncomeRequest,
    responses(
        (status = 200, description = "Income recorded successfully", body = ApiResponse<IncomeResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Invalid amount or date", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn create_income(
    State(state): State<AppState>,
    Json(request): Json<CreateIncomeRequest>,
) -> Result<Json<ApiResponse<IncomeResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_income function");
    debug!(
        "Recording income for user {} on {}: {}",
        request.user_id, request.date, request.amount
    );

    if request.amount < Decimal::ZERO {
        return Err(compute_error_response(ComputeError::Validation(
            "Amount cannot be negative".to_string(),
        )));
    }

    let date = NaiveDate::parse_from_str(&request.date, "%Y-%m-%d").map_err(|_| {
        compute_error_response(ComputeError::Validation(
            "Date must be in YYYY-MM-DD format".to_string(),
        ))
    })?;

    lookup::user_by_id(&state.db, request.user_id)
        .await
        .map_err(compute_error_response)?;

    let income_model = ledger::upsert_income(&state.db, request.user_id, date, request.amount)
        .await
        .map_err(compute_error_response)?;

    info!(
        "Income recorded for user {} on {}",
        income_model.user_id, income_model.date
    );
    let response = ApiResponse {
        data: IncomeResponse::from(income_model),
        message: "Income recorded successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
