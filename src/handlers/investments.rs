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
use model::entities::investment::{self, InvestmentCategory};
use rust_decimal::Decimal;
use sea_orm::{ActiveEnum, ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a new investment
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateInvestmentRequest {
    pub user_id: i32,
    /// Investment date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Amount, non-negative
    pub amount: Decimal,
    /// One of the closed investment categories
    #[schema(value_type = String)]
    pub category: InvestmentCategory,
}

/// Request body for updating an investment
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateInvestmentRequest {
    pub date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub category: Option<InvestmentCategory>,
}

/// Investment response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InvestmentResponse {
    pub id: i32,
    pub user_id: i32,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
}

impl From<investment::Model> for InvestmentResponse {
    fn from(model: investment::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            date: model.date,
            amount: model.amount,
            category: model.category.to_value(),
        }
    }
}

/// Create a new investment
#[utoipa::path(
    post,
    path = "/investment",
    tag = "investments",
    request_body = CreateInvestmentRequest,
    responses(
        (status = 201, description = "Investment created successfully", body = ApiResponse<InvestmentResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Invalid amount or category", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn create_investment(
    State(state): State<AppState>,
    Json(request): Json<CreateInvestmentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<InvestmentResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    trace!("Entering create_investment function");
    debug!(
        "Creating investment for user {} on {}: {}",
        request.user_id, request.date, request.amount
    );

    if request.amount < Decimal::ZERO {
        return Err(compute_error_response(ComputeError::Validation(
            "Amount cannot be negative".to_string(),
        )));
    }

    lookup::user_by_id(&state.db, request.user_id)
        .await
        .map_err(compute_error_response)?;

    let new_investment = investment::ActiveModel {
        date: Set(request.date),
        user_id: Set(request.user_id),
        amount: Set(request.amount),
        category: Set(request.category),
        ..Default::default()
    };

    match new_investment.insert(&state.db).await {
        Ok(investment_model) => {
            info!(
                "Investment created successfully with ID: {}, amount: {}",
                investment_model.id, investment_model.amount
            );
            let response = ApiResponse {
                data: InvestmentResponse::from(investment_model),
                message: "Investment created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create investment: {}", db_error);
            Err(compute_error_response(ComputeError::Database(db_error)))
        }
    }
}

/// Update an investment
#[utoipa::path(
    put,
    path = "/investment/{investment_id}",
    tag = "investments",
    params(
        ("investment_id" = i32, Path, description = "Investment ID"),
    ),
    request_body = UpdateInvestmentRequest,
    responses(
        (status = 200, description = "Investment updated successfully", body = ApiResponse<InvestmentResponse>),
        (status = 404, description = "Investment not found", body = ErrorResponse),
        (status = 422, description = "Invalid amount", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn update_investment(
    Path(investment_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateInvestmentRequest>,
) -> Result<Json<ApiResponse<InvestmentResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_investment function for id: {}", investment_id);

    if let Some(amount) = request.amount {
        if amount < Decimal::ZERO {
            return Err(compute_error_response(ComputeError::Validation(
                "Amount cannot be negative".to_string(),
            )));
        }
    }

    let existing = investment::Entity::find_by_id(investment_id)
        .one(&state.db)
        .await
        .map_err(|e| compute_error_response(ComputeError::Database(e)))?;
    let Some(existing) = existing else {
        warn!("Investment with ID {} not found for update", investment_id);
        return Err(compute_error_response(ComputeError::NotFound(format!(
            "Investment with id {investment_id} not found"
        ))));
    };

    let mut investment_active: investment::ActiveModel = existing.into();
    if let Some(date) = request.date {
        investment_active.date = Set(date);
    }
    if let Some(amount) = request.amount {
        investment_active.amount = Set(amount);
    }
    if let Some(category) = request.category {
        investment_active.category = Set(category);
    }

    match investment_active.update(&state.db).await {
        Ok(updated) => {
            info!("Investment with ID {} updated successfully", investment_id);
            let response = ApiResponse {
                data: InvestmentResponse::from(updated),
                message: "Investment updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to update investment with ID {}: {}",
                investment_id, db_error
            );
            Err(compute_error_response(ComputeError::Database(db_error)))
        }
    }
}

/// Delete an investment
#[utoipa::path(
    delete,
    path = "/investment/{investment_id}",
    tag = "investments",
    params(
        ("investment_id" = i32, Path, description = "Investment ID"),
    ),
    responses(
        (status = 204, description = "Investment deleted successfully"),
        (status = 404, description = "Investment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_investment(
    Path(investment_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_investment function for id: {}", investment_id);

    match investment::Entity::delete_by_id(investment_id)
        .exec(&state.db)
        .await
    {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Investment with ID {} deleted successfully", investment_id);
                Ok(StatusCode::NO_CONTENT)
            } else {
                warn!("Investment with ID {} not found for deletion", investment_id);
                Err(compute_error_response(ComputeError::NotFound(format!(
                    "Investment with id {investment_id} not found"
                ))))
            }
        }
        Err(db_error) => {
            error!(
                "Failed to delete investment with ID {}: {}",
                investment_id, db_error
            );
            Err(compute_error_response(ComputeError::Database(db_error)))
        }
    }
}
