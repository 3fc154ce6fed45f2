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
use model::entities::expense::{self, ExpenseCategory};
use rust_decimal::Decimal;
use sea_orm::{ActiveEnum, ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a new expense
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateExpenseRequest {
    pub user_id: i32,
    /// Expense date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Amount, non-negative
    pub amount: Decimal,
    /// One of the closed expense categories
    #[schema(value_type = String)]
    pub category: ExpenseCategory,
}

/// Request body for updating an expense
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateExpenseRequest {
    pub date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub category: Option<ExpenseCategory>,
}

/// Expense response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseResponse {
    pub id: i32,
    pub user_id: i32,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
}

impl From<expense::Model> for ExpenseResponse {
    fn from(model: expense::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            date: model.date,
            amount: model.amount,
            category: model.category.to_value(),
        }
    }
}

/// Create a new expense
#[utoipa::path(
    post,
    path = "/expense",
    tag = "expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense created successfully", body = ApiResponse<ExpenseResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Invalid amount or category", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn create_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ExpenseResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_expense function");
    debug!(
        "Creating expense for user {} on {}: {}",
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

    let new_expense = expense::ActiveModel {
        date: Set(request.date),
        user_id: Set(request.user_id),
        amount: Set(request.amount),
        category: Set(request.category),
        ..Default::default()
    };

    match new_expense.insert(&state.db).await {
        Ok(expense_model) => {
            info!(
                "Expense created successfully with ID: {}, amount: {}",
                expense_model.id, expense_model.amount
            );
            let response = ApiResponse {
                data: ExpenseResponse::from(expense_model),
                message: "Expense created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create expense: {}", db_error);
            Err(compute_error_response(ComputeError::Database(db_error)))
        }
    }
}

/// Update an expense
#[utoipa::path(
    put,
    path = "/expense/{expense_id}",
    tag = "expenses",
    params(
        ("expense_id" = i32, Path, description = "Expense ID"),
    ),
    request_body = UpdateExpenseRequest,
    responses(
        (status = 200, description = "Expense updated successfully", body = ApiResponse<ExpenseResponse>),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 422, description = "Invalid amount", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn update_expense(
    Path(expense_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateExpenseRequest>,
) -> Result<Json<ApiResponse<ExpenseResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_expense function for id: {}", expense_id);

    if let Some(amount) = request.amount {
        if amount < Decimal::ZERO {
            return Err(compute_error_response(ComputeError::Validation(
                "Amount cannot be negative".to_string(),
            )));
        }
    }

    let existing = expense::Entity::find_by_id(expense_id)
        .one(&state.db)
        .await
        .map_err(|e| compute_error_response(ComputeError::Database(e)))?;
    let Some(existing) = existing else {
        warn!("Expense with ID {} not found for update", expense_id);
        return Err(compute_error_response(ComputeError::NotFound(format!(
            "Expense with id {expense_id} not found"
        ))));
    };

    let mut expense_active: expense::ActiveModel = existing.into();
    if let Some(date) = request.date {
        expense_active.date = Set(date);
    }
    if let Some(amount) = request.amount {
        expense_active.amount = Set(amount);
    }
    if let Some(category) = request.category {
        expense_active.category = Set(category);
    }

    match expense_active.update(&state.db).await {
        Ok(updated) => {
            info!("Expense with ID {} updated successfully", expense_id);
            let response = ApiResponse {
                data: ExpenseResponse::from(updated),
                message: "Expense updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update expense with ID {}: {}", expense_id, db_error);
            Err(compute_error_response(ComputeError::Database(db_error)))
        }
    }
}

/// Delete an expense
#[utoipa::path(
    delete,
    path = "/expense/{expense_id}",
    tag = "expenses",
    params(
        ("expense_id" = i32, Path, description = "Expense ID"),
    ),
    responses(
        (status = 204, description = "Expense deleted successfully"),
        (status = 404, description = "Expense not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_expense(
    Path(expense_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_expense function for id: {}", expense_id);

    match expense::Entity::delete_by_id(expense_id).exec(&state.db).await {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Expense with ID {} deleted successfully", expense_id);
                Ok(StatusCode::NO_CONTENT)
            } else {
                warn!("Expense with ID {} not found for deletion", expense_id);
                Err(compute_error_response(ComputeError::NotFound(format!(
                    "Expense with id {expense_id} not found"
                ))))
            }
        }
        Err(db_error) => {
            error!("Failed to delete expense with ID {}: {}", expense_id, db_error);
            Err(compute_error_response(ComputeError::Database(db_error)))
        }
    }
}
