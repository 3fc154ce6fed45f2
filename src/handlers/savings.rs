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
use model::entities::saving::{self, SavingCategory};
use rust_decimal::Decimal;
use sea_orm::{ActiveEnum, ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a new saving
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateSavingRequest {
    pub user_id: i32,
    /// Saving date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Amount, non-negative
    pub amount: Decimal,
    /// One of the closed saving categories
    #[schema(value_type = String)]
    pub category: SavingCategory,
}

/// Request body for updating a saving
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateSavingRequest {
    pub date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub category: Option<SavingCategory>,
}

/// Saving response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SavingResponse {
    pub id: i32,
    pub user_id: i32,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
}

impl From<saving::Model> for SavingResponse {
    fn from(model: saving::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            date: model.date,
            amount: model.amount,
            category: model.category.to_value(),
        }
    }
}

/// Create a new saving
#[utoipa::path(
    post,
    path = "/saving",
    tag = "savings",
    request_body = CreateSavingRequest,
    responses(
        (status = 201, description = "Saving created successfully", body = ApiResponse<SavingResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Invalid amount or category", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn create_saving(
    State(state): State<AppState>,
    Json(request): Json<CreateSavingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SavingResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_saving function");
    debug!(
        "Creating saving for user {} on {}: {}",
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

    let new_saving = saving::ActiveModel {
        date: Set(request.date),
        user_id: Set(request.user_id),
        amount: Set(request.amount),
        category: Set(request.category),
        ..Default::default()
    };

    match new_saving.insert(&state.db).await {
        Ok(saving_model) => {
            info!(
                "Saving created successfully with ID: {}, amount: {}",
                saving_model.id, saving_model.amount
            );
            let response = ApiResponse {
                data: SavingResponse::from(saving_model),
                message: "Saving created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create saving: {}", db_error);
            Err(compute_error_response(ComputeError::Database(db_error)))
        }
    }
}

/// Update a saving
#[utoipa::path(
    put,
    path = "/saving/{saving_id}",
    tag = "savings",
    params(
        ("saving_id" = i32, Path, description = "Saving ID"),
    ),
    request_body = UpdateSavingRequest,
    responses(
        (status = 200, description = "Saving updated successfully", body = ApiResponse<SavingResponse>),
        (status = 404, description = "Saving not found", body = ErrorResponse),
        (status = 422, description = "Invalid amount", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(request))]
pub async fn update_saving(
    Path(saving_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateSavingRequest>,
) -> Result<Json<ApiResponse<SavingResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_saving function for id: {}", saving_id);

    if let Some(amount) = request.amount {
        if amount < Decimal::ZERO {
            return Err(compute_error_response(ComputeError::Validation(
                "Amount cannot be negative".to_string(),
            )));
        }
    }

    let existing = saving::Entity::find_by_id(saving_id)
        .one(&state.db)
        .await
        .map_err(|e| compute_error_response(ComputeError::Database(e)))?;
    let Some(existing) = existing else {
        warn!("Saving with ID {} not found for update", saving_id);
        return Err(compute_error_response(ComputeError::NotFound(format!(
            "Saving with id {saving_id} not found"
        ))));
    };

    let mut saving_active: saving::ActiveModel = existing.into();
    if let Some(date) = request.date {
        saving_active.date = Set(date);
    }
    if let Some(amount) = request.amount {
        saving_active.amount = Set(amount);
    }
    if let Some(category) = request.category {
        saving_active.category = Set(category);
    }

    match saving_active.update(&state.db).await {
        Ok(updated) => {
            info!("Saving with ID {} updated successfully", saving_id);
            let response = ApiResponse {
                data: SavingResponse::from(updated),
                message: "Saving updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update saving with ID {}: {}", saving_id, db_error);
            Err(compute_error_response(ComputeError::Database(db_error)))
        }
    }
}

/// Delete a saving
#[utoipa::path(
    delete,
    path = "/saving/{saving_id}",
    tag = "savings",
    params(
        ("saving_id" = i32, Path, description = "Saving ID"),
    ),
    responses(
        (status = 204, description = "Saving deleted successfully"),
        (status = 404, description = "Saving not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_saving(
    Path(saving_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_saving function for id: {}", saving_id);

    match saving::Entity::delete_by_id(saving_id).exec(&state.db).await {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Saving with ID {} deleted successfully", saving_id);
                Ok(StatusCode::NO_CONTENT)
            } else {
                warn!("Saving with ID {} not found for deletion", saving_id);
                Err(compute_error_response(ComputeError::NotFound(format!(
                    "Saving with id {saving_id} not found"
                ))))
            }
        }
        Err(db_error) => {
            error!("Failed to delete saving with ID {}: {}", saving_id, db_error);
            Err(compute_error_response(ComputeError::Database(db_error)))
        }
    }
}
