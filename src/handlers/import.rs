use crate::helpers::errors::compute_error_response;
use crate::helpers::lookup;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use compute::error::ComputeError;
use compute::kinds::DataType;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

/// Multipart form accepted by the CSV import endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ImportForm {
    /// Email of the importing user
    pub email: String,
    /// One of income, expenses, savings, investments, expense_goals,
    /// saving_goals, investment_goals
    pub data_type: String,
    /// CSV file with a header row
    #[schema(value_type = String, format = Binary)]
    pub file: String,
}

/// Import summary returned on success
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImportResponse {
    pub message: String,
    pub rows_imported: usize,
}

/// Import a CSV batch for one user.
///
/// The batch is all-or-nothing: a failure in any row rolls back everything
/// and the error names the 1-based row (the header is row 1).
#[utoipa::path(
    post,
    path = "/import/csv",
    tag = "import",
    request_body(content = ImportForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Batch imported successfully", body = ApiResponse<ImportResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Row-level format error, batch rolled back", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, multipart))]
pub async fn import_csv_data(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<ImportResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering import_csv_data function");

    let mut email: Option<String> = None;
    let mut data_type: Option<String> = None;
    let mut file: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        compute_error_response(ComputeError::Validation(format!(
            "Malformed multipart body: {e}"
        )))
    })? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("email") => {
                email = Some(field.text().await.map_err(|e| {
                    compute_error_response(ComputeError::Validation(format!(
                        "Unreadable email field: {e}"
                    )))
                })?);
            }
            Some("data_type") => {
                data_type = Some(field.text().await.map_err(|e| {
                    compute_error_response(ComputeError::Validation(format!(
                        "Unreadable data_type field: {e}"
                    )))
                })?);
            }
            Some("file") => {
                file = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| {
                            compute_error_response(ComputeError::Validation(format!(
                                "Unreadable file field: {e}"
                            )))
                        })?
                        .to_vec(),
                );
            }
            _ => {}
        }
    }

    let email = email.ok_or_else(|| {
        compute_error_response(ComputeError::Validation("Missing email field".to_string()))
    })?;
    let raw_data_type = data_type.ok_or_else(|| {
        compute_error_response(ComputeError::Validation(
            "Missing data_type field".to_string(),
        ))
    })?;
    let file = file.ok_or_else(|| {
        compute_error_response(ComputeError::Validation("Missing file field".to_string()))
    })?;

    let data_type: DataType = raw_data_type.parse().map_err(compute_error_response)?;

    let user = lookup::user_by_email(&state.db, &email)
        .await
        .map_err(compute_error_response)?;

    debug!(
        "Importing {} bytes of {} for user {}",
        file.len(),
        data_type.label(),
        user.id
    );
    let rows_imported = compute::import::import_csv(&state.db, user.id, data_type, &file)
        .await
        .map_err(compute_error_response)?;

    info!(
        "Imported {} rows of {} for user {}",
        rows_imported,
        data_type.label(),
        user.id
    );
    let response = ApiResponse {
        data: ImportResponse {
            message: format!("{} imported successfully", data_type.label()),
            rows_imported,
        },
        message: "Import completed successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}
