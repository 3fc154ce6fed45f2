use crate::handlers::{
    auth::login,
    dashboard::get_dashboard,
    expenses::{create_expense, delete_expense, update_expense},
    goals::{
        create_expense_goal, create_investment_goal, create_saving_goal, upsert_expense_goal,
        upsert_investment_goal, upsert_saving_goal,
    },
    health::health_check,
    history::get_history,
    import::import_csv_data,
    income::create_income,
    investments::{create_investment, delete_investment, update_investment},
    profile::{get_profile, update_profile},
    savings::{create_saving, delete_saving, update_saving},
    users::{get_user, register_user},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Users and auth
        .route("/users/register", post(register_user))
        .route("/users/:user_id", get(get_user))
        .route("/auth/login", post(login))
        .route("/profile/:user_id", get(get_profile))
        .route("/profile/:user_id", put(update_profile))
        // Ledger rows
        .route("/income/", post(create_income))
        .route("/expense", post(create_expense))
        .route("/expense/:expense_id", put(update_expense))
        .route("/expense/:expense_id", delete(delete_expense))
        .route("/saving", post(create_saving))
        .route("/saving/:saving_id", put(update_saving))
        .route("/saving/:saving_id", delete(delete_saving))
        .route("/investment", post(create_investment))
        .route("/investment/:investment_id", put(update_investment))
        .route("/investment/:investment_id", delete(delete_investment))
        // Goals: upsert is canonical, /create keeps the reject-on-duplicate path
        .route("/goals/expense", post(upsert_expense_goal))
        .route("/goals/saving", post(upsert_saving_goal))
        .route("/goals/investment", post(upsert_investment_goal))
        .route("/goals/expense/create", post(create_expense_goal))
        .route("/goals/saving/create", post(create_saving_goal))
        .route("/goals/investment/create", post(create_investment_goal))
        // Aggregated surfaces
        .route("/dashboard/", get(get_dashboard))
        .route("/history/", get(get_history))
        .route("/import/csv", post(import_csv_data))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
