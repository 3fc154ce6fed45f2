use common::{
    CategoryTotal, DashboardResponse, GoalHistoryEntry, GoalHistoryResponse, HistoryResponse,
    RecordEntry, SimpleHistoryEntry, SimpleHistoryResponse,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::handlers::auth::LoginRequest;
use crate::handlers::dashboard::DashboardRequest;
use crate::handlers::expenses::{CreateExpenseRequest, ExpenseResponse, UpdateExpenseRequest};
use crate::handlers::goals::{GoalRequest, GoalResponse};
use crate::handlers::history::HistoryQuery;
use crate::handlers::import::{ImportForm, ImportResponse};
use crate::handlers::income::{CreateIncomeRequest, IncomeResponse};
use crate::handlers::investments::{
    CreateInvestmentRequest, InvestmentResponse, UpdateInvestmentRequest,
};
use crate::handlers::profile::{GoalInfo, ProfileResponse, UpdateProfileRequest};
use crate::handlers::savings::{CreateSavingRequest, SavingResponse, UpdateSavingRequest};
use crate::handlers::users::{RegisterUserRequest, UserResponse};

/// Application state shared across handlers. One database handle, injected
/// per request; there is no process-global session and no cache.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::register_user,
        crate::handlers::users::get_user,
        crate::handlers::auth::login,
        crate::handlers::profile::get_profile,
        crate::handlers::profile::update_profile,
        crate::handlers::income::create_income,
        crate::handlers::expenses::create_expense,
        crate::handlers::expenses::update_expense,
        crate::handlers::expenses::delete_expense,
        crate::handlers::savings::create_saving,
        crate::handlers::savings::update_saving,
        crate::handlers::savings::delete_saving,
        crate::handlers::investments::create_investment,
        crate::handlers::investments::update_investment,
        crate::handlers::investments::delete_investment,
        crate::handlers::goals::upsert_expense_goal,
        crate::handlers::goals::upsert_saving_goal,
        crate::handlers::goals::upsert_investment_goal,
        crate::handlers::goals::create_expense_goal,
        crate::handlers::goals::create_saving_goal,
        crate::handlers::goals::create_investment_goal,
        crate::handlers::dashboard::get_dashboard,
        crate::handlers::history::get_history,
        crate::handlers::import::import_csv_data,
    ),
    components(
        schemas(
            ApiResponse<UserResponse>,
            ApiResponse<ProfileResponse>,
            ApiResponse<IncomeResponse>,
            ApiResponse<ExpenseResponse>,
            ApiResponse<SavingResponse>,
            ApiResponse<InvestmentResponse>,
            ApiResponse<GoalResponse>,
            ApiResponse<DashboardResponse>,
            ApiResponse<HistoryResponse>,
            ApiResponse<ImportResponse>,
            ErrorResponse,
            HealthResponse,
            RegisterUserRequest,
            UserResponse,
            LoginRequest,
            ProfileResponse,
            UpdateProfileRequest,
            GoalInfo,
            CreateIncomeRequest,
            IncomeResponse,
            CreateExpenseRequest,
            UpdateExpenseRequest,
            ExpenseResponse,
            CreateSavingRequest,
            UpdateSavingRequest,
            SavingResponse,
            CreateInvestmentRequest,
            UpdateInvestmentRequest,
            InvestmentResponse,
            GoalRequest,
            GoalResponse,
            DashboardRequest,
            DashboardResponse,
            RecordEntry,
            CategoryTotal,
            HistoryQuery,
            HistoryResponse,
            SimpleHistoryEntry,
            SimpleHistoryResponse,
            GoalHistoryEntry,
            GoalHistoryResponse,
            ImportForm,
            ImportResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User registration and lookup"),
        (name = "auth", description = "Login stub"),
        (name = "profile", description = "Profile and current goals"),
        (name = "income", description = "Monthly income entries"),
        (name = "expenses", description = "Expense rows"),
        (name = "savings", description = "Saving rows"),
        (name = "investments", description = "Investment rows"),
        (name = "goals", description = "Monthly goals per kind"),
        (name = "dashboard", description = "Current-month snapshot"),
        (name = "history", description = "Month-bucketed history"),
        (name = "import", description = "CSV import"),
    ),
    info(
        title = "Centavo API",
        description = "Personal finance tracker - monthly ledger, goals, dashboard and history",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
