use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One raw ledger row as listed on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RecordEntry {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
}

/// Per-category sum for one month. Categories without activity are absent,
/// never zero-filled.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Current-month snapshot returned by `GET /dashboard/`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub income_total: Decimal,
    pub expense_total: Decimal,
    pub saving_total: Decimal,
    pub investment_total: Decimal,
    /// Raw stored goal values for the month. These are display percentages;
    /// no income conversion is applied on this surface.
    pub expense_goal_percent: Decimal,
    pub saving_goal_percent: Decimal,
    pub investment_goal_percent: Decimal,
    pub expenses: Vec<RecordEntry>,
    pub savings: Vec<RecordEntry>,
    pub investments: Vec<RecordEntry>,
    pub category_expenses: Vec<CategoryTotal>,
    pub category_savings: Vec<CategoryTotal>,
    pub category_investments: Vec<CategoryTotal>,
}
