use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sum of one transaction kind over one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SimpleHistoryEntry {
    pub year: i32,
    pub month: u32,
    pub total: Decimal,
}

/// Month-bucketed series for a transaction kind. Months without activity are
/// omitted; `average` divides by the number of emitted entries.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SimpleHistoryResponse {
    pub entries: Vec<SimpleHistoryEntry>,
    pub total_sum: Decimal,
    pub average: Decimal,
}

/// One month of a goal series: the income-derived target, the summed actual,
/// and whether the actual reached the target.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GoalHistoryEntry {
    pub year: i32,
    pub month: u32,
    pub goal_value: Decimal,
    pub actual_value: Decimal,
    pub met: bool,
}

/// Month-bucketed series for a goal kind, driven by the months that have a
/// goal row in the window.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GoalHistoryResponse {
    pub entries: Vec<GoalHistoryEntry>,
    pub total_goal_value: Decimal,
    pub average_goal_value: Decimal,
    pub goal_met_percentage: Decimal,
}

/// Either shape `GET /history/` can return, depending on `data_type`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum HistoryResponse {
    Simple(SimpleHistoryResponse),
    Goal(GoalHistoryResponse),
}
