//! Common transport-layer types shared between the API handlers and the
//! compute core. These structs mirror the JSON payloads the endpoints emit so
//! integration tests and clients can deserialize responses without
//! duplicating shapes.

mod dashboard;
mod history;

pub use dashboard::{CategoryTotal, DashboardResponse, RecordEntry};
pub use history::{
    GoalHistoryEntry, GoalHistoryResponse, HistoryResponse, SimpleHistoryEntry,
    SimpleHistoryResponse,
};
