use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use common::{GoalHistoryEntry, GoalHistoryResponse, SimpleHistoryResponse};
use rust_decimal::Decimal;
use sea_orm::ConnectionTrait;

use crate::aggregate;
use crate::error::{ComputeError, Result};
use crate::goals;
use crate::kinds::{GoalKind, TransactionKind};

/// Window lengths the history endpoint accepts, in months.
const ALLOWED_PERIODS: [u32; 5] = [1, 6, 12, 36, 60];

/// Parse and validate the `period` query parameter.
pub fn parse_period(raw: &str) -> Result<u32> {
    let months: u32 = raw
        .parse()
        .map_err(|_| ComputeError::Validation(format!("Invalid period: {raw}")))?;
    if ALLOWED_PERIODS.contains(&months) {
        Ok(months)
    } else {
        Err(ComputeError::Validation(format!(
            "Invalid period: {months}. Allowed values are 1, 6, 12, 36 and 60."
        )))
    }
}

/// Month-bucketed totals of one transaction kind from `start` onward, with
/// the window's sum and per-entry average.
pub async fn simple_history<C: ConnectionTrait>(
    db: &C,
    kind: TransactionKind,
    user_id: i32,
    start: NaiveDate,
) -> Result<SimpleHistoryResponse> {
    let entries = aggregate::monthly_totals(db, kind, user_id, start).await?;
    let total_sum: Decimal = entries.iter().map(|e| e.total).sum();
    let average = if entries.is_empty() {
        Decimal::ZERO
    } else {
        (total_sum / Decimal::from(entries.len() as u64)).round_dp(2)
    };
    Ok(SimpleHistoryResponse {
        entries,
        total_sum,
        average,
    })
}

/// Goal-vs-actual series of one goal kind from `start` onward. The series is
/// driven by the months that have a goal row; months with a goal but no
/// matching ledger rows report an actual of zero. Each stored value is
/// converted to currency against that month's income before comparison.
pub async fn goal_history<C: ConnectionTrait>(
    db: &C,
    kind: GoalKind,
    user_id: i32,
    start: NaiveDate,
) -> Result<GoalHistoryResponse> {
    let goal_rows = goals::goals_since(db, kind, user_id, start).await?;

    let actual_by_month = totals_by_month(db, kind.actual_kind(), user_id, start).await?;
    let income_by_month = totals_by_month(db, TransactionKind::Income, user_id, start).await?;

    let mut entries = Vec::with_capacity(goal_rows.len());
    for row in goal_rows {
        let key = (row.date.year(), row.date.month());
        let income = income_by_month.get(&key).copied().unwrap_or(Decimal::ZERO);
        let goal_value = goals::effective_goal_value(row.value, income);
        let actual_value = actual_by_month.get(&key).copied().unwrap_or(Decimal::ZERO);
        entries.push(GoalHistoryEntry {
            year: key.0,
            month: key.1,
            goal_value,
            actual_value,
            met: goals::goal_met(actual_value, goal_value),
        });
    }

    let raw_sum: Decimal = entries.iter().map(|e| e.goal_value).sum();
    let total_goal_value = raw_sum.round_dp(2);
    let average_goal_value = if entries.is_empty() {
        Decimal::ZERO
    } else {
        (raw_sum / Decimal::from(entries.len() as u64)).round_dp(2)
    };
    let met_count = entries.iter().filter(|e| e.met).count();
    let goal_met_percentage = if entries.is_empty() {
        Decimal::ZERO
    } else {
        (Decimal::from(met_count as u64 * 100) / Decimal::from(entries.len() as u64)).round_dp(1)
    };

    Ok(GoalHistoryResponse {
        entries,
        total_goal_value,
        average_goal_value,
        goal_met_percentage,
    })
}

async fn totals_by_month<C: ConnectionTrait>(
    db: &C,
    kind: TransactionKind,
    user_id: i32,
    start: NaiveDate,
) -> Result<BTreeMap<(i32, u32), Decimal>> {
    let entries = aggregate::monthly_totals(db, kind, user_id, start).await?;
    Ok(entries
        .into_iter()
        .map(|e| ((e.year, e.month), e.total))
        .collect())
}
