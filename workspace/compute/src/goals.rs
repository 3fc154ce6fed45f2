use chrono::{Datelike, NaiveDate};
use model::entities::{expense_goal, investment_goal, saving_goal};
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::debug;

use crate::calendar::{month_bounds, month_floor};
use crate::error::{ComputeError, Result};
use crate::kinds::GoalKind;

/// A goal row independent of which of the three tables it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalRow {
    pub date: NaiveDate,
    pub user_id: i32,
    pub value: Decimal,
}

impl From<expense_goal::Model> for GoalRow {
    fn from(m: expense_goal::Model) -> Self {
        Self {
            date: m.date,
            user_id: m.user_id,
            value: m.value,
        }
    }
}

impl From<saving_goal::Model> for GoalRow {
    fn from(m: saving_goal::Model) -> Self {
        Self {
            date: m.date,
            user_id: m.user_id,
            value: m.value,
        }
    }
}

impl From<investment_goal::Model> for GoalRow {
    fn from(m: investment_goal::Model) -> Self {
        Self {
            date: m.date,
            user_id: m.user_id,
            value: m.value,
        }
    }
}

/// Convert a stored percentage into the month's absolute target:
/// `income * value / 100`, rounded to 2 decimal places.
pub fn effective_goal_value(stored: Decimal, income_total: Decimal) -> Decimal {
    (income_total * stored / Decimal::ONE_HUNDRED).round_dp(2)
}

/// A goal is met when the actual value reaches it; exactly meeting counts.
pub fn goal_met(actual: Decimal, goal: Decimal) -> bool {
    actual >= goal
}

/// The goal row for (user, year, month), if one exists.
pub async fn goal_for_month<C: ConnectionTrait>(
    db: &C,
    kind: GoalKind,
    user_id: i32,
    year: i32,
    month: u32,
) -> Result<Option<GoalRow>> {
    let (start, end) = month_bounds(year, month);
    let row = match kind {
        GoalKind::Expense => expense_goal::Entity::find()
            .filter(expense_goal::Column::UserId.eq(user_id))
            .filter(expense_goal::Column::Date.gte(start))
            .filter(expense_goal::Column::Date.lt(end))
            .one(db)
            .await?
            .map(GoalRow::from),
        GoalKind::Saving => saving_goal::Entity::find()
            .filter(saving_goal::Column::UserId.eq(user_id))
            .filter(saving_goal::Column::Date.gte(start))
            .filter(saving_goal::Column::Date.lt(end))
            .one(db)
            .await?
            .map(GoalRow::from),
        GoalKind::Investment => investment_goal::Entity::find()
            .filter(investment_goal::Column::UserId.eq(user_id))
            .filter(investment_goal::Column::Date.gte(start))
            .filter(investment_goal::Column::Date.lt(end))
            .one(db)
            .await?
            .map(GoalRow::from),
    };
    Ok(row)
}

/// Raw stored goal value for (user, year, month). The dashboard reads this
/// directly as a display percentage.
pub async fn stored_goal_value<C: ConnectionTrait>(
    db: &C,
    kind: GoalKind,
    user_id: i32,
    year: i32,
    month: u32,
) -> Result<Option<Decimal>> {
    Ok(goal_for_month(db, kind, user_id, year, month)
        .await?
        .map(|g| g.value))
}

/// All goal rows for one user dated on or after `start`, ascending by date.
/// At most one row per month by construction.
pub async fn goals_since<C: ConnectionTrait>(
    db: &C,
    kind: GoalKind,
    user_id: i32,
    start: NaiveDate,
) -> Result<Vec<GoalRow>> {
    let rows = match kind {
        GoalKind::Expense => expense_goal::Entity::find()
            .filter(expense_goal::Column::UserId.eq(user_id))
            .filter(expense_goal::Column::Date.gte(start))
            .order_by_asc(expense_goal::Column::Date)
            .all(db)
            .await?
            .into_iter()
            .map(GoalRow::from)
            .collect(),
        GoalKind::Saving => saving_goal::Entity::find()
            .filter(saving_goal::Column::UserId.eq(user_id))
            .filter(saving_goal::Column::Date.gte(start))
            .order_by_asc(saving_goal::Column::Date)
            .all(db)
            .await?
            .into_iter()
            .map(GoalRow::from)
            .collect(),
        GoalKind::Investment => investment_goal::Entity::find()
            .filter(investment_goal::Column::UserId.eq(user_id))
            .filter(investment_goal::Column::Date.gte(start))
            .order_by_asc(investment_goal::Column::Date)
            .all(db)
            .await?
            .into_iter()
            .map(GoalRow::from)
            .collect(),
    };
    Ok(rows)
}

/// Insert or overwrite the goal for `date`'s month. The date is normalized
/// to the first of the month, so the (date, user_id) primary key carries the
/// one-row-per-month rule and the write is a single `ON CONFLICT DO UPDATE`,
/// safe against a concurrent upsert for the same month.
///
/// This is the canonical goal-write path.
pub async fn upsert_goal<C: ConnectionTrait>(
    db: &C,
    kind: GoalKind,
    user_id: i32,
    date: NaiveDate,
    value: Decimal,
) -> Result<GoalRow> {
    let month_start = month_floor(date);
    match kind {
        GoalKind::Expense => {
            expense_goal::Entity::insert(expense_goal::ActiveModel {
                date: Set(month_start),
                user_id: Set(user_id),
                value: Set(value),
            })
            .on_conflict(
                OnConflict::columns([expense_goal::Column::Date, expense_goal::Column::UserId])
                    .update_column(expense_goal::Column::Value)
                    .to_owned(),
            )
            .exec(db)
            .await?;
        }
        GoalKind::Saving => {
            saving_goal::Entity::insert(saving_goal::ActiveModel {
                date: Set(month_start),
                user_id: Set(user_id),
                value: Set(value),
            })
            .on_conflict(
                OnConflict::columns([saving_goal::Column::Date, saving_goal::Column::UserId])
                    .update_column(saving_goal::Column::Value)
                    .to_owned(),
            )
            .exec(db)
            .await?;
        }
        GoalKind::Investment => {
            investment_goal::Entity::insert(investment_goal::ActiveModel {
                date: Set(month_start),
                user_id: Set(user_id),
                value: Set(value),
            })
            .on_conflict(
                OnConflict::columns([
                    investment_goal::Column::Date,
                    investment_goal::Column::UserId,
                ])
                .update_column(investment_goal::Column::Value)
                .to_owned(),
            )
            .exec(db)
            .await?;
        }
    }

    debug!(
        "Upserted {} goal of {} for user {} in {}",
        kind,
        value,
        user_id,
        month_start.format("%Y-%m")
    );
    Ok(GoalRow {
        date: month_start,
        user_id,
        value,
    })
}

/// Legacy create-only goal write: rejects with `Conflict` when a row already
/// exists for that (user, month). The upsert path above is the intended one.
pub async fn insert_goal<C: ConnectionTrait>(
    db: &C,
    kind: GoalKind,
    user_id: i32,
    date: NaiveDate,
    value: Decimal,
) -> Result<GoalRow> {
    let month_start = month_floor(date);
    if goal_for_month(db, kind, user_id, month_start.year(), month_start.month())
        .await?
        .is_some()
    {
        return Err(ComputeError::Conflict(format!(
            "A {} goal already exists for {} and this user",
            kind,
            month_start.format("%Y-%m")
        )));
    }
    upsert_goal(db, kind, user_id, date, value).await
}

/// The goal to show on a profile: this month's row if present, otherwise the
/// most recent one of any month, otherwise nothing.
pub async fn current_or_latest_goal<C: ConnectionTrait>(
    db: &C,
    kind: GoalKind,
    user_id: i32,
    today: NaiveDate,
) -> Result<Option<GoalRow>> {
    if let Some(current) = goal_for_month(db, kind, user_id, today.year(), today.month()).await? {
        return Ok(Some(current));
    }
    let latest = match kind {
        GoalKind::Expense => expense_goal::Entity::find()
            .filter(expense_goal::Column::UserId.eq(user_id))
            .order_by_desc(expense_goal::Column::Date)
            .one(db)
            .await?
            .map(GoalRow::from),
        GoalKind::Saving => saving_goal::Entity::find()
            .filter(saving_goal::Column::UserId.eq(user_id))
            .order_by_desc(saving_goal::Column::Date)
            .one(db)
            .await?
            .map(GoalRow::from),
        GoalKind::Investment => investment_goal::Entity::find()
            .filter(investment_goal::Column::UserId.eq(user_id))
            .order_by_desc(investment_goal::Column::Date)
            .one(db)
            .await?
            .map(GoalRow::from),
    };
    Ok(latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn effective_goal_value_is_percent_of_income() {
        assert_eq!(
            effective_goal_value(dec("60"), dec("1000.00")),
            dec("600.00")
        );
        assert_eq!(effective_goal_value(dec("33.33"), dec("100.00")), dec("33.33"));
        assert_eq!(effective_goal_value(dec("50"), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn effective_goal_value_rounds_to_cents() {
        // 1234.56 * 12.34% = 152.344704
        assert_eq!(
            effective_goal_value(dec("12.34"), dec("1234.56")),
            dec("152.34")
        );
    }

    #[test]
    fn exactly_meeting_a_goal_counts_as_met() {
        assert!(goal_met(dec("150.00"), dec("150.00")));
        assert!(goal_met(dec("150.01"), dec("150.00")));
        assert!(!goal_met(dec("149.99"), dec("150.00")));
    }

    #[tokio::test]
    async fn upsert_is_idempotent_per_month() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "goals@example.com").await;

        upsert_goal(&db, GoalKind::Expense, user.id, ymd(2024, 5, 7), dec("40"))
            .await
            .unwrap();
        // A different day of the same month must overwrite, not add.
        let row = upsert_goal(&db, GoalKind::Expense, user.id, ymd(2024, 5, 23), dec("55"))
            .await
            .unwrap();
        assert_eq!(row.date, ymd(2024, 5, 1));
        assert_eq!(row.value, dec("55"));

        let rows = goals_since(&db, GoalKind::Expense, user.id, ymd(2024, 1, 1))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, dec("55"));
    }

    #[tokio::test]
    async fn goal_dates_are_normalized_to_the_first_of_the_month() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "goals2@example.com").await;

        let row = upsert_goal(&db, GoalKind::Saving, user.id, ymd(2024, 8, 19), dec("25"))
            .await
            .unwrap();
        assert_eq!(row.date, ymd(2024, 8, 1));

        let stored = stored_goal_value(&db, GoalKind::Saving, user.id, 2024, 8)
            .await
            .unwrap();
        assert_eq!(stored, Some(dec("25")));
    }

    #[tokio::test]
    async fn create_only_path_rejects_a_second_row_for_the_month() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "goals3@example.com").await;

        insert_goal(&db, GoalKind::Investment, user.id, ymd(2024, 2, 1), dec("10"))
            .await
            .unwrap();
        let err = insert_goal(&db, GoalKind::Investment, user.id, ymd(2024, 2, 28), dec("20"))
            .await
            .unwrap_err();
        assert!(matches!(err, ComputeError::Conflict(_)));

        // The original value survives.
        let stored = stored_goal_value(&db, GoalKind::Investment, user.id, 2024, 2)
            .await
            .unwrap();
        assert_eq!(stored, Some(dec("10")));
    }

    #[tokio::test]
    async fn profile_goal_falls_back_to_the_latest_row() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "goals4@example.com").await;
        let today = ymd(2024, 9, 15);

        assert!(current_or_latest_goal(&db, GoalKind::Expense, user.id, today)
            .await
            .unwrap()
            .is_none());

        upsert_goal(&db, GoalKind::Expense, user.id, ymd(2024, 3, 1), dec("30"))
            .await
            .unwrap();
        upsert_goal(&db, GoalKind::Expense, user.id, ymd(2024, 6, 1), dec("45"))
            .await
            .unwrap();

        let latest = current_or_latest_goal(&db, GoalKind::Expense, user.id, today)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.date, ymd(2024, 6, 1));

        upsert_goal(&db, GoalKind::Expense, user.id, today, dec("50"))
            .await
            .unwrap();
        let current = current_or_latest_goal(&db, GoalKind::Expense, user.id, today)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.value, dec("50"));
    }
}
