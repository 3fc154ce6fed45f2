use chrono::{Datelike, NaiveDate};
use model::entities::{expense, income, investment, saving};
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder,
};
use tracing::debug;

use crate::calendar::month_bounds;
use crate::error::Result;
use crate::kinds::TransactionKind;

/// A ledger row reduced to what the aggregator needs. Income rows carry no
/// category.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: Option<String>,
}

/// All rows of one kind for one user dated on or after `start`, ascending by
/// date.
pub async fn rows_since<C: ConnectionTrait>(
    db: &C,
    kind: TransactionKind,
    user_id: i32,
    start: NaiveDate,
) -> Result<Vec<LedgerRow>> {
    let rows = match kind {
        TransactionKind::Income => income::Entity::find()
            .filter(income::Column::UserId.eq(user_id))
            .filter(income::Column::Date.gte(start))
            .order_by_asc(income::Column::Date)
            .all(db)
            .await?
            .into_iter()
            .map(|m| LedgerRow {
                date: m.date,
                amount: m.amount,
                category: None,
            })
            .collect(),
        TransactionKind::Expense => expense::Entity::find()
            .filter(expense::Column::UserId.eq(user_id))
            .filter(expense::Column::Date.gte(start))
            .order_by_asc(expense::Column::Date)
            .all(db)
            .await?
            .into_iter()
            .map(|m| LedgerRow {
                date: m.date,
                amount: m.amount,
                category: Some(m.category.to_value()),
            })
            .collect(),
        TransactionKind::Saving => saving::Entity::find()
            .filter(saving::Column::UserId.eq(user_id))
            .filter(saving::Column::Date.gte(start))
            .order_by_asc(saving::Column::Date)
            .all(db)
            .await?
            .into_iter()
            .map(|m| LedgerRow {
                date: m.date,
                amount: m.amount,
                category: Some(m.category.to_value()),
            })
            .collect(),
        TransactionKind::Investment => investment::Entity::find()
            .filter(investment::Column::UserId.eq(user_id))
            .filter(investment::Column::Date.gte(start))
            .order_by_asc(investment::Column::Date)
            .all(db)
            .await?
            .into_iter()
            .map(|m| LedgerRow {
                date: m.date,
                amount: m.amount,
                category: Some(m.category.to_value()),
            })
            .collect(),
    };
    Ok(rows)
}

/// All rows of one kind for one user inside one calendar month.
pub async fn rows_in_month<C: ConnectionTrait>(
    db: &C,
    kind: TransactionKind,
    user_id: i32,
    year: i32,
    month: u32,
) -> Result<Vec<LedgerRow>> {
    let (start, end) = month_bounds(year, month);
    let rows = rows_since(db, kind, user_id, start).await?;
    Ok(rows.into_iter().filter(|r| r.date < end).collect())
}

/// Insert or overwrite the income row for exactly (date, user). The
/// composite primary key makes this a single `ON CONFLICT DO UPDATE`.
pub async fn upsert_income<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    date: NaiveDate,
    amount: Decimal,
) -> Result<income::Model> {
    income::Entity::insert(income::ActiveModel {
        date: Set(date),
        user_id: Set(user_id),
        amount: Set(amount),
    })
    .on_conflict(
        OnConflict::columns([income::Column::Date, income::Column::UserId])
            .update_column(income::Column::Amount)
            .to_owned(),
    )
    .exec(db)
    .await?;

    debug!("Upserted income of {} for user {} on {}", amount, user_id, date);
    Ok(income::Model {
        date,
        user_id,
        amount,
    })
}

/// Replace the user's income for `date`'s month with a single row: delete
/// whatever the month holds, then insert. This is the one-value-per-month
/// policy the CSV importer enforces. Callers that need atomicity pass a
/// transaction handle.
pub async fn replace_month_income<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    date: NaiveDate,
    amount: Decimal,
) -> Result<income::Model> {
    let (start, end) = month_bounds(date.year(), date.month());
    income::Entity::delete_many()
        .filter(income::Column::UserId.eq(user_id))
        .filter(income::Column::Date.gte(start))
        .filter(income::Column::Date.lt(end))
        .exec(db)
        .await?;

    let inserted = income::ActiveModel {
        date: Set(date),
        user_id: Set(user_id),
        amount: Set(amount),
    }
    .insert(db)
    .await?;
    Ok(inserted)
}
