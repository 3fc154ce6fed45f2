use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use common::{CategoryTotal, RecordEntry, SimpleHistoryEntry};
use rust_decimal::Decimal;
use sea_orm::ConnectionTrait;

use crate::error::Result;
use crate::kinds::TransactionKind;
use crate::ledger::{self, LedgerRow};

/// Exact-decimal sum of one kind over one calendar month. A month with no
/// rows sums to zero.
pub async fn month_total<C: ConnectionTrait>(
    db: &C,
    kind: TransactionKind,
    user_id: i32,
    year: i32,
    month: u32,
) -> Result<Decimal> {
    let rows = ledger::rows_in_month(db, kind, user_id, year, month).await?;
    Ok(rows.iter().map(|r| r.amount).sum())
}

/// Month-bucketed totals for all rows dated on or after `start`, ascending by
/// (year, month). Months without rows are not emitted.
pub async fn monthly_totals<C: ConnectionTrait>(
    db: &C,
    kind: TransactionKind,
    user_id: i32,
    start: NaiveDate,
) -> Result<Vec<SimpleHistoryEntry>> {
    let rows = ledger::rows_since(db, kind, user_id, start).await?;
    Ok(bucket_by_month(&rows)
        .into_iter()
        .map(|((year, month), total)| SimpleHistoryEntry { year, month, total })
        .collect())
}

/// Per-category sums of one kind for one month. Categories without rows are
/// absent; ordering is alphabetical.
pub async fn category_totals<C: ConnectionTrait>(
    db: &C,
    kind: TransactionKind,
    user_id: i32,
    year: i32,
    month: u32,
) -> Result<Vec<CategoryTotal>> {
    let rows = ledger::rows_in_month(db, kind, user_id, year, month).await?;
    let mut buckets: BTreeMap<String, Decimal> = BTreeMap::new();
    for row in rows {
        if let Some(category) = row.category {
            *buckets.entry(category).or_insert(Decimal::ZERO) += row.amount;
        }
    }
    Ok(buckets
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect())
}

/// Raw rows of one kind for one month as dashboard listing entries.
pub async fn records_in_month<C: ConnectionTrait>(
    db: &C,
    kind: TransactionKind,
    user_id: i32,
    year: i32,
    month: u32,
) -> Result<Vec<RecordEntry>> {
    let rows = ledger::rows_in_month(db, kind, user_id, year, month).await?;
    Ok(rows
        .into_iter()
        .map(|r| RecordEntry {
            date: r.date,
            amount: r.amount,
            category: r.category.unwrap_or_default(),
        })
        .collect())
}

fn bucket_by_month(rows: &[LedgerRow]) -> BTreeMap<(i32, u32), Decimal> {
    let mut buckets = BTreeMap::new();
    for row in rows {
        *buckets
            .entry((row.date.year(), row.date.month()))
            .or_insert(Decimal::ZERO) += row.amount;
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use model::entities::expense::ExpenseCategory;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[tokio::test]
    async fn empty_month_totals_to_zero() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "agg@example.com").await;

        let total = month_total(&db, TransactionKind::Expense, user.id, 2024, 6)
            .await
            .unwrap();
        assert_eq!(total, Decimal::ZERO);
    }

    #[tokio::test]
    async fn month_total_is_the_exact_decimal_sum() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "agg2@example.com").await;

        // Amounts chosen to drift under binary floats (0.10 + 0.20 style).
        testing::seed_expense(&db, user.id, ymd(2024, 6, 3), "10.10", ExpenseCategory::Otros).await;
        testing::seed_expense(&db, user.id, ymd(2024, 6, 9), "20.20", ExpenseCategory::Otros).await;
        testing::seed_expense(&db, user.id, ymd(2024, 6, 21), "0.01", ExpenseCategory::Ropa).await;
        // A neighboring month must not leak in.
        testing::seed_expense(&db, user.id, ymd(2024, 7, 1), "99.99", ExpenseCategory::Otros).await;

        let total = month_total(&db, TransactionKind::Expense, user.id, 2024, 6)
            .await
            .unwrap();
        assert_eq!(total, dec("30.31"));
    }

    #[tokio::test]
    async fn monthly_totals_bucket_and_order_by_month() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "agg3@example.com").await;

        testing::seed_expense(&db, user.id, ymd(2024, 3, 5), "100.00", ExpenseCategory::Vivienda)
            .await;
        testing::seed_expense(&db, user.id, ymd(2024, 1, 15), "40.00", ExpenseCategory::Salud)
            .await;
        testing::seed_expense(&db, user.id, ymd(2024, 1, 20), "60.00", ExpenseCategory::Salud)
            .await;

        let entries = monthly_totals(&db, TransactionKind::Expense, user.id, ymd(2024, 1, 1))
            .await
            .unwrap();

        // February has no rows and is omitted, not zero-filled.
        assert_eq!(entries.len(), 2);
        assert_eq!((entries[0].year, entries[0].month), (2024, 1));
        assert_eq!(entries[0].total, dec("100.00"));
        assert_eq!((entries[1].year, entries[1].month), (2024, 3));
        assert_eq!(entries[1].total, dec("100.00"));
    }

    #[tokio::test]
    async fn monthly_totals_respect_the_window_start() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "agg4@example.com").await;

        testing::seed_expense(&db, user.id, ymd(2023, 12, 31), "55.00", ExpenseCategory::Otros)
            .await;
        testing::seed_expense(&db, user.id, ymd(2024, 1, 1), "45.00", ExpenseCategory::Otros)
            .await;

        let entries = monthly_totals(&db, TransactionKind::Expense, user.id, ymd(2024, 1, 1))
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!((entries[0].year, entries[0].month), (2024, 1));
    }

    #[tokio::test]
    async fn category_totals_group_within_the_month() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "agg5@example.com").await;

        testing::seed_expense(&db, user.id, ymd(2024, 6, 3), "100.00", ExpenseCategory::Alimentacion)
            .await;
        testing::seed_expense(&db, user.id, ymd(2024, 6, 9), "25.00", ExpenseCategory::Alimentacion)
            .await;
        testing::seed_expense(&db, user.id, ymd(2024, 6, 12), "50.00", ExpenseCategory::Transporte)
            .await;

        let totals = category_totals(&db, TransactionKind::Expense, user.id, 2024, 6)
            .await
            .unwrap();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].category, "alimentación");
        assert_eq!(totals[0].total, dec("125.00"));
        assert_eq!(totals[1].category, "transporte");
        assert_eq!(totals[1].total, dec("50.00"));
    }

    #[tokio::test]
    async fn income_records_have_no_category() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "agg6@example.com").await;

        ledger::upsert_income(&db, user.id, ymd(2024, 6, 1), dec("1000.00"))
            .await
            .unwrap();

        let totals = category_totals(&db, TransactionKind::Income, user.id, 2024, 6)
            .await
            .unwrap();
        assert!(totals.is_empty());
    }
}
