use chrono::{Datelike, NaiveDate};
use common::DashboardResponse;
use rust_decimal::Decimal;
use sea_orm::ConnectionTrait;

use crate::aggregate;
use crate::error::Result;
use crate::goals;
use crate::kinds::{GoalKind, TransactionKind};

/// Assemble the current-month snapshot for one user: the four kind totals,
/// the raw stored goal percents, the raw per-record listings and the
/// per-category breakdowns. Income has no categories, so no listing or
/// breakdown exists for it.
pub async fn compose<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    today: NaiveDate,
) -> Result<DashboardResponse> {
    let (year, month) = (today.year(), today.month());

    let income_total =
        aggregate::month_total(db, TransactionKind::Income, user_id, year, month).await?;
    let expense_total =
        aggregate::month_total(db, TransactionKind::Expense, user_id, year, month).await?;
    let saving_total =
        aggregate::month_total(db, TransactionKind::Saving, user_id, year, month).await?;
    let investment_total =
        aggregate::month_total(db, TransactionKind::Investment, user_id, year, month).await?;

    // Goal percents are the stored values verbatim; the history surface is
    // the one that converts against income.
    let expense_goal_percent = goals::stored_goal_value(db, GoalKind::Expense, user_id, year, month)
        .await?
        .unwrap_or(Decimal::ZERO);
    let saving_goal_percent = goals::stored_goal_value(db, GoalKind::Saving, user_id, year, month)
        .await?
        .unwrap_or(Decimal::ZERO);
    let investment_goal_percent =
        goals::stored_goal_value(db, GoalKind::Investment, user_id, year, month)
            .await?
            .unwrap_or(Decimal::ZERO);

    let expenses =
        aggregate::records_in_month(db, TransactionKind::Expense, user_id, year, month).await?;
    let savings =
        aggregate::records_in_month(db, TransactionKind::Saving, user_id, year, month).await?;
    let investments =
        aggregate::records_in_month(db, TransactionKind::Investment, user_id, year, month).await?;

    let category_expenses =
        aggregate::category_totals(db, TransactionKind::Expense, user_id, year, month).await?;
    let category_savings =
        aggregate::category_totals(db, TransactionKind::Saving, user_id, year, month).await?;
    let category_investments =
        aggregate::category_totals(db, TransactionKind::Investment, user_id, year, month).await?;

    Ok(DashboardResponse {
        income_total,
        expense_total,
        saving_total,
        investment_total,
        expense_goal_percent,
        saving_goal_percent,
        investment_goal_percent,
        expenses,
        savings,
        investments,
        category_expenses,
        category_savings,
        category_investments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger;
    use crate::testing;
    use model::entities::expense::ExpenseCategory;
    use model::entities::saving::SavingCategory;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[tokio::test]
    async fn a_user_without_activity_gets_a_zeroed_snapshot() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "dash@example.com").await;

        let snapshot = compose(&db, user.id, ymd(2024, 6, 15)).await.unwrap();

        assert_eq!(snapshot.income_total, Decimal::ZERO);
        assert_eq!(snapshot.investment_total, Decimal::ZERO);
        assert_eq!(snapshot.investment_goal_percent, Decimal::ZERO);
        assert!(snapshot.investments.is_empty());
        assert!(snapshot.category_investments.is_empty());
    }

    #[tokio::test]
    async fn snapshot_reflects_only_the_current_month() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "dash2@example.com").await;
        let today = ymd(2024, 6, 15);

        ledger::upsert_income(&db, user.id, ymd(2024, 6, 1), dec("2500.00"))
            .await
            .unwrap();
        testing::seed_expense(&db, user.id, ymd(2024, 6, 2), "800.00", ExpenseCategory::Vivienda)
            .await;
        testing::seed_expense(&db, user.id, ymd(2024, 6, 9), "120.50", ExpenseCategory::Alimentacion)
            .await;
        testing::seed_saving(
            &db,
            user.id,
            ymd(2024, 6, 3),
            "300.00",
            SavingCategory::FondoDeEmergencia,
        )
        .await;
        // Last month's expense must not show up.
        testing::seed_expense(&db, user.id, ymd(2024, 5, 30), "999.99", ExpenseCategory::Otros)
            .await;

        crate::goals::upsert_goal(&db, GoalKind::Expense, user.id, today, dec("40"))
            .await
            .unwrap();

        let snapshot = compose(&db, user.id, today).await.unwrap();

        assert_eq!(snapshot.income_total, dec("2500.00"));
        assert_eq!(snapshot.expense_total, dec("920.50"));
        assert_eq!(snapshot.saving_total, dec("300.00"));
        assert_eq!(snapshot.investment_total, Decimal::ZERO);

        // Stored percent comes back verbatim, not income-converted.
        assert_eq!(snapshot.expense_goal_percent, dec("40"));
        assert_eq!(snapshot.saving_goal_percent, Decimal::ZERO);

        assert_eq!(snapshot.expenses.len(), 2);
        assert_eq!(snapshot.savings.len(), 1);
        assert_eq!(snapshot.savings[0].category, "fondo de emergencia");

        assert_eq!(snapshot.category_expenses.len(), 2);
        let vivienda = snapshot
            .category_expenses
            .iter()
            .find(|c| c.category == "vivienda")
            .unwrap();
        assert_eq!(vivienda.total, dec("800.00"));
    }
}
