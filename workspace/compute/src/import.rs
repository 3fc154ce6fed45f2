use chrono::NaiveDate;
use csv::StringRecord;
use model::entities::expense::{self, ExpenseCategory};
use model::entities::investment::{self, InvestmentCategory};
use model::entities::saving::{self, SavingCategory};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ActiveValue::Set, ConnectionTrait, DatabaseConnection,
    TransactionTrait,
};
use tracing::info;

use crate::error::{ComputeError, Result};
use crate::goals;
use crate::kinds::{DataType, GoalKind, TransactionKind};
use crate::ledger;

/// Import a CSV payload for one user as a single all-or-nothing batch.
///
/// The first line is a header and counts as row 1; data rows are numbered
/// from 2 and any failure names its row. A failure anywhere rolls the whole
/// batch back. Returns the number of data rows applied.
pub async fn import_csv(
    db: &DatabaseConnection,
    user_id: i32,
    data_type: DataType,
    content: &[u8],
) -> Result<usize> {
    let text = std::str::from_utf8(content).map_err(|_| {
        ComputeError::Validation("Invalid file encoding. Please use UTF-8.".to_string())
    })?;
    let rows = data_rows(text)?;
    let row_count = rows.len();

    let txn = db.begin().await?;
    let outcome = match data_type {
        DataType::Transactions(TransactionKind::Income) => {
            apply_income_rows(&txn, user_id, &rows).await
        }
        DataType::Transactions(TransactionKind::Expense) => {
            apply_expense_rows(&txn, user_id, &rows).await
        }
        DataType::Transactions(TransactionKind::Saving) => {
            apply_saving_rows(&txn, user_id, &rows).await
        }
        DataType::Transactions(TransactionKind::Investment) => {
            apply_investment_rows(&txn, user_id, &rows).await
        }
        DataType::Goals(kind) => apply_goal_rows(&txn, user_id, kind, &rows).await,
    };

    match outcome {
        Ok(()) => {
            txn.commit().await?;
            info!(
                "Imported {} rows of {} for user {}",
                row_count,
                data_type.label(),
                user_id
            );
            Ok(row_count)
        }
        Err(err) => {
            txn.rollback().await?;
            Err(err)
        }
    }
}

/// Read all data rows with their 1-based row numbers. The header must exist
/// but its content is ignored.
fn data_rows(text: &str) -> Result<Vec<(usize, StringRecord)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = reader.records().enumerate();

    match records.next() {
        Some((_, Ok(_))) => {}
        Some((_, Err(e))) => {
            return Err(ComputeError::Validation(format!("Row 1: {e}")));
        }
        None => return Err(ComputeError::Validation("CSV file is empty.".to_string())),
    }

    let mut rows = Vec::new();
    for (index, record) in records {
        let row_number = index + 1;
        let record =
            record.map_err(|e| ComputeError::Validation(format!("Row {row_number}: {e}")))?;
        rows.push((row_number, record));
    }
    Ok(rows)
}

async fn apply_expense_rows<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    rows: &[(usize, StringRecord)],
) -> Result<()> {
    for (row_number, record) in rows {
        let (date, amount, raw_category) = parse_record_row(*row_number, record)?;
        let category = parse_category::<ExpenseCategory>(*row_number, &raw_category)?;
        expense::ActiveModel {
            date: Set(date),
            user_id: Set(user_id),
            amount: Set(amount),
            category: Set(category),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

async fn apply_saving_rows<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    rows: &[(usize, StringRecord)],
) -> Result<()> {
    for (row_number, record) in rows {
        let (date, amount, raw_category) = parse_record_row(*row_number, record)?;
        let category = parse_category::<SavingCategory>(*row_number, &raw_category)?;
        saving::ActiveModel {
            date: Set(date),
            user_id: Set(user_id),
            amount: Set(amount),
            category: Set(category),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

async fn apply_investment_rows<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    rows: &[(usize, StringRecord)],
) -> Result<()> {
    for (row_number, record) in rows {
        let (date, amount, raw_category) = parse_record_row(*row_number, record)?;
        let category = parse_category::<InvestmentCategory>(*row_number, &raw_category)?;
        investment::ActiveModel {
            date: Set(date),
            user_id: Set(user_id),
            amount: Set(amount),
            category: Set(category),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

/// Goal rows upsert month by month, so a later row for the same month wins.
async fn apply_goal_rows<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    kind: GoalKind,
    rows: &[(usize, StringRecord)],
) -> Result<()> {
    for (row_number, record) in rows {
        expect_columns(*row_number, record, 2)?;
        let date = parse_date(*row_number, &record[0])?;
        let value = parse_decimal(*row_number, &record[1])?;
        goals::upsert_goal(db, kind, user_id, date, value).await?;
    }
    Ok(())
}

/// Income rows replace their month, so a later row for the same month wins.
async fn apply_income_rows<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    rows: &[(usize, StringRecord)],
) -> Result<()> {
    for (row_number, record) in rows {
        expect_columns(*row_number, record, 2)?;
        let date = parse_date(*row_number, &record[0])?;
        let amount = parse_amount(*row_number, &record[1])?;
        ledger::replace_month_income(db, user_id, date, amount).await?;
    }
    Ok(())
}

fn parse_record_row(
    row_number: usize,
    record: &StringRecord,
) -> Result<(NaiveDate, Decimal, String)> {
    expect_columns(row_number, record, 3)?;
    let date = parse_date(row_number, &record[0])?;
    let amount = parse_amount(row_number, &record[1])?;
    Ok((date, amount, record[2].to_string()))
}

fn expect_columns(row_number: usize, record: &StringRecord, expected: usize) -> Result<()> {
    if record.len() != expected {
        return Err(ComputeError::Validation(format!(
            "Row {row_number}: Expected {expected} columns, found {}",
            record.len()
        )));
    }
    Ok(())
}

fn parse_date(row_number: usize, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        ComputeError::Validation(format!(
            "Row {row_number}: Invalid date '{raw}'. Use YYYY-MM-DD."
        ))
    })
}

fn parse_decimal(row_number: usize, raw: &str) -> Result<Decimal> {
    raw.trim()
        .parse()
        .map_err(|_| ComputeError::Validation(format!("Row {row_number}: Invalid number '{raw}'")))
}

fn parse_amount(row_number: usize, raw: &str) -> Result<Decimal> {
    let amount = parse_decimal(row_number, raw)?;
    if amount < Decimal::ZERO {
        return Err(ComputeError::Validation(format!(
            "Row {row_number}: Amount cannot be negative"
        )));
    }
    Ok(amount)
}

fn parse_category<T>(row_number: usize, raw: &str) -> Result<T>
where
    T: ActiveEnum<Value = String>,
{
    T::try_from_value(&raw.trim().to_string()).map_err(|_| {
        ComputeError::Validation(format!("Row {row_number}: Unknown category '{raw}'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate;
    use crate::testing;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn expense_batch_commits_every_row() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "import@example.com").await;

        let csv = "date,amount,category\n\
                   2024-06-01,100.00,vivienda\n\
                   2024-06-02,50.00,transporte\n\
                   2024-06-03,25.50,otros\n";
        let count = import_csv(
            &db,
            user.id,
            DataType::Transactions(TransactionKind::Expense),
            csv.as_bytes(),
        )
        .await
        .unwrap();
        assert_eq!(count, 3);

        let total = aggregate::month_total(&db, TransactionKind::Expense, user.id, 2024, 6)
            .await
            .unwrap();
        assert_eq!(total, dec("175.50"));
    }

    #[tokio::test]
    async fn a_bad_row_aborts_the_whole_batch() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "import2@example.com").await;

        // Row 2 has four columns.
        let csv = "date,amount,category\n\
                   2024-06-01,100.00,vivienda,extra\n\
                   2024-06-02,50.00,transporte\n";
        let err = import_csv(
            &db,
            user.id,
            DataType::Transactions(TransactionKind::Expense),
            csv.as_bytes(),
        )
        .await
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Row 2"), "unexpected message: {message}");
        assert!(message.contains("Expected 3 columns"));

        let total = aggregate::month_total(&db, TransactionKind::Expense, user.id, 2024, 6)
            .await
            .unwrap();
        assert_eq!(total, Decimal::ZERO);
    }

    #[tokio::test]
    async fn an_unknown_category_rolls_back_earlier_rows() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "import3@example.com").await;

        // A row inserted before the import must survive the rollback.
        testing::seed_investment(
            &db,
            user.id,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            "500.00",
            InvestmentCategory::Acciones,
        )
        .await;

        let csv = "date,amount,category\n\
                   2024-06-02,100.00,cripto\n\
                   2024-06-03,75.00,lotería\n";
        let err = import_csv(
            &db,
            user.id,
            DataType::Transactions(TransactionKind::Investment),
            csv.as_bytes(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Row 3"));

        let total = aggregate::month_total(&db, TransactionKind::Investment, user.id, 2024, 6)
            .await
            .unwrap();
        assert_eq!(total, dec("500.00"));
    }

    #[tokio::test]
    async fn goal_rows_upsert_by_month() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "import4@example.com").await;

        let csv = "date,value\n\
                   2024-06-05,40\n\
                   2024-06-25,55\n\
                   2024-07-01,60\n";
        let count = import_csv(
            &db,
            user.id,
            DataType::Goals(GoalKind::Expense),
            csv.as_bytes(),
        )
        .await
        .unwrap();
        assert_eq!(count, 3);

        let june = crate::goals::stored_goal_value(&db, GoalKind::Expense, user.id, 2024, 6)
            .await
            .unwrap();
        assert_eq!(june, Some(dec("55")));
        let july = crate::goals::stored_goal_value(&db, GoalKind::Expense, user.id, 2024, 7)
            .await
            .unwrap();
        assert_eq!(july, Some(dec("60")));
    }

    #[tokio::test]
    async fn income_rows_replace_their_month() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "import5@example.com").await;

        let csv = "date,amount\n\
                   2024-06-01,1000.00\n\
                   2024-06-15,1200.00\n";
        import_csv(
            &db,
            user.id,
            DataType::Transactions(TransactionKind::Income),
            csv.as_bytes(),
        )
        .await
        .unwrap();

        let total = aggregate::month_total(&db, TransactionKind::Income, user.id, 2024, 6)
            .await
            .unwrap();
        assert_eq!(total, dec("1200.00"));
    }

    #[tokio::test]
    async fn an_empty_file_is_rejected() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "import6@example.com").await;

        let err = import_csv(
            &db,
            user.id,
            DataType::Transactions(TransactionKind::Expense),
            b"",
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[tokio::test]
    async fn a_negative_amount_is_rejected_by_row() {
        let db = testing::setup_db().await;
        let user = testing::seed_user(&db, "import7@example.com").await;

        let csv = "date,amount,category\n\
                   2024-06-01,-5.00,otros\n";
        let err = import_csv(
            &db,
            user.id,
            DataType::Transactions(TransactionKind::Saving),
            csv.as_bytes(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Row 2"));
        assert!(err.to_string().contains("negative"));
    }
}
