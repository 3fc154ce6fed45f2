//! Shared fixtures for the compute test suites: an in-memory SQLite database
//! with the full schema applied, plus row seeding helpers.

use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use model::entities::expense::{self, ExpenseCategory};
use model::entities::investment::{self, InvestmentCategory};
use model::entities::saving::{self, SavingCategory};
use model::entities::user;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, Database, DatabaseConnection};

/// Create an in-memory SQLite database with migrations applied.
pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn seed_user(db: &DatabaseConnection, email: &str) -> user::Model {
    user::ActiveModel {
        email: Set(email.to_string()),
        username: Set(Some("tester".to_string())),
        password: Set("secret".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create test user")
}

pub async fn seed_expense(
    db: &DatabaseConnection,
    user_id: i32,
    date: NaiveDate,
    amount: &str,
    category: ExpenseCategory,
) -> expense::Model {
    expense::ActiveModel {
        date: Set(date),
        user_id: Set(user_id),
        amount: Set(amount.parse::<Decimal>().expect("valid decimal literal")),
        category: Set(category),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert expense row")
}

pub async fn seed_saving(
    db: &DatabaseConnection,
    user_id: i32,
    date: NaiveDate,
    amount: &str,
    category: SavingCategory,
) -> saving::Model {
    saving::ActiveModel {
        date: Set(date),
        user_id: Set(user_id),
        amount: Set(amount.parse::<Decimal>().expect("valid decimal literal")),
        category: Set(category),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert saving row")
}

pub async fn seed_investment(
    db: &DatabaseConnection,
    user_id: i32,
    date: NaiveDate,
    amount: &str,
    category: InvestmentCategory,
) -> investment::Model {
    investment::ActiveModel {
        date: Set(date),
        user_id: Set(user_id),
        amount: Set(amount.parse::<Decimal>().expect("valid decimal literal")),
        category: Set(category),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert investment row")
}
