use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::Email, 255).unique_key())
                    .col(string_len_null(Users::Username, 50))
                    .col(string_len(Users::Password, 255))
                    .to_owned(),
            )
            .await?;

        // Create incomes table; one row per (date, user)
        manager
            .create_table(
                Table::create()
                    .table(Incomes::Table)
                    .if_not_exists()
                    .col(date(Incomes::Date))
                    .col(integer(Incomes::UserId))
                    .col(decimal(Incomes::Amount).decimal_len(10, 2))
                    .primary_key(
                        Index::create()
                            .name("pk_incomes")
                            .col(Incomes::Date)
                            .col(Incomes::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_income_user")
                            .from(Incomes::Table, Incomes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create expenses table
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(pk_auto(Expenses::Id))
                    .col(date(Expenses::Date))
                    .col(integer(Expenses::UserId))
                    .col(decimal(Expenses::Amount).decimal_len(10, 2))
                    .col(string_len(Expenses::Category, 100))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_user")
                            .from(Expenses::Table, Expenses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create savings table
        manager
            .create_table(
                Table::create()
                    .table(Savings::Table)
                    .if_not_exists()
                    .col(pk_auto(Savings::Id))
                    .col(date(Savings::Date))
                    .col(integer(Savings::UserId))
                    .col(decimal(Savings::Amount).decimal_len(10, 2))
                    .col(string_len(Savings::Category, 100))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saving_user")
                            .from(Savings::Table, Savings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create investments table
        manager
            .create_table(
                Table::create()
                    .table(Investments::Table)
                    .if_not_exists()
                    .col(pk_auto(Investments::Id))
                    .col(date(Investments::Date))
                    .col(integer(Investments::UserId))
                    .col(decimal(Investments::Amount).decimal_len(10, 2))
                    .col(string_len(Investments::Category, 100))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_investment_user")
                            .from(Investments::Table, Investments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create the three goal tables. The (date, user_id) composite key is
        // the month-uniqueness constraint: goal dates are normalized to the
        // first of the month before they reach the database.
        for (table, fk_name) in [
            (GoalTables::ExpenseGoals, "fk_expense_goal_user"),
            (GoalTables::SavingGoals, "fk_saving_goal_user"),
            (GoalTables::InvestmentGoals, "fk_investment_goal_user"),
        ] {
            manager
                .create_table(
                    Table::create()
                        .table(table)
                        .if_not_exists()
                        .col(date(Goals::Date))
                        .col(integer(Goals::UserId))
                        .col(decimal(Goals::Value).decimal_len(5, 2))
                        .primary_key(
                            Index::create()
                                .name(format!("pk_{}", table.to_string()))
                                .col(Goals::Date)
                                .col(Goals::UserId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name(fk_name)
                                .from(table, Goals::UserId)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::Cascade)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            GoalTables::InvestmentGoals,
            GoalTables::SavingGoals,
            GoalTables::ExpenseGoals,
        ] {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Investments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Savings::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Incomes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

// Define identifiers for all tables

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Username,
    Password,
}

#[derive(DeriveIden)]
enum Incomes {
    Table,
    Date,
    UserId,
    Amount,
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    Date,
    UserId,
    Amount,
    Category,
}

#[derive(DeriveIden)]
enum Savings {
    Table,
    Id,
    Date,
    UserId,
    Amount,
    Category,
}

#[derive(DeriveIden)]
enum Investments {
    Table,
    Id,
    Date,
    UserId,
    Amount,
    Category,
}

/// The three goal tables share one column layout.
#[derive(DeriveIden, Clone, Copy)]
enum GoalTables {
    #[sea_orm(iden = "expense_goals")]
    ExpenseGoals,
    #[sea_orm(iden = "saving_goals")]
    SavingGoals,
    #[sea_orm(iden = "investment_goals")]
    InvestmentGoals,
}

#[derive(DeriveIden)]
enum Goals {
    Date,
    UserId,
    Value,
}
