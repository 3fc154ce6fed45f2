use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::user;

/// Monthly expense target, stored as a percentage of that month's income.
/// `date` is normalized to the first day of its month on write, so the
/// (date, user_id) primary key holds exactly one row per user per calendar
/// month.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expense_goals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub date: NaiveDate,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub value: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::UserId",
        to = "user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl ActiveModelBehavior for ActiveModel {}
