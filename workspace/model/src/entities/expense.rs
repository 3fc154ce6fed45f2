use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::user;

/// Closed set of expense categories, stored by display name.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(100))")]
pub enum ExpenseCategory {
    #[sea_orm(string_value = "vivienda")]
    #[serde(rename = "vivienda")]
    Vivienda,
    #[sea_orm(string_value = "alimentación")]
    #[serde(rename = "alimentación")]
    Alimentacion,
    #[sea_orm(string_value = "transporte")]
    #[serde(rename = "transporte")]
    Transporte,
    #[sea_orm(string_value = "salud")]
    #[serde(rename = "salud")]
    Salud,
    #[sea_orm(string_value = "educación")]
    #[serde(rename = "educación")]
    Educacion,
    #[sea_orm(string_value = "entretenimiento")]
    #[serde(rename = "entretenimiento")]
    Entretenimiento,
    #[sea_orm(string_value = "ropa")]
    #[serde(rename = "ropa")]
    Ropa,
    #[sea_orm(string_value = "otros")]
    #[serde(rename = "otros")]
    Otros,
}

/// A single expense row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: NaiveDate,
    pub user_id: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    pub category: ExpenseCategory,
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

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
