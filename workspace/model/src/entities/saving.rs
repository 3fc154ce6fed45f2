use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::user;

/// Closed set of saving categories, stored by display name.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(100))")]
pub enum SavingCategory {
    #[sea_orm(string_value = "fondo de emergencia")]
    #[serde(rename = "fondo de emergencia")]
    FondoDeEmergencia,
    #[sea_orm(string_value = "jubilación")]
    #[serde(rename = "jubilación")]
    Jubilacion,
    #[sea_orm(string_value = "vacaciones")]
    #[serde(rename = "vacaciones")]
    Vacaciones,
    #[sea_orm(string_value = "mantenimiento")]
    #[serde(rename = "mantenimiento")]
    Mantenimiento,
    #[sea_orm(string_value = "otros")]
    #[serde(rename = "otros")]
    Otros,
}

/// A single saving row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "savings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: NaiveDate,
    pub user_id: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    pub category: SavingCategory,
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
