use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::user;

/// Closed set of investment categories, stored by display name.
#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(100))")]
pub enum InvestmentCategory {
    #[sea_orm(string_value = "fondo de inversión")]
    #[serde(rename = "fondo de inversión")]
    FondoDeInversion,
    #[sea_orm(string_value = "acciones")]
    #[serde(rename = "acciones")]
    Acciones,
    #[sea_orm(string_value = "bienes raíces")]
    #[serde(rename = "bienes raíces")]
    BienesRaices,
    #[sea_orm(string_value = "cripto")]
    #[serde(rename = "cripto")]
    Cripto,
    #[sea_orm(string_value = "negocio")]
    #[serde(rename = "negocio")]
    Negocio,
    #[sea_orm(string_value = "otros")]
    #[serde(rename = "otros")]
    Otros,
}

/// A single investment row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "investments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: NaiveDate,
    pub user_id: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,
    pub category: InvestmentCategory,
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
