use sea_orm::entity::prelude::*;

/// Registered owner of all ledger rows and goals.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub username: Option<String>,
    /// Plaintext credential stub compared verbatim at login. Not a security
    /// layer; hashing lives outside this system's scope.
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::income::Entity")]
    Income,
    #[sea_orm(has_many = "super::expense::Entity")]
    Expense,
    #[sea_orm(has_many = "super::saving::Entity")]
    Saving,
    #[sea_orm(has_many = "super::investment::Entity")]
    Investment,
}

impl ActiveModelBehavior for ActiveModel {}
