use compute::error::ComputeError;
use model::entities::user;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// Find a user by email, or produce the NotFound the endpoints surface.
pub async fn user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<user::Model, ComputeError> {
    user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?
        .ok_or_else(|| ComputeError::NotFound(format!("User with email {email} not found")))
}

/// Find a user by id, or produce the NotFound the endpoints surface.
pub async fn user_by_id(db: &DatabaseConnection, user_id: i32) -> Result<user::Model, ComputeError> {
    user::Entity::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or_else(|| ComputeError::NotFound(format!("User with id {user_id} not found")))
}
