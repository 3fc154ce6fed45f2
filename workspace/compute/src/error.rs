use thiserror::Error;

/// Error types for the compute crate. The API layer maps these onto HTTP
/// statuses; nothing below it retries.
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A referenced user or row does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Input rejected before any write happened.
    #[error("{0}")]
    Validation(String),

    /// A uniqueness rule would be violated.
    #[error("{0}")]
    Conflict(String),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
