use indiereel_core::error::CoreError;

/// Errors from the store layer and the repositories built on it.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A domain rule rejected the operation (not found, forbidden, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A backend failure not covered by the variants above.
    #[error("Store error: {0}")]
    Store(String),
}

pub type DbResult<T> = Result<T, DbError>;
