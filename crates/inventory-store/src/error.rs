use thiserror::Error;

/// Errors that can occur when interacting with the inventory stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored row could not be turned back into a record.
    #[error("Invalid stored record: {0}")]
    InvalidRecord(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
