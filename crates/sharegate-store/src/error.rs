//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A mutation would violate the one-grant-per-pair invariant.
    ///
    /// The atomic upsert normally makes this unreachable; it surfaces only
    /// if the underlying constraint rejects a write some other way.
    #[error("conflicting grant for file {file_id} user {user_id}")]
    Conflict { file_id: i64, user_id: i64 },

    /// A row referenced by the operation does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid data in storage (e.g. a flag column outside 0/1).
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
