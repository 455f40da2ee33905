//! Storage error types

use thiserror::Error;

/// Result type for repository operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors from the durable repository
///
/// The two variants are deliberately distinguishable: transient I/O is a
/// candidate for retrying the whole payload, an integrity violation is not.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Transient I/O failure (connection, timeout, ...)
    #[error("storage i/o failure: {0}")]
    Io(String),

    /// Constraint violation - typically a duplicate event id
    #[error("integrity violation for event '{id}'")]
    Integrity { id: String },
}

impl StorageError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    pub fn integrity(id: impl Into<String>) -> Self {
        Self::Integrity { id: id.into() }
    }

    /// Whether retrying the same write could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
