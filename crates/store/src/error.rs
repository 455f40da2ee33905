//! Store error types

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors from the recent store
#[derive(Debug, Error)]
pub enum StoreError {
    /// An append would break the newest-first sortedness the short-circuit
    /// queries rely on. Programming-contract violation, not a user error.
    #[error("append breaks arrival ordering: event at {event} is older than newest at {newest}")]
    NonMonotonic {
        event: DateTime<Utc>,
        newest: DateTime<Utc>,
    },

    /// Malformed summary window string
    #[error("invalid window '{input}': {reason}")]
    InvalidWindow { input: String, reason: &'static str },
}

impl StoreError {
    pub(crate) fn invalid_window(input: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidWindow {
            input: input.into(),
            reason,
        }
    }
}
