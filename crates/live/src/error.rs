//! Live hub error types

use thiserror::Error;

use crate::SubscriberId;

/// Result type for hub operations
pub type Result<T> = std::result::Result<T, LiveError>;

/// Errors from the live hub
#[derive(Debug, Error)]
pub enum LiveError {
    /// No subscriber with that id (never joined, or already gone)
    #[error("unknown subscriber: {0}")]
    UnknownSubscriber(SubscriberId),

    /// The subscriber disconnected while a private delivery was in flight
    #[error("subscriber disconnected: {0}")]
    Disconnected(SubscriberId),
}
