//! Pipeline error types

use thiserror::Error;

use klaxon_storage::StorageError;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Pipeline errors
///
/// Only failures the caller can act on surface here; unparseable payloads
/// and per-subscriber broadcast hiccups are handled (and logged) inside.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The durable write (or a bootstrap query) failed
    ///
    /// Carries the storage error so callers can distinguish transient I/O
    /// from integrity violations when deciding whether to retry.
    #[error("durable store failure: {0}")]
    Persistence(#[from] StorageError),

    /// Private bootstrap delivery to a joining subscriber failed
    #[error("bootstrap delivery failed: {0}")]
    Broadcast(String),

    /// An extra sink rejected the event
    #[error("sink '{sink}' failed: {message}")]
    Sink {
        sink: &'static str,
        message: String,
    },
}
