//! Klaxon Live - Broadcast hub for live observers
//!
//! `LiveHub` is the in-process publish/subscribe transport. It provides:
//!
//! - Non-blocking fan-out of canonical events to all connected subscribers
//! - Private delivery to a single subscriber (the bootstrap replay path)
//! - Join notices so the pipeline can react to a subscriber joining
//! - Zero cost when no subscribers are connected (inline flag check)
//! - Automatic cleanup of disconnected subscribers
//!
//! # Delivery semantics
//!
//! Fan-out uses `try_send`: a slow or full subscriber drops its own copy,
//! never delaying the others and never blocking the ingest hot path.
//! Private delivery (`send_to`) waits for channel capacity because a
//! bootstrap batch must not be silently lost.

mod error;
mod hub;
mod message;

pub use error::{LiveError, Result};
pub use hub::{LiveHub, SubscriberId};
pub use message::{JoinNotice, LiveMessage};

/// Per-subscriber channel depth
pub const CHANNEL_BUFFER_SIZE: usize = 256;

#[cfg(test)]
mod hub_test;
