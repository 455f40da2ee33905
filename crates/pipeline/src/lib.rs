//! Klaxon Pipeline - From raw payload to every destination
//!
//! The pipeline orchestrates one feed payload end to end:
//!
//! ```text
//! (payload, topic)                                 ┌──→ durable repository
//!       │                                          ├──→ recent store
//!       ▼                                          ├──→ live broadcast
//!   Classifier ──── not alarm-like ──→ drop        └──→ extra sinks
//!       │
//!       └── canonical AlarmEvent ─────────────────────┘
//! ```
//!
//! Independently, a subscriber joining the live topic triggers a private
//! bootstrap replay of the last few minutes of history.
//!
//! # Failure isolation
//!
//! Destinations are attempted independently: a durable-write failure never
//! hides the alarm from live observers, and a broadcast failure never rolls
//! back persistence. Whether a durable-write failure fails the whole call
//! is the [`Durability`] configuration decision, not a hard-coded rule.

mod bootstrap;
mod error;
mod pipeline;
mod traits;

pub use bootstrap::{spawn_bootstrap_listener, BootstrapSource};
pub use error::{PipelineError, Result};
pub use pipeline::{Durability, IngestOutcome, IngestPipeline, PipelineBuilder};
pub use traits::{Broadcast, EventSink};

/// Default bootstrap replay window in minutes
pub const DEFAULT_BOOTSTRAP_MINUTES: i64 = 10;
