//! Klaxon Store - Bounded recent-event buffer
//!
//! `RecentStore` holds the most recent alarm events, bounded by count and
//! by age, and answers two query shapes with no external I/O:
//!
//! - `since(threshold)` - events at or after an instant, newest-first
//! - `summary(window)` - windowed aggregate (total, by severity, by location)
//!
//! # Ordering invariant
//!
//! The buffer is kept newest-first. `append` inserts at the newest end and
//! pruning only removes from the oldest end, so the buffer stays sorted by
//! timestamp. Both queries exploit this with a short-circuit scan that stops
//! at the first too-old entry. An append whose timestamp is older than the
//! current newest entry would silently break that - it is rejected with
//! [`StoreError::NonMonotonic`] instead. In practice appends are stamped
//! with arrival time by the classifier, so the invariant holds by
//! construction.
//!
//! # Concurrency
//!
//! A single `parking_lot::RwLock` guards the buffer. Critical sections are
//! short and never perform I/O; readers see either the state before or
//! after an append, never a cap-violating intermediate.

mod error;
mod store;
mod summary;
mod window;

pub use error::{Result, StoreError};
pub use store::{RecentStore, StoreConfig};
pub use summary::{GroupCounts, Summary};
pub use window::Window;

/// Default event-count cap
pub const DEFAULT_MAX_EVENTS: usize = 10_000;

/// Default retention in days
pub const DEFAULT_RETENTION_DAYS: i64 = 35;
