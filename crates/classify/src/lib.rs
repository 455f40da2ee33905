//! Klaxon Classify - Alarm detection and normalization
//!
//! The classifier turns heterogeneous, loosely-structured feed payloads
//! into canonical [`AlarmEvent`](klaxon_protocol::AlarmEvent)s. It is a
//! pure component: no shared state, no I/O, and it never fails visibly -
//! an unparseable payload either classifies as "not an alarm" or degrades
//! to a deterministic fallback event.
//!
//! # Detection
//!
//! Two historical detection predicates are unified behind a single
//! configurable [`DetectionRule`]:
//!
//! - [`DetectionRule::Lenient`] (default): the target or topic ends with
//!   `/Alarm` (case-insensitive), **or** the payload carries a non-blank
//!   `Value.Message` or a numeric `Value.Priority`.
//! - [`DetectionRule::StrictSuffix`]: the suffix rule only.
//!
//! # Arrival time
//!
//! `normalize` stamps every event with the current instant. Timestamps
//! embedded in the payload are ignored: recency queries downstream assume
//! events enter the recent store in arrival order.

mod classifier;
mod rule;

pub use classifier::Classifier;
pub use rule::DetectionRule;
