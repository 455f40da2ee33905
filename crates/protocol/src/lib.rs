//! Klaxon Protocol - Core types for the alarm relay
//!
//! This crate provides the foundational types that flow through the pipeline:
//! - `AlarmEvent` - The canonical, arrival-timestamped alarm record
//! - `Level` - Severity derived from the numeric feed priority
//! - `AlarmRow` - Flattened read-model row for tabular queries
//! - Target-path projections (`kind_from_path`, `device_from_path`, ...)
//!
//! # Design Principles
//!
//! - **Arrival time is the ordering key**: `AlarmEvent::timestamp` is the
//!   instant the relay classified the payload, never a time embedded in the
//!   payload. Every downstream recency query depends on this.
//! - **Deterministic ids**: `target + "@" + timestamp`, so the id can be
//!   re-derived from stored fields.
//! - **Pure projections**: the path helpers are plain string functions with
//!   no external state.

mod event;
mod level;
mod path;
mod row;

pub use event::AlarmEvent;
pub use level::Level;
pub use path::{device_from_path, kind_from_path, normalize_path, short_from_path};
pub use row::AlarmRow;

/// Default number of rows returned by the "recent N" query
pub const DEFAULT_RECENT_LIMIT: usize = 200;

/// Hard cap on the "recent N" query
pub const MAX_RECENT_LIMIT: usize = 2000;
