//! The repository boundary trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use klaxon_protocol::AlarmEvent;

use crate::Result;

/// Durable alarm persistence, keyed by event id
///
/// All query methods return events newest-first. Implementations apply
/// their own timeout/retry policy; the pipeline treats each call as a
/// single reported outcome.
#[async_trait]
pub trait AlarmRepository: Send + Sync {
    /// Persist one event
    async fn save(&self, event: &AlarmEvent) -> Result<()>;

    /// Events with `timestamp >= since`, newest-first
    async fn find_since(&self, since: DateTime<Utc>) -> Result<Vec<AlarmEvent>>;

    /// Events with `from <= timestamp <= to`, newest-first
    async fn find_between(&self, from: DateTime<Utc>, to: DateTime<Utc>)
        -> Result<Vec<AlarmEvent>>;

    /// The most recent `limit` events, newest-first
    async fn recent(&self, limit: usize) -> Result<Vec<AlarmEvent>>;
}
