//! The recent-event store

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

use klaxon_protocol::AlarmEvent;

use crate::{GroupCounts, Result, StoreError, Summary, Window, DEFAULT_MAX_EVENTS, DEFAULT_RETENTION_DAYS};

/// Bounds for the recent store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Event-count cap
    pub max_events: usize,
    /// Age cap - entries older than `now - retention` are evicted
    pub retention: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_events: DEFAULT_MAX_EVENTS,
            retention: Duration::days(DEFAULT_RETENTION_DAYS),
        }
    }
}

/// Count- and age-bounded buffer of recent alarm events, newest-first
///
/// Constructed once at process start and passed by `Arc` to the ingest
/// pipeline and to query handlers - there is no global instance.
#[derive(Debug)]
pub struct RecentStore {
    buf: RwLock<VecDeque<AlarmEvent>>,
    config: StoreConfig,
}

impl RecentStore {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            buf: RwLock::new(VecDeque::new()),
            config,
        }
    }

    /// Insert an event at the newest end, then enforce both caps
    ///
    /// Caps are enforced eagerly here, never lazily on query, so readers
    /// always see an already-bounded view. Rejects events whose timestamp
    /// is older than the current newest entry (see [`StoreError::NonMonotonic`]).
    pub fn append(&self, event: AlarmEvent) -> Result<()> {
        let mut buf = self.buf.write();

        if let Some(newest) = buf.front() {
            if event.timestamp < newest.timestamp {
                return Err(StoreError::NonMonotonic {
                    event: event.timestamp,
                    newest: newest.timestamp,
                });
            }
        }

        buf.push_front(event);

        while buf.len() > self.config.max_events {
            buf.pop_back();
        }
        let cutoff = Utc::now() - self.config.retention;
        while buf.back().is_some_and(|e| e.timestamp < cutoff) {
            buf.pop_back();
        }

        Ok(())
    }

    /// Events with `timestamp >= threshold`, newest-first
    ///
    /// Short-circuit scan: stops at the first entry older than the
    /// threshold. Correct because the buffer is sorted newest-first.
    pub fn since(&self, threshold: DateTime<Utc>) -> Vec<AlarmEvent> {
        let buf = self.buf.read();
        let mut out = Vec::new();
        for event in buf.iter() {
            if event.timestamp < threshold {
                break;
            }
            out.push(event.clone());
        }
        out
    }

    /// Aggregate the window ending now: total, by severity, by location
    pub fn summary(&self, window: Window) -> Summary {
        let threshold = Utc::now() - window.duration();
        let buf = self.buf.read();

        let mut total = 0u64;
        let mut by_severity = GroupCounts::new();
        let mut by_location = GroupCounts::new();

        for event in buf.iter() {
            if event.timestamp < threshold {
                break;
            }
            total += 1;
            by_severity.bump(event.level.as_str());
            by_location.bump(&event.location);
        }

        Summary {
            window: window.to_string(),
            total_active: total,
            by_severity,
            by_location,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.read().is_empty()
    }
}

impl Default for RecentStore {
    fn default() -> Self {
        Self::new()
    }
}
