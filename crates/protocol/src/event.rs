//! The canonical alarm event

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::Level;

/// One normalized alarm occurrence
///
/// Wire shape (JSON):
/// `{id, level, type, location, message, timestamp}` with an RFC 3339
/// timestamp. The Rust field is `kind` because `type` is reserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmEvent {
    /// Unique occurrence id: `target + "@" + timestamp`
    pub id: String,
    /// Severity derived from the feed priority
    pub level: Level,
    /// Category, usually the alarm point from the target path
    #[serde(rename = "type")]
    pub kind: String,
    /// Best-effort physical location ("Unknown" when underivable)
    pub location: String,
    /// Free-text description; may be empty
    pub message: String,
    /// Arrival instant - when the relay classified the payload
    ///
    /// This is the sole ordering key. Timestamps embedded in the payload are
    /// deliberately ignored.
    pub timestamp: DateTime<Utc>,
}

impl AlarmEvent {
    /// Derive the occurrence id from a target path and arrival instant
    ///
    /// A blank target substitutes `"alarm"` so the id is never degenerate.
    /// Deterministic: re-deriving from stored fields reproduces the same id.
    pub fn derive_id(target: &str, timestamp: DateTime<Utc>) -> String {
        let target = if target.trim().is_empty() {
            "alarm"
        } else {
            target
        };
        format!(
            "{}@{}",
            target,
            timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }

    /// The target path this event was derived from (the id prefix)
    pub fn target(&self) -> &str {
        self.id.split('@').next().unwrap_or("")
    }
}
