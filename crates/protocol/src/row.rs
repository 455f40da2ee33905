//! Flattened read-model row for tabular queries
//!
//! The "recent N" query returns rows rather than raw events: the target
//! path is split into system/device/point columns so table views need no
//! client-side parsing.

use serde::{Deserialize, Serialize};

use crate::{normalize_path, AlarmEvent};

/// One row of the recent-alarms table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmRow {
    pub id: String,
    pub system: String,
    pub device: String,
    pub point: String,
    pub location: String,
    pub level: String,
    pub message: String,
    pub created_at: String,
}

impl AlarmRow {
    /// Flatten an event into a table row
    ///
    /// Blank path segments are dropped before indexing; targets start with
    /// a root segment, so system/device/point sit at indices 1/2/3 (the
    /// point column falls back to the device segment for short paths).
    pub fn from_event(event: &AlarmEvent) -> Self {
        let target = normalize_path(event.target());
        let parts: Vec<&str> = target.split('/').filter(|s| !s.trim().is_empty()).collect();

        let seg = |i: usize| parts.get(i).copied().unwrap_or("").to_string();
        let point = if parts.len() >= 4 {
            seg(3)
        } else {
            seg(2)
        };

        Self {
            id: event.id.clone(),
            system: seg(1),
            device: seg(2),
            point,
            location: event.location.clone(),
            level: event.level.to_string(),
            message: event.message.clone(),
            created_at: event.timestamp.to_rfc3339(),
        }
    }
}
