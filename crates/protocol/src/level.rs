//! Alarm severity levels
//!
//! Severity is derived from the numeric `Value.Priority` field of the feed
//! payload via fixed thresholds. The wire representation is the upper-case
//! level name, matching what live dashboards consume.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of an alarm occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// Priority 8 and above
    Critical,
    /// Priority 4 to 7
    Warn,
    /// Everything else, including payloads without a priority
    Info,
}

impl Level {
    /// Map a feed priority to a severity level
    ///
    /// Thresholds: `>= 8` is critical, `>= 4` is warn, the rest is info.
    pub fn from_priority(priority: i64) -> Self {
        if priority >= 8 {
            Level::Critical
        } else if priority >= 4 {
            Level::Warn
        } else {
            Level::Info
        }
    }

    /// Upper-case name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Critical => "CRITICAL",
            Level::Warn => "WARN",
            Level::Info => "INFO",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
