//! Detection rule selection

use serde::{Deserialize, Serialize};

/// Which predicate decides whether a payload is alarm-like
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionRule {
    /// Suffix rule plus the `Value.Message` / `Value.Priority` fallback
    #[default]
    Lenient,
    /// Only payloads whose target or topic ends with `/Alarm` qualify
    StrictSuffix,
}
