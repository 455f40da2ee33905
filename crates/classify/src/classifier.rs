//! The alarm classifier/normalizer

use chrono::{DateTime, Utc};
use serde_json::Value;

use klaxon_protocol::{
    device_from_path, kind_from_path, normalize_path, short_from_path, AlarmEvent, Level,
};

use crate::DetectionRule;

/// Target/topic suffix that marks a payload as an alarm (compared
/// case-insensitively after path normalization)
const ALARM_SUFFIX: &str = "/ALARM";

/// Pure classifier over raw feed payloads
///
/// Both operations parse the payload independently; neither holds state,
/// so repeated calls with the same input are deterministic (modulo the
/// arrival timestamp stamped by `normalize`).
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rule: DetectionRule,
}

impl Classifier {
    pub fn new(rule: DetectionRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> DetectionRule {
        self.rule
    }

    /// Decide whether a raw payload represents an alarm
    ///
    /// Never fails: a payload that does not parse as JSON is simply not an
    /// alarm.
    pub fn is_alarm_like(&self, payload: &str, topic_hint: Option<&str>) -> bool {
        let root: Value = match serde_json::from_str(payload) {
            Ok(v) => v,
            Err(err) => {
                tracing::trace!(error = %err, "payload is not JSON, dropping");
                return false;
            }
        };

        let target = text(&root, "Target");
        let candidate = target.or_else(|| topic_hint.and_then(non_blank));
        if let Some(candidate) = candidate {
            if normalize_path(candidate)
                .to_uppercase()
                .ends_with(ALARM_SUFFIX)
            {
                return true;
            }
        }

        match self.rule {
            DetectionRule::StrictSuffix => false,
            DetectionRule::Lenient => {
                let value = root.get("Value").unwrap_or(&Value::Null);
                let has_message = text(value, "Message").is_some();
                let has_priority = value.get("Priority").is_some_and(Value::is_number);
                has_message || has_priority
            }
        }
    }

    /// Normalize a raw payload into a canonical event
    ///
    /// Infallible: on any parse or extraction error this returns the fixed
    /// fallback event instead. The timestamp is always the arrival instant,
    /// never a time found inside the payload.
    pub fn normalize(&self, payload: &str, topic_hint: Option<&str>) -> AlarmEvent {
        let now = Utc::now();
        match normalize_at(payload, topic_hint, now) {
            Some(event) => event,
            None => {
                tracing::debug!("unparseable payload, emitting fallback event");
                fallback_event(now)
            }
        }
    }
}

fn normalize_at(payload: &str, topic_hint: Option<&str>, now: DateTime<Utc>) -> Option<AlarmEvent> {
    let root: Value = serde_json::from_str(payload).ok()?;
    let value = root.get("Value").unwrap_or(&Value::Null);

    // Target: payload.Target > topic hint > placeholder
    let target = text(&root, "Target")
        .or_else(|| topic_hint.and_then(non_blank))
        .unwrap_or("UNKNOWN/Alarm");
    let target = normalize_path(target);

    // Location: TargetName > Location > device segment of the path
    let location = text(value, "TargetName")
        .or_else(|| text(value, "Location"))
        .or_else(|| device_from_path(&target))
        .unwrap_or("Unknown")
        .to_string();

    // Kind: path segment before "Alarm" > Message > TagInfo > ValueType
    let kind = kind_from_path(&target)
        .or_else(|| text(value, "Message"))
        .or_else(|| text(&root, "TagInfo"))
        .or_else(|| text(&root, "ValueType"))
        .unwrap_or("GENERIC")
        .to_string();

    let message = text(value, "Message")
        .map(str::to_string)
        .unwrap_or_else(|| short_from_path(&target));

    let priority = numeric(value.get("Priority")).unwrap_or(0);

    Some(AlarmEvent {
        id: AlarmEvent::derive_id(&target, now),
        level: Level::from_priority(priority),
        kind,
        location,
        message,
        timestamp: now,
    })
}

/// The deterministic degraded event for unparseable payloads
fn fallback_event(now: DateTime<Utc>) -> AlarmEvent {
    AlarmEvent {
        id: format!("fallback@{}", now.timestamp_millis()),
        level: Level::Info,
        kind: "RAW".to_string(),
        location: "Unknown".to_string(),
        message: "Unparseable payload".to_string(),
        timestamp: now,
    }
}

/// Non-blank string field of a JSON node
fn text<'a>(node: &'a Value, field: &str) -> Option<&'a str> {
    node.get(field).and_then(Value::as_str).and_then(non_blank)
}

fn non_blank(s: &str) -> Option<&str> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Numeric value, tolerating both integer and float encodings
fn numeric(node: Option<&Value>) -> Option<i64> {
    let node = node?;
    node.as_i64().or_else(|| node.as_f64().map(|f| f as i64))
}
