//! Windowed aggregate over recent events

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Derived aggregate over a time window - computed on demand, never stored
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The supplied window, echoed in canonical ISO-8601 form
    pub window: String,
    /// Events inside the window
    pub total_active: u64,
    /// Count per severity level
    pub by_severity: GroupCounts,
    /// Count per location
    pub by_location: GroupCounts,
}

/// Counter map preserving first-seen key order
///
/// The order is not load-bearing, it just keeps summary output stable for
/// tests and for humans diffing responses. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupCounts {
    entries: Vec<(String, u64)>,
}

impl GroupCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count for a key, registering it on first sight
    pub fn bump(&mut self, key: &str) {
        if let Some((_, count)) = self.entries.iter_mut().find(|(k, _)| k == key) {
            *count += 1;
        } else {
            self.entries.push((key.to_string(), 1));
        }
    }

    pub fn get(&self, key: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(k, count)| (k.as_str(), *count))
    }
}

impl Serialize for GroupCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}
