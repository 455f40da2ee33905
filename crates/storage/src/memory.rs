//! In-memory repository for the dev profile and tests

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use klaxon_protocol::AlarmEvent;

use crate::{AlarmRepository, Result, StorageError};

/// Id-keyed, arrival-ordered in-process store
///
/// Appends keep arrival order; queries scan backwards so results come out
/// newest-first without sorting.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    events: Vec<AlarmEvent>,
    ids: HashSet<String>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().events.is_empty()
    }
}

#[async_trait]
impl AlarmRepository for MemoryRepository {
    async fn save(&self, event: &AlarmEvent) -> Result<()> {
        let mut inner = self.inner.write();
        if !inner.ids.insert(event.id.clone()) {
            return Err(StorageError::integrity(&event.id));
        }
        inner.events.push(event.clone());
        Ok(())
    }

    async fn find_since(&self, since: DateTime<Utc>) -> Result<Vec<AlarmEvent>> {
        let inner = self.inner.read();
        Ok(inner
            .events
            .iter()
            .rev()
            .filter(|e| e.timestamp >= since)
            .cloned()
            .collect())
    }

    async fn find_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<AlarmEvent>> {
        let inner = self.inner.read();
        Ok(inner
            .events
            .iter()
            .rev()
            .filter(|e| e.timestamp >= from && e.timestamp <= to)
            .cloned()
            .collect())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<AlarmEvent>> {
        let inner = self.inner.read();
        Ok(inner.events.iter().rev().take(limit).cloned().collect())
    }
}
