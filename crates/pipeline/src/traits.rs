//! Boundary traits at the pipeline's seams
//!
//! The broadcast transport and any extra delivery targets are external
//! collaborators. The pipeline only sees these traits; `LiveHub` is the
//! in-process implementation.

use std::sync::Arc;

use async_trait::async_trait;

use klaxon_live::{LiveHub, LiveMessage, SubscriberId};
use klaxon_protocol::AlarmEvent;

use crate::{PipelineError, Result};

/// Publish/subscribe transport for live observers
#[async_trait]
pub trait Broadcast: Send + Sync {
    /// Fan an event out to all current subscribers of the alarm topic
    ///
    /// Best-effort: returns the delivered count, never fails.
    async fn publish(&self, event: Arc<AlarmEvent>) -> usize;

    /// Deliver a bootstrap batch privately to one subscriber
    async fn send_bootstrap(&self, subscriber: SubscriberId, events: Vec<AlarmEvent>)
        -> Result<()>;
}

#[async_trait]
impl Broadcast for LiveHub {
    async fn publish(&self, event: Arc<AlarmEvent>) -> usize {
        LiveHub::publish(self, event)
    }

    async fn send_bootstrap(
        &self,
        subscriber: SubscriberId,
        events: Vec<AlarmEvent>,
    ) -> Result<()> {
        self.send_to(subscriber, LiveMessage::Bootstrap(events))
            .await
            .map_err(|err| PipelineError::Broadcast(err.to_string()))
    }
}

/// An additional delivery target invoked after successful classification
///
/// The fan-out set is declared explicitly on the builder - zero or more
/// sinks, no optional hooks. Sink failures are logged and isolated.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Short name for diagnostics
    fn name(&self) -> &'static str;

    /// Deliver one event
    async fn deliver(&self, event: &AlarmEvent) -> Result<()>;
}
