//! The ingest pipeline

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace, warn};

use klaxon_classify::Classifier;
use klaxon_live::SubscriberId;
use klaxon_protocol::AlarmEvent;
use klaxon_storage::AlarmRepository;
use klaxon_store::RecentStore;

use crate::{BootstrapSource, Broadcast, EventSink, PipelineError, Result, DEFAULT_BOOTSTRAP_MINUTES};

/// What a durable-write failure means for the whole ingest call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Durability {
    /// Surface the failure to the caller (after the other destinations ran)
    Required,
    /// Log and carry on - liveness over audit trail
    #[default]
    BestEffort,
}

/// Result of ingesting one raw payload
#[derive(Debug)]
pub enum IngestOutcome {
    /// Not alarm-like; nothing was mutated
    Dropped,
    /// Classified and delivered
    Ingested {
        event: Arc<AlarmEvent>,
        /// Live subscribers that received a copy
        delivered: usize,
        /// Whether the durable write succeeded
        persisted: bool,
    },
}

/// Orchestrates classification and delivery to all destinations
///
/// Constructed once at startup via [`IngestPipeline::builder`] and shared
/// by `Arc`; every collaborator is injected, nothing is looked up globally.
pub struct IngestPipeline {
    classifier: Classifier,
    repository: Arc<dyn AlarmRepository>,
    store: Arc<RecentStore>,
    broadcast: Arc<dyn Broadcast>,
    sinks: Vec<Arc<dyn EventSink>>,
    durability: Durability,
    bootstrap_window: Duration,
    bootstrap_source: BootstrapSource,
}

impl IngestPipeline {
    pub fn builder(
        repository: Arc<dyn AlarmRepository>,
        store: Arc<RecentStore>,
        broadcast: Arc<dyn Broadcast>,
    ) -> PipelineBuilder {
        PipelineBuilder {
            classifier: Classifier::default(),
            repository,
            store,
            broadcast,
            sinks: Vec::new(),
            durability: Durability::default(),
            bootstrap_window: Duration::minutes(DEFAULT_BOOTSTRAP_MINUTES),
            bootstrap_source: BootstrapSource::default(),
        }
    }

    /// Ingest one raw payload from the feed
    ///
    /// Not-alarm-like payloads are dropped silently (trace-logged only).
    /// For alarms, the durable write, the recent store append, the live
    /// fan-out and the extra sinks are all attempted regardless of each
    /// other's outcome; only the durable write can fail the call, and only
    /// under [`Durability::Required`].
    pub async fn ingest_raw(&self, payload: &str, topic_hint: Option<&str>) -> Result<IngestOutcome> {
        if !self.classifier.is_alarm_like(payload, topic_hint) {
            trace!(topic = topic_hint.unwrap_or("-"), "payload not alarm-like, dropping");
            return Ok(IngestOutcome::Dropped);
        }

        let event = Arc::new(self.classifier.normalize(payload, topic_hint));
        debug!(id = %event.id, level = %event.level, kind = %event.kind, "alarm classified");

        let persisted = match self.repository.save(&event).await {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    id = %event.id,
                    error = %err,
                    transient = err.is_transient(),
                    "durable write failed"
                );
                if self.durability == Durability::Required {
                    // Still deliver to the in-memory and live paths first
                    self.deliver(&event).await;
                    return Err(PipelineError::Persistence(err));
                }
                false
            }
        };

        let delivered = self.deliver(&event).await;

        Ok(IngestOutcome::Ingested {
            event,
            delivered,
            persisted,
        })
    }

    /// Recent store, live fan-out and extra sinks - all best-effort
    async fn deliver(&self, event: &Arc<AlarmEvent>) -> usize {
        if let Err(err) = self.store.append((**event).clone()) {
            // Contract violation, not a user-facing error
            error!(id = %event.id, error = %err, "recent store rejected event");
        }

        let delivered = self.broadcast.publish(Arc::clone(event)).await;
        trace!(id = %event.id, delivered, "event fanned out");

        for sink in &self.sinks {
            if let Err(err) = sink.deliver(event).await {
                warn!(sink = sink.name(), id = %event.id, error = %err, "sink delivery failed");
            }
        }

        delivered
    }

    /// React to a new live observer joining the alarm topic
    ///
    /// Queries the configured source for the last bootstrap window of
    /// events and sends the batch privately to the joining subscriber -
    /// never to the topic, so existing observers see no duplicate history.
    /// Returns the batch size.
    pub async fn on_subscriber_joined(&self, subscriber: SubscriberId) -> Result<usize> {
        let since = Utc::now() - self.bootstrap_window;

        let events = match self.bootstrap_source {
            BootstrapSource::Durable => self.repository.find_since(since).await?,
            BootstrapSource::Recent => self.store.since(since),
        };

        let count = events.len();
        debug!(subscriber = %subscriber, count, "sending bootstrap batch");
        self.broadcast.send_bootstrap(subscriber, events).await?;
        Ok(count)
    }

    pub fn durability(&self) -> Durability {
        self.durability
    }
}

/// Builder for [`IngestPipeline`]
pub struct PipelineBuilder {
    classifier: Classifier,
    repository: Arc<dyn AlarmRepository>,
    store: Arc<RecentStore>,
    broadcast: Arc<dyn Broadcast>,
    sinks: Vec<Arc<dyn EventSink>>,
    durability: Durability,
    bootstrap_window: Duration,
    bootstrap_source: BootstrapSource,
}

impl PipelineBuilder {
    pub fn classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn durability(mut self, durability: Durability) -> Self {
        self.durability = durability;
        self
    }

    pub fn bootstrap_window(mut self, window: Duration) -> Self {
        self.bootstrap_window = window;
        self
    }

    pub fn bootstrap_source(mut self, source: BootstrapSource) -> Self {
        self.bootstrap_source = source;
        self
    }

    /// Add an extra delivery target to the fan-out set
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn build(self) -> IngestPipeline {
        IngestPipeline {
            classifier: self.classifier,
            repository: self.repository,
            store: self.store,
            broadcast: self.broadcast,
            sinks: self.sinks,
            durability: self.durability,
            bootstrap_window: self.bootstrap_window,
            bootstrap_source: self.bootstrap_source,
        }
    }
}

impl std::fmt::Debug for IngestPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestPipeline")
            .field("durability", &self.durability)
            .field("bootstrap_source", &self.bootstrap_source)
            .field("sink_count", &self.sinks.len())
            .finish()
    }
}
