//! Subscription bootstrap listener

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use klaxon_live::JoinNotice;

use crate::IngestPipeline;

/// Where the bootstrap batch is drawn from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BootstrapSource {
    /// The durable repository - authoritative
    #[default]
    Durable,
    /// The recent store - faster; complete as long as its retention
    /// exceeds the bootstrap window, which it does by default (35 days
    /// versus 10 minutes)
    Recent,
}

/// Consume join notices and replay recent history to each joiner
///
/// A failed bootstrap is logged and skipped; the listener keeps serving
/// subsequent joins. The task ends when the hub (join sender) is dropped.
pub fn spawn_bootstrap_listener(
    pipeline: Arc<IngestPipeline>,
    mut joins: mpsc::UnboundedReceiver<JoinNotice>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!("bootstrap listener started");
        while let Some(notice) = joins.recv().await {
            match pipeline.on_subscriber_joined(notice.subscriber).await {
                Ok(count) => {
                    debug!(subscriber = %notice.subscriber, count, "bootstrap batch delivered");
                }
                Err(err) => {
                    warn!(subscriber = %notice.subscriber, error = %err, "bootstrap failed");
                }
            }
        }
        debug!("bootstrap listener stopped");
    })
}
