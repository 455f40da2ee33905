//! Messages delivered to live subscribers

use std::sync::Arc;

use klaxon_protocol::AlarmEvent;

use crate::SubscriberId;

/// One message on a subscriber's channel
#[derive(Debug, Clone)]
pub enum LiveMessage {
    /// A freshly ingested event, fanned out to everyone
    Alarm(Arc<AlarmEvent>),
    /// Recent history replayed privately to one late joiner
    Bootstrap(Vec<AlarmEvent>),
}

/// Emitted on the hub's join channel when a subscriber connects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinNotice {
    pub subscriber: SubscriberId,
}
