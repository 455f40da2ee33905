//! The broadcast hub

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use klaxon_protocol::AlarmEvent;

use crate::{JoinNotice, LiveError, LiveMessage, Result, CHANNEL_BUFFER_SIZE};

/// Counter for generating unique subscriber ids
static SUBSCRIBER_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identifies one connected live observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl SubscriberId {
    fn next() -> Self {
        Self(SUBSCRIBER_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub:{}", self.0)
    }
}

#[derive(Debug)]
struct Subscriber {
    id: SubscriberId,
    sender: mpsc::Sender<LiveMessage>,
}

/// In-process publish/subscribe hub for live alarm delivery
#[derive(Debug)]
pub struct LiveHub {
    subscribers: RwLock<Vec<Arc<Subscriber>>>,
    /// Quick check flag for the publish hot path
    has_subscribers: AtomicBool,
    join_tx: mpsc::UnboundedSender<JoinNotice>,
    /// Held until the bootstrap listener claims it
    join_rx: Mutex<Option<mpsc::UnboundedReceiver<JoinNotice>>>,
}

impl LiveHub {
    pub fn new() -> Self {
        let (join_tx, join_rx) = mpsc::unbounded_channel();
        Self {
            subscribers: RwLock::new(Vec::new()),
            has_subscribers: AtomicBool::new(false),
            join_tx,
            join_rx: Mutex::new(Some(join_rx)),
        }
    }

    /// Register a new live observer
    ///
    /// Returns the subscriber id and the message channel. A join notice is
    /// emitted so the bootstrap listener can replay recent history to this
    /// subscriber (and only this subscriber).
    pub fn subscribe(&self) -> (SubscriberId, mpsc::Receiver<LiveMessage>) {
        let (sender, receiver) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let subscriber = Arc::new(Subscriber {
            id: SubscriberId::next(),
            sender,
        });
        let id = subscriber.id;

        self.subscribers.write().push(subscriber);
        self.has_subscribers.store(true, Ordering::Relaxed);

        debug!(subscriber = %id, "live subscriber joined");
        // Nobody listening for joins is fine (e.g. bootstrap disabled)
        let _ = self.join_tx.send(JoinNotice { subscriber: id });

        (id, receiver)
    }

    /// Remove a subscriber
    pub fn unsubscribe(&self, id: SubscriberId) {
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|s| s.id != id);
        if subscribers.is_empty() {
            self.has_subscribers.store(false, Ordering::Relaxed);
        }
        debug!(subscriber = %id, "live subscriber removed");
    }

    /// Take the join-notice receiver (once)
    ///
    /// The bootstrap listener claims this at startup; subsequent calls
    /// return `None`.
    pub fn join_notices(&self) -> Option<mpsc::UnboundedReceiver<JoinNotice>> {
        self.join_rx.lock().take()
    }

    /// Fan an event out to every connected subscriber
    ///
    /// Non-blocking: a full or closed channel drops that subscriber's copy
    /// without affecting the others. Returns the delivered count.
    pub fn publish(&self, event: Arc<AlarmEvent>) -> usize {
        // Fast path: no subscribers = no work
        if !self.has_subscribers.load(Ordering::Relaxed) {
            return 0;
        }

        let subscribers = self.subscribers.read();
        let mut delivered = 0;
        for subscriber in subscribers.iter() {
            match subscriber
                .sender
                .try_send(LiveMessage::Alarm(Arc::clone(&event)))
            {
                Ok(()) => delivered += 1,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    trace!(subscriber = %subscriber.id, "subscriber channel full, dropping event copy");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    trace!(subscriber = %subscriber.id, "subscriber gone, dropping event copy");
                }
            }
        }
        delivered
    }

    /// Deliver a message privately to exactly one subscriber
    ///
    /// Waits for channel capacity - bootstrap batches are not droppable the
    /// way fan-out copies are.
    pub async fn send_to(&self, id: SubscriberId, message: LiveMessage) -> Result<()> {
        // Clone the sender out so the lock is not held across the await
        let sender = {
            let subscribers = self.subscribers.read();
            subscribers
                .iter()
                .find(|s| s.id == id)
                .map(|s| s.sender.clone())
        };

        let sender = sender.ok_or(LiveError::UnknownSubscriber(id))?;
        sender
            .send(message)
            .await
            .map_err(|_| LiveError::Disconnected(id))
    }

    /// Drop subscribers whose receivers are gone
    pub fn cleanup(&self) -> usize {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|s| !s.sender.is_closed());
        let removed = before - subscribers.len();

        if removed > 0 {
            debug!(removed, "cleaned up disconnected subscribers");
            if subscribers.is_empty() {
                self.has_subscribers.store(false, Ordering::Relaxed);
            }
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    #[inline]
    pub fn has_subscribers(&self) -> bool {
        self.has_subscribers.load(Ordering::Relaxed)
    }
}

impl Default for LiveHub {
    fn default() -> Self {
        Self::new()
    }
}
