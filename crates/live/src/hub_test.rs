//! Tests for the live hub

use std::sync::Arc;

use chrono::Utc;

use klaxon_protocol::{AlarmEvent, Level};

use crate::{LiveError, LiveHub, LiveMessage};

fn sample_event(message: &str) -> Arc<AlarmEvent> {
    let ts = Utc::now();
    Arc::new(AlarmEvent {
        id: AlarmEvent::derive_id("SYS/DEV/Alarm", ts),
        level: Level::Warn,
        kind: "DEV".to_string(),
        location: "Unknown".to_string(),
        message: message.to_string(),
        timestamp: ts,
    })
}

#[tokio::test]
async fn test_publish_reaches_all_subscribers() {
    let hub = LiveHub::new();
    let (_, mut rx_a) = hub.subscribe();
    let (_, mut rx_b) = hub.subscribe();

    let delivered = hub.publish(sample_event("overheat"));
    assert_eq!(delivered, 2);

    for rx in [&mut rx_a, &mut rx_b] {
        match rx.recv().await.unwrap() {
            LiveMessage::Alarm(event) => assert_eq!(event.message, "overheat"),
            other => panic!("expected alarm, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_publish_without_subscribers_is_noop() {
    let hub = LiveHub::new();
    assert!(!hub.has_subscribers());
    assert_eq!(hub.publish(sample_event("x")), 0);
}

#[tokio::test]
async fn test_send_to_targets_one_subscriber() {
    let hub = LiveHub::new();
    let (id_a, mut rx_a) = hub.subscribe();
    let (_, mut rx_b) = hub.subscribe();

    hub.send_to(id_a, LiveMessage::Bootstrap(vec![]))
        .await
        .unwrap();

    assert!(matches!(
        rx_a.recv().await.unwrap(),
        LiveMessage::Bootstrap(_)
    ));
    // The other subscriber got nothing
    assert!(rx_b.try_recv().is_err());
}

#[tokio::test]
async fn test_send_to_unknown_subscriber() {
    let hub = LiveHub::new();
    let (id, rx) = hub.subscribe();
    drop(rx);
    hub.unsubscribe(id);

    let err = hub.send_to(id, LiveMessage::Bootstrap(vec![])).await;
    assert!(matches!(err, Err(LiveError::UnknownSubscriber(_))));
}

#[tokio::test]
async fn test_join_notice_emitted_on_subscribe() {
    let hub = LiveHub::new();
    let mut joins = hub.join_notices().expect("first take");
    assert!(hub.join_notices().is_none(), "receiver is claimed once");

    let (id, _rx) = hub.subscribe();
    let notice = joins.recv().await.unwrap();
    assert_eq!(notice.subscriber, id);
}

#[tokio::test]
async fn test_slow_subscriber_does_not_block_others() {
    let hub = LiveHub::new();
    let (_, mut rx_ok) = hub.subscribe();
    let (_, rx_slow) = hub.subscribe();

    // Fill the slow subscriber's channel
    for _ in 0..crate::CHANNEL_BUFFER_SIZE {
        hub.publish(sample_event("fill"));
        rx_ok.try_recv().unwrap();
    }

    // The healthy subscriber still gets its copy
    let delivered = hub.publish(sample_event("after"));
    assert_eq!(delivered, 1);
    assert!(matches!(
        rx_ok.try_recv().unwrap(),
        LiveMessage::Alarm(_)
    ));

    drop(rx_slow);
}

#[tokio::test]
async fn test_cleanup_drops_disconnected() {
    let hub = LiveHub::new();
    let (_, rx_a) = hub.subscribe();
    let (_, _rx_b) = hub.subscribe();
    assert_eq!(hub.subscriber_count(), 2);

    drop(rx_a);
    assert_eq!(hub.cleanup(), 1);
    assert_eq!(hub.subscriber_count(), 1);
    assert!(hub.has_subscribers());
}
