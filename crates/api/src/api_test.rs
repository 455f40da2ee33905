//! HTTP surface tests

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use tower::ServiceExt;

use klaxon_live::{LiveHub, LiveMessage};
use klaxon_pipeline::IngestPipeline;
use klaxon_protocol::{AlarmEvent, Level};
use klaxon_storage::MemoryRepository;
use klaxon_store::RecentStore;

use super::handlers::ApiState;
use super::ws::frame_json;
use super::*;

fn test_state() -> Arc<ApiState> {
    let repository = Arc::new(MemoryRepository::new());
    let store = Arc::new(RecentStore::new());
    let hub = Arc::new(LiveHub::new());

    let pipeline = Arc::new(
        IngestPipeline::builder(
            Arc::clone(&repository) as Arc<dyn klaxon_storage::AlarmRepository>,
            Arc::clone(&store),
            Arc::clone(&hub) as Arc<dyn klaxon_pipeline::Broadcast>,
        )
        .build(),
    );

    Arc::new(ApiState {
        pipeline,
        store,
        repository,
        hub,
    })
}

fn alarm_payload(target: &str, priority: i64, message: &str) -> String {
    format!(
        r#"{{"Target":"{}","Value":{{"Message":"{}","Priority":{},"TargetName":"Pump Room"}}}}"#,
        target, message, priority
    )
}

async fn post_ingest(state: &Arc<ApiState>, payload: String) -> StatusCode {
    let app = build_router(Arc::clone(state));
    let request = Request::builder()
        .method("POST")
        .uri("/api/ingest")
        .body(Body::from(payload))
        .unwrap();
    app.oneshot(request).await.unwrap().status()
}

async fn get_json(state: &Arc<ApiState>, uri: &str) -> (StatusCode, serde_json::Value) {
    let app = build_router(Arc::clone(state));
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

// =============================================================================
// Health Check Tests
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let (status, json) = get_json(&test_state(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

// =============================================================================
// Ingestion Tests
// =============================================================================

#[tokio::test]
async fn test_ingest_alarm_payload() {
    let state = test_state();
    let app = build_router(Arc::clone(&state));

    let request = Request::builder()
        .method("POST")
        .uri("/api/ingest")
        .body(Body::from(alarm_payload("FACTORY/PUMP/STATION7/ALARM", 9, "overheat")))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let body = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "ingested");
    assert!(json["id"].as_str().unwrap().starts_with("FACTORY/PUMP/STATION7/ALARM@"));
    assert_eq!(json["persisted"], true);
    assert_eq!(json["delivered"], 0);

    // Landed in both the durable repository and the recent store
    assert_eq!(state.repository.recent(10).await.unwrap().len(), 1);
    assert_eq!(state.store.len(), 1);
}

#[tokio::test]
async fn test_ingest_non_alarm_is_dropped() {
    let state = test_state();
    let app = build_router(Arc::clone(&state));

    let request = Request::builder()
        .method("POST")
        .uri("/api/ingest")
        .body(Body::from(r#"{"Target":"FACTORY/PUMP/Status"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let body = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "dropped");
    assert!(json.get("id").is_none());
    assert!(state.store.is_empty());
}

#[tokio::test]
async fn test_ingest_topic_hint_query_param() {
    let state = test_state();
    let app = build_router(Arc::clone(&state));

    // Payload has no Target; the topic query parameter supplies it
    let request = Request::builder()
        .method("POST")
        .uri("/api/ingest?topic=PLANT/BOILER/TEMP/ALARM")
        .body(Body::from(r#"{"Value":{"Message":"too hot","Priority":5}}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let body = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "ingested");
    assert!(json["id"].as_str().unwrap().starts_with("PLANT/BOILER/TEMP/ALARM@"));
}

// =============================================================================
// Recent Query Tests
// =============================================================================

#[tokio::test]
async fn test_recent_returns_rows_newest_first() {
    let state = test_state();
    let _ = post_ingest(&state, alarm_payload("F/SYS/DEV/A/ALARM", 2, "first")).await;
    let _ = post_ingest(&state, alarm_payload("F/SYS/DEV/B/ALARM", 9, "second")).await;

    let (status, json) = get_json(&state, "/api/alarms/recent").await;

    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["message"], "second");
    assert_eq!(rows[0]["level"], "CRITICAL");
    assert_eq!(rows[1]["message"], "first");
    assert_eq!(rows[1]["level"], "INFO");

    // Path columns come from the blank-filtered target segments
    assert_eq!(rows[0]["system"], "SYS");
    assert_eq!(rows[0]["device"], "DEV");
    assert_eq!(rows[0]["point"], "B");
}

#[tokio::test]
async fn test_recent_limit_is_clamped() {
    let state = test_state();
    for i in 0..3 {
        let _ = post_ingest(&state, alarm_payload("F/S/D/P/ALARM", 5, &format!("m{i}"))).await;
    }

    // limit=0 clamps up to 1
    let (status, json) = get_json(&state, "/api/alarms/recent?limit=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 1);

    // oversized limit is tolerated
    let (status, json) = get_json(&state, "/api/alarms/recent?limit=999999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_recent_since_serves_events_from_store() {
    let state = test_state();
    let before = Utc::now() - chrono::Duration::seconds(5);
    let _ = post_ingest(&state, alarm_payload("F/S/D/P/ALARM", 9, "boom")).await;

    let uri = format!(
        "/api/alarms/recent?since={}",
        before.to_rfc3339().replace('+', "%2B")
    );
    let (status, json) = get_json(&state, &uri).await;

    assert_eq!(status, StatusCode::OK);
    let events = json.as_array().unwrap();
    assert_eq!(events.len(), 1);
    // Full event shape, not the flattened row
    assert_eq!(events[0]["type"], "P");
    assert_eq!(events[0]["level"], "CRITICAL");
    assert_eq!(events[0]["message"], "boom");
}

#[tokio::test]
async fn test_recent_since_in_future_is_empty() {
    let state = test_state();
    let _ = post_ingest(&state, alarm_payload("F/S/D/P/ALARM", 9, "boom")).await;

    let uri = format!(
        "/api/alarms/recent?since={}",
        (Utc::now() + chrono::Duration::hours(1))
            .to_rfc3339()
            .replace('+', "%2B")
    );
    let (status, json) = get_json(&state, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json.as_array().unwrap().is_empty());
}

// =============================================================================
// Summary Tests
// =============================================================================

#[tokio::test]
async fn test_summary_default_window() {
    let state = test_state();
    let _ = post_ingest(&state, alarm_payload("F/S/D/P/ALARM", 9, "a")).await;
    let _ = post_ingest(&state, alarm_payload("F/S/D/P/ALARM", 2, "b")).await;

    let (status, json) = get_json(&state, "/api/alarms/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["window"], "PT10M");
    assert_eq!(json["totalActive"], 2);
    assert_eq!(json["bySeverity"]["CRITICAL"], 1);
    assert_eq!(json["bySeverity"]["INFO"], 1);
}

#[tokio::test]
async fn test_summary_custom_window_echoed_canonically() {
    let (status, json) = get_json(&test_state(), "/api/alarms/summary?window=PT1H30M").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["window"], "PT1H30M");
    assert_eq!(json["totalActive"], 0);
}

#[tokio::test]
async fn test_summary_malformed_window_is_rejected() {
    let (status, json) = get_json(&test_state(), "/api/alarms/summary?window=10minutes").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_window");
}

// =============================================================================
// Dev Emit Tests
// =============================================================================

#[tokio::test]
async fn test_dev_emit_publishes_to_hub() {
    let state = test_state();
    let (_id, mut rx) = state.hub.subscribe();

    let event = AlarmEvent {
        id: "F/S/D/P/ALARM@2026-01-05T10:00:00.000Z".to_string(),
        level: Level::Warn,
        kind: "P".to_string(),
        location: "D".to_string(),
        message: "synthetic".to_string(),
        timestamp: Utc::now(),
    };

    let app = build_router(Arc::clone(&state));
    let request = Request::builder()
        .method("POST")
        .uri("/api/dev/emit")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&event).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let body = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["delivered"], 1);

    match rx.try_recv().unwrap() {
        LiveMessage::Alarm(received) => assert_eq!(received.message, "synthetic"),
        other => panic!("expected alarm message, got {:?}", other),
    }

    // Nothing persisted on the dev path
    assert!(state.store.is_empty());
}

#[tokio::test]
async fn test_dev_emit_rejects_malformed_event() {
    let state = test_state();
    let app = build_router(state);

    let request = Request::builder()
        .method("POST")
        .uri("/api/dev/emit")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"id":"x"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// =============================================================================
// Websocket Frame Tests
// =============================================================================

#[test]
fn test_alarm_frame_shape() {
    let event = AlarmEvent {
        id: "F/S/D/P/ALARM@2026-01-05T10:00:00.000Z".to_string(),
        level: Level::Critical,
        kind: "P".to_string(),
        location: "D".to_string(),
        message: "boom".to_string(),
        timestamp: Utc::now(),
    };

    let frame = frame_json(&LiveMessage::Alarm(Arc::new(event)));
    assert_eq!(frame["kind"], "alarm");
    assert_eq!(frame["event"]["level"], "CRITICAL");
    assert_eq!(frame["event"]["type"], "P");
}

#[test]
fn test_bootstrap_frame_shape() {
    let frame = frame_json(&LiveMessage::Bootstrap(Vec::new()));
    assert_eq!(frame["kind"], "bootstrap");
    assert!(frame["events"].as_array().unwrap().is_empty());
}
