//! HTTP route handlers

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use klaxon_live::LiveHub;
use klaxon_pipeline::{IngestOutcome, IngestPipeline};
use klaxon_protocol::{AlarmEvent, AlarmRow, DEFAULT_RECENT_LIMIT, MAX_RECENT_LIMIT};
use klaxon_storage::AlarmRepository;
use klaxon_store::{RecentStore, Window};

use crate::response::{error_response, IngestResponse};

/// Shared state for handlers
pub struct ApiState {
    pub pipeline: Arc<IngestPipeline>,
    pub store: Arc<RecentStore>,
    pub repository: Arc<dyn AlarmRepository>,
    pub hub: Arc<LiveHub>,
}

/// GET /health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
pub struct RecentParams {
    /// Inclusive lower bound; takes precedence over `limit`
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

/// GET /api/alarms/recent - newest-first alarm history
///
/// With `since`, serves full events from the in-memory store. Otherwise
/// serves up to `limit` rows from the durable repository, clamped to
/// [1, 2000] with a default of 200.
pub async fn recent_alarms(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<RecentParams>,
) -> Response {
    if let Some(since) = params.since {
        return Json(state.store.since(since)).into_response();
    }

    let limit = params
        .limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT);

    match state.repository.recent(limit).await {
        Ok(events) => {
            let rows: Vec<AlarmRow> = events.iter().map(AlarmRow::from_event).collect();
            Json(rows).into_response()
        }
        Err(err) => {
            warn!(error = %err, "recent query failed");
            error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "storage_unavailable",
                err.to_string(),
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    /// ISO-8601 duration, e.g. "PT10M"
    pub window: Option<String>,
}

/// GET /api/alarms/summary - windowed aggregate over recent events
pub async fn alarm_summary(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<SummaryParams>,
) -> Response {
    let window = match params.window.as_deref() {
        Some(raw) => match raw.parse::<Window>() {
            Ok(window) => window,
            Err(err) => {
                return error_response(StatusCode::BAD_REQUEST, "invalid_window", err.to_string());
            }
        },
        None => Window::minutes(10),
    };

    Json(state.store.summary(window)).into_response()
}

#[derive(Debug, Deserialize)]
pub struct IngestParams {
    /// Origin hint used as a target fallback during classification
    pub topic: Option<String>,
}

/// POST /api/ingest - ingest one raw feed payload
///
/// Always 202 for handled payloads, whether ingested or dropped. A durable
/// write failure surfaces as 503 only when the pipeline runs with required
/// durability; the event has already reached the live paths by then.
pub async fn ingest_payload(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<IngestParams>,
    body: String,
) -> Response {
    match state.pipeline.ingest_raw(&body, params.topic.as_deref()).await {
        Ok(IngestOutcome::Dropped) => {
            (StatusCode::ACCEPTED, Json(IngestResponse::dropped())).into_response()
        }
        Ok(IngestOutcome::Ingested {
            event,
            delivered,
            persisted,
        }) => {
            let response = IngestResponse {
                status: "ingested",
                id: Some(event.id.clone()),
                delivered: Some(delivered),
                persisted: Some(persisted),
            };
            (StatusCode::ACCEPTED, Json(response)).into_response()
        }
        Err(err) => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "persistence_failed",
            err.to_string(),
        ),
    }
}

/// POST /api/dev/emit - publish an event straight to the live hub
///
/// Development aid: bypasses classification and persistence entirely.
pub async fn dev_emit(
    State(state): State<Arc<ApiState>>,
    Json(event): Json<AlarmEvent>,
) -> Response {
    let delivered = state.hub.publish(Arc::new(event));
    (
        StatusCode::ACCEPTED,
        Json(json!({ "status": "emitted", "delivered": delivered })),
    )
        .into_response()
}
