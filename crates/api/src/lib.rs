//! HTTP and websocket surface
//!
//! Read-side queries, a feed-ingress endpoint and the live alarm stream.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/alarms/recent` - Recent alarms (`?limit=N` or `?since=<RFC3339>`)
//! - `GET /api/alarms/summary` - Windowed aggregate (`?window=PT10M`)
//! - `POST /api/ingest` - Raw feed payload ingestion (`?topic=<hint>`)
//! - `POST /api/dev/emit` - Publish an event straight to the live hub
//! - `GET /ws/alarms` - Websocket stream of live alarms with bootstrap replay
//!
//! # Example
//!
//! ```ignore
//! use klaxon_api::{build_router, ApiState};
//!
//! let state = Arc::new(ApiState { pipeline, store, repository, hub });
//! let app = build_router(state);
//! axum::serve(listener, app).await?;
//! ```

mod handlers;
mod response;
mod ws;

#[cfg(test)]
mod api_test;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

pub use handlers::ApiState;

use handlers::{alarm_summary, dev_emit, health_check, ingest_payload, recent_alarms};
use ws::alarm_stream;

/// Build the axum router
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/alarms/recent", get(recent_alarms))
        .route("/api/alarms/summary", get(alarm_summary))
        .route("/api/ingest", post(ingest_payload))
        .route("/api/dev/emit", post(dev_emit))
        .route("/ws/alarms", get(alarm_stream))
        .with_state(state)
}
