//! JSON response helpers

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error response body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code
    pub error: String,

    /// Human-readable message
    pub message: String,
}

/// Outcome of a `POST /api/ingest` call
#[derive(Debug, Clone, Serialize)]
pub struct IngestResponse {
    /// "ingested" or "dropped"
    pub status: &'static str,

    /// Event id, absent when the payload was dropped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Live subscribers that received a copy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered: Option<usize>,

    /// Whether the durable write succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persisted: Option<bool>,
}

impl IngestResponse {
    pub fn dropped() -> Self {
        Self {
            status: "dropped",
            id: None,
            delivered: None,
            persisted: None,
        }
    }
}

/// Create error response
pub fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> Response {
    let response = ErrorResponse {
        error: error.into(),
        message: message.into(),
    };
    (status, Json(response)).into_response()
}
