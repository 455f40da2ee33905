//! Websocket bridge to the live hub
//!
//! Each connection gets its own hub subscription. Joining emits a join
//! notice, so the bootstrap listener replays recent history to this socket
//! before (or interleaved with) live traffic.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use serde_json::json;
use tracing::{debug, trace};

use klaxon_live::LiveMessage;

use crate::handlers::ApiState;

/// GET /ws/alarms
pub async fn alarm_stream(State(state): State<Arc<ApiState>>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| stream_alarms(socket, state))
}

async fn stream_alarms(mut socket: WebSocket, state: Arc<ApiState>) {
    let (id, mut messages) = state.hub.subscribe();
    debug!(subscriber = %id, "websocket attached");

    loop {
        tokio::select! {
            message = messages.recv() => {
                let Some(message) = message else { break };
                let frame = frame_json(&message).to_string();
                if socket.send(Message::Text(frame.into())).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    // Pings are answered by axum; other client frames are noise
                    Some(Ok(other)) => trace!(subscriber = %id, ?other, "ignoring client frame"),
                }
            }
        }
    }

    state.hub.unsubscribe(id);
    debug!(subscriber = %id, "websocket detached");
}

/// Encode a hub message as a tagged JSON frame
pub(crate) fn frame_json(message: &LiveMessage) -> serde_json::Value {
    match message {
        LiveMessage::Alarm(event) => json!({ "kind": "alarm", "event": &**event }),
        LiveMessage::Bootstrap(events) => json!({ "kind": "bootstrap", "events": events }),
    }
}
