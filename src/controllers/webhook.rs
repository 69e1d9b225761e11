use axum::{
    body::Bytes,
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    Json,
};
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::{
    domain::completion::{VideoEvent, VideoEvents},
    error::{AppError, AppResult},
};

pub struct WebhookController {
    events: Arc<VideoEvents>,
}

impl WebhookController {
    pub fn new(events: Arc<VideoEvents>) -> Self {
        Self { events }
    }

    /// POST /api/webhook - Provider callback, relayed as `video_ready`
    pub async fn receive(
        State(controller): State<Arc<WebhookController>>,
        body: Bytes,
    ) -> AppResult<Json<Value>> {
        let payload: Value = serde_json::from_slice(&body).map_err(|e| {
            AppError::BadRequest(format!("Webhook processing failed: {}", e))
        })?;

        let talk_id = payload.get("id").and_then(|v| v.as_str()).unwrap_or("unknown");
        let status = payload.get("status").and_then(|v| v.as_str()).unwrap_or("unknown");
        tracing::info!(talk_id = talk_id, status = status, "Webhook received");

        controller.events.publish_video_ready(payload);

        Ok(Json(json!({ "status": "received" })))
    }

    /// GET /api/events - WebSocket stream of `video_ready` events
    pub async fn subscribe(
        ws: WebSocketUpgrade,
        State(controller): State<Arc<WebhookController>>,
    ) -> Response {
        let receiver = controller.events.subscribe();
        ws.on_upgrade(move |socket| stream_events(socket, receiver))
    }
}

async fn stream_events(socket: WebSocket, mut events: broadcast::Receiver<VideoEvent>) {
    let (mut sender, mut incoming) = socket.split();
    tracing::debug!("Event listener connected");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let text = match serde_json::to_string(&event) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to serialize event");
                            continue;
                        }
                    };
                    if sender.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped = skipped, "Event listener lagged, events dropped");
                }
                Err(RecvError::Closed) => break,
            },
            message = incoming.next() => match message {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    tracing::debug!("Event listener disconnected");
}
