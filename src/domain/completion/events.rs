use serde::Serialize;
use tokio::sync::broadcast;

pub const VIDEO_READY: &str = "video_ready";

/// A push notification relayed to every connected listener
#[derive(Debug, Clone, Serialize)]
pub struct VideoEvent {
    pub event: &'static str,
    pub data: serde_json::Value,
}

/// Process-wide publish/subscribe hub for webhook callbacks.
///
/// Fire-and-forget: events are not stored, so a listener that is not
/// subscribed when a callback arrives never sees it. Payloads are relayed
/// unmodified and not correlated with submitted jobs.
pub struct VideoEvents {
    sender: broadcast::Sender<VideoEvent>,
}

impl VideoEvents {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<VideoEvent> {
        self.sender.subscribe()
    }

    /// Broadcast a `video_ready` payload. Returns how many listeners received it.
    pub fn publish_video_ready(&self, payload: serde_json::Value) -> usize {
        let event = VideoEvent {
            event: VIDEO_READY,
            data: payload,
        };

        match self.sender.send(event) {
            Ok(listeners) => {
                tracing::info!(listeners = listeners, "Broadcast video_ready event");
                listeners
            }
            Err(_) => {
                tracing::debug!("No listeners connected, video_ready event dropped");
                0
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for VideoEvents {
    fn default() -> Self {
        Self::new(64)
    }
}
