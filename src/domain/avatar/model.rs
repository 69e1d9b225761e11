use serde::{Deserialize, Serialize};

/// Lifecycle of a remote talk, normalized from the provider's status strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TalkStatus {
    Created,
    Processing,
    Done,
    Failed,
}

impl From<String> for TalkStatus {
    fn from(raw: String) -> Self {
        TalkStatus::from(raw.as_str())
    }
}

impl From<&str> for TalkStatus {
    fn from(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "created" => TalkStatus::Created,
            "done" => TalkStatus::Done,
            "error" | "rejected" | "failed" => TalkStatus::Failed,
            _ => TalkStatus::Processing,
        }
    }
}

impl std::fmt::Display for TalkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TalkStatus::Created => "created",
            TalkStatus::Processing => "processing",
            TalkStatus::Done => "done",
            TalkStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// A submitted avatar video job. State lives at the provider; this is only a handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarJob {
    pub talk_id: String,
    pub status: TalkStatus,
}
