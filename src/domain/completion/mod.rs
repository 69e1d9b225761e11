pub mod download;
pub mod error;
pub mod events;
pub mod poller;

pub use download::download_video;
pub use error::CompletionError;
pub use events::{VideoEvent, VideoEvents, VIDEO_READY};
pub use poller::{CompletedTalk, TalkPoller};
