pub mod error;
pub mod model;
pub mod script;
pub mod service;

pub use error::AvatarServiceError;
pub use model::{AvatarJob, TalkStatus};
pub use script::{Script, ScriptProvider, TalkConfig, TalkRequest, VoiceConfig};
pub use service::{AvatarService, AvatarServiceApi};
