pub mod error;
pub mod model;
pub mod service;
pub mod text;

pub use error::TtsServiceError;
pub use model::{Alignment, SynthesisResult, SynthesizedAudio, Timing, VoiceSettings};
pub use service::{SpeechService, SpeechServiceApi};
pub use text::{non_blank, truncate_to_max_chars};
