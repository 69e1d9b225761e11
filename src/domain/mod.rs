pub mod avatar;
pub mod completion;
pub mod tts;
