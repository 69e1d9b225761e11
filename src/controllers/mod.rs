pub mod audio;
pub mod avatar;
pub mod health;
pub mod request;
pub mod tts;
pub mod webhook;
