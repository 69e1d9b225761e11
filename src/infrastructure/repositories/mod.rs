pub mod audio_store;
pub mod did_talks_repository;
pub mod elevenlabs_tts_repository;
pub mod error;
pub mod google_tts_repository;
pub mod tts_repository;

pub use audio_store::{AudioStore, StoredAudio};
pub use did_talks_repository::{CreatedTalk, DidTalksRepository, TalkDetails};
pub use elevenlabs_tts_repository::ElevenLabsTtsRepository;
pub use error::ProviderError;
pub use google_tts_repository::GoogleTtsRepository;
pub use tts_repository::TtsRepository;
