use super::error::ProviderError;
use crate::domain::tts::SynthesizedAudio;
use async_trait::async_trait;

/// Repository for speech synthesis.
/// Abstracts the underlying provider (Google translate TTS or ElevenLabs).
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Splitting text into batches if needed
/// - Merging audio chunks into a single MP3 stream
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text to speech
    ///
    /// Returns MP3 audio plus timing data when the provider offers it
    ///
    /// # Errors
    /// Returns `ProviderError::Http` on a non-success status and
    /// `ProviderError::Network` when the provider cannot be reached
    async fn synthesize(&self, text: &str) -> Result<SynthesizedAudio, ProviderError>;

    /// Short provider name used in logs
    fn name(&self) -> &'static str;
}
