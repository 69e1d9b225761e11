use super::error::TtsServiceError;
use super::model::SynthesisResult;
use super::text::non_blank;
use crate::infrastructure::config::{Config, TtsProviderKind};
use crate::infrastructure::repositories::{
    AudioStore, ElevenLabsTtsRepository, GoogleTtsRepository, TtsRepository,
};
use async_trait::async_trait;
use std::sync::Arc;

pub struct SpeechService {
    primary: Arc<dyn TtsRepository>,
    fallback: Option<Arc<dyn TtsRepository>>,
    store: Arc<AudioStore>,
}

impl SpeechService {
    pub fn new(
        primary: Arc<dyn TtsRepository>,
        fallback: Option<Arc<dyn TtsRepository>>,
        store: Arc<AudioStore>,
    ) -> Self {
        Self {
            primary,
            fallback,
            store,
        }
    }

    /// Build the configured provider (and optional secondary) once at startup.
    /// Fails when a selected provider has no credential.
    pub fn from_config(config: &Config, store: Arc<AudioStore>) -> Result<Self, TtsServiceError> {
        let primary = build_repository(config.tts_provider, config)?;

        let fallback = match config.tts_fallback_provider {
            Some(kind) if kind != config.tts_provider => Some(build_repository(kind, config)?),
            Some(_) => {
                tracing::warn!("TTS fallback provider equals the primary provider, ignoring it");
                None
            }
            None => None,
        };

        tracing::info!(
            provider = primary.name(),
            fallback = fallback.as_ref().map(|f| f.name()),
            "SpeechService initialized"
        );

        Ok(Self::new(primary, fallback, store))
    }
}

fn build_repository(
    kind: TtsProviderKind,
    config: &Config,
) -> Result<Arc<dyn TtsRepository>, TtsServiceError> {
    match kind {
        TtsProviderKind::Gtts => Ok(Arc::new(GoogleTtsRepository::new(
            config.gtts_base_url.clone(),
            config.gtts_lang.clone(),
        ))),
        TtsProviderKind::ElevenLabs => {
            let api_key = config.elevenlabs_api_key.clone().ok_or_else(|| {
                tracing::error!("ElevenLabs API key is missing");
                TtsServiceError::Configuration(
                    "ELEVENLABS_API_KEY is required when using the elevenlabs provider".to_string(),
                )
            })?;

            Ok(Arc::new(ElevenLabsTtsRepository::new(
                config.elevenlabs_base_url.clone(),
                api_key,
                config.elevenlabs_voice_id.clone(),
                config.elevenlabs_model_id.clone(),
                config.elevenlabs_with_timestamps,
                config.max_chars,
            )))
        }
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Turn text into a stored audio artifact
    ///
    /// This operation:
    /// - Rejects blank text before any provider is called
    /// - Calls the configured provider, retrying once on the secondary provider if one is set
    /// - Writes exactly one artifact and prunes old ones
    async fn synthesize(&self, text: &str) -> Result<SynthesisResult, TtsServiceError>;
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn synthesize(&self, text: &str) -> Result<SynthesisResult, TtsServiceError> {
        let text = non_blank(text)
            .ok_or_else(|| TtsServiceError::Invalid("No text provided".to_string()))?;

        tracing::info!(
            provider = self.primary.name(),
            text_length = text.chars().count(),
            "TTS synthesis request"
        );

        let synthesized = match self.primary.synthesize(text).await {
            Ok(audio) => audio,
            Err(err) => match &self.fallback {
                Some(fallback) => {
                    tracing::warn!(
                        error = %err,
                        primary = self.primary.name(),
                        fallback = fallback.name(),
                        "Primary TTS provider failed, using fallback provider"
                    );
                    fallback.synthesize(text).await?
                }
                None => return Err(err.into()),
            },
        };

        let stored = self.store.save(&synthesized.audio).await?;

        Ok(SynthesisResult {
            filename: stored.filename,
            path: stored.path,
            timing: synthesized.timing,
        })
    }
}
