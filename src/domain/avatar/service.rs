use super::error::AvatarServiceError;
use super::model::AvatarJob;
use super::script::{ScriptProvider, TalkRequest};
use crate::domain::tts::{non_blank, truncate_to_max_chars, SynthesisResult, VoiceSettings};
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::{CreatedTalk, DidTalksRepository, ProviderError};
use async_trait::async_trait;
use std::sync::Arc;

pub struct AvatarService {
    talks: Arc<DidTalksRepository>,
    source_url: String,
    voice: ScriptProvider,
    max_chars: usize,
    webhook_url: Option<String>,
}

impl AvatarService {
    pub fn new(
        talks: Arc<DidTalksRepository>,
        source_url: String,
        voice: ScriptProvider,
        max_chars: usize,
        webhook_url: Option<String>,
    ) -> Self {
        Self {
            talks,
            source_url,
            voice,
            max_chars,
            webhook_url,
        }
    }

    /// Fails fast when the video provider credential is missing
    pub fn from_config(config: &Config) -> Result<Self, AvatarServiceError> {
        let api_key = config.did_api_key.as_deref().ok_or_else(|| {
            tracing::error!("DID_API_KEY not set");
            AvatarServiceError::Configuration("DID_API_KEY environment variable is not set".to_string())
        })?;

        let talks = Arc::new(DidTalksRepository::new(config.did_api_url.clone(), api_key));
        let voice = ScriptProvider::elevenlabs(
            &config.elevenlabs_voice_id,
            &config.elevenlabs_model_id,
            VoiceSettings::default(),
        );

        tracing::info!(source_url = %config.did_source_url, "AvatarService initialized");

        Ok(Self::new(
            talks,
            config.did_source_url.clone(),
            voice,
            config.max_chars,
            Some(config.webhook_url()),
        ))
    }

    /// For offline runs that poll instead of receiving a callback
    pub fn without_webhook(mut self) -> Self {
        self.webhook_url = None;
        self
    }

    pub fn talks(&self) -> Arc<DidTalksRepository> {
        self.talks.clone()
    }

    async fn create(&self, request: &TalkRequest) -> Result<AvatarJob, ProviderError> {
        let talk: CreatedTalk = self.talks.create_talk(request).await?;
        Ok(AvatarJob {
            talk_id: talk.id,
            status: talk.status,
        })
    }
}

/// The provider could not fetch or validate the referenced audio
fn is_audio_validation_failure(err: &ProviderError) -> bool {
    err.description()
        .map(|description| description.contains("cannot validate") && description.contains("audio"))
        .unwrap_or(false)
}

#[async_trait]
pub trait AvatarServiceApi: Send + Sync {
    /// Submit a talk that uses previously synthesized audio.
    ///
    /// Consumes the synthesis result so it cannot back a second job. When the
    /// provider rejects the audio, the talk is retried once as a plain text
    /// script with the same webhook.
    async fn submit_audio(
        &self,
        text: &str,
        audio: SynthesisResult,
        audio_url: &str,
    ) -> Result<AvatarJob, AvatarServiceError>;

    /// Fast path: the provider synthesizes the text itself
    async fn submit_text(&self, text: &str) -> Result<AvatarJob, AvatarServiceError>;
}

#[async_trait]
impl AvatarServiceApi for AvatarService {
    async fn submit_audio(
        &self,
        text: &str,
        audio: SynthesisResult,
        audio_url: &str,
    ) -> Result<AvatarJob, AvatarServiceError> {
        tracing::info!(
            audio_file = %audio.filename,
            audio_url = audio_url,
            "Sending talk request with audio script"
        );

        let request = TalkRequest::audio(&self.source_url, audio_url, self.webhook_url.as_deref());

        let err = match self.create(&request).await {
            Ok(job) => return Ok(job),
            Err(err) => err,
        };

        tracing::error!(
            error = %err,
            details = ?err.details(),
            "Audio talk request failed"
        );

        if !is_audio_validation_failure(&err) {
            return Err(AvatarServiceError::submission("Failed to generate avatar video", &err));
        }

        tracing::warn!("Audio validation failed; falling back to text script");
        let fallback = TalkRequest::text_fallback(&self.source_url, text, self.webhook_url.as_deref());

        self.create(&fallback).await.map_err(|fallback_err| {
            tracing::error!(error = %fallback_err, "Text script fallback failed");
            AvatarServiceError::submission(
                "Failed to generate avatar video (text fallback)",
                &fallback_err,
            )
        })
    }

    async fn submit_text(&self, text: &str) -> Result<AvatarJob, AvatarServiceError> {
        let text = non_blank(text)
            .ok_or_else(|| AvatarServiceError::Invalid("No text provided".to_string()))?;
        let text = truncate_to_max_chars(text, self.max_chars);

        tracing::info!(
            text_length = text.chars().count(),
            "Sending talk request with text script (fast generation)"
        );

        let request = TalkRequest::text_with_voice(
            &self.source_url,
            &text,
            self.voice.clone(),
            self.webhook_url.as_deref(),
        );

        self.create(&request).await.map_err(|err| {
            tracing::error!(error = %err, details = ?err.details(), "Text talk request failed");
            AvatarServiceError::submission("Failed to generate avatar video (fast)", &err)
        })
    }
}
