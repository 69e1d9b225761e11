use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::{
    controllers::request::{require_text, TextRequest},
    domain::{
        avatar::{AvatarJob, AvatarService, AvatarServiceApi},
        tts::{SpeechService, SpeechServiceApi},
    },
    error::{AppError, AppResult},
    infrastructure::config::Config,
};

pub struct AvatarController {
    speech_service: Arc<SpeechService>,
    avatar_service: Arc<AvatarService>,
    config: Arc<Config>,
}

impl AvatarController {
    pub fn new(
        speech_service: Arc<SpeechService>,
        avatar_service: Arc<AvatarService>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            speech_service,
            avatar_service,
            config,
        }
    }

    /// POST /api/generate - Synthesize locally, then submit the audio as a talk
    pub async fn generate(
        State(controller): State<Arc<AvatarController>>,
        payload: Result<Json<TextRequest>, JsonRejection>,
    ) -> AppResult<Json<AvatarJob>> {
        let text = require_text(payload)?;

        let synthesis = controller.speech_service.synthesize(&text).await?;
        let audio_url = controller.config.audio_url(&synthesis.filename);

        // Give the public URL time to become reachable before the provider fetches it
        if !controller.config.audio_settle_delay.is_zero() {
            tokio::time::sleep(controller.config.audio_settle_delay).await;
        }

        let still_there = tokio::fs::try_exists(&synthesis.path).await.unwrap_or(false);
        if !still_there {
            return Err(AppError::Internal("Generated audio file not found".to_string()));
        }

        let job = controller
            .avatar_service
            .submit_audio(&text, synthesis, &audio_url)
            .await?;

        tracing::info!(talk_id = %job.talk_id, status = %job.status, "Avatar job submitted");

        Ok(Json(job))
    }

    /// POST /api/fast-generate - Let the video provider synthesize the text itself
    pub async fn fast_generate(
        State(controller): State<Arc<AvatarController>>,
        payload: Result<Json<TextRequest>, JsonRejection>,
    ) -> AppResult<Json<AvatarJob>> {
        let text = require_text(payload)?;

        let job = controller.avatar_service.submit_text(&text).await?;

        tracing::info!(talk_id = %job.talk_id, status = %job.status, "Avatar job submitted (fast)");

        Ok(Json(job))
    }
}
