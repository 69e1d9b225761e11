use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    controllers::request::{require_text, TextRequest},
    domain::tts::{SpeechService, SpeechServiceApi, Timing},
    error::AppResult,
    infrastructure::config::Config,
};

/// Response for POST /api/tts
#[derive(Debug, Serialize, Deserialize)]
pub struct TtsResponse {
    pub success: bool,
    pub audio_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing: Option<Timing>,
}

pub struct TtsController {
    speech_service: Arc<SpeechService>,
    config: Arc<Config>,
}

impl TtsController {
    pub fn new(speech_service: Arc<SpeechService>, config: Arc<Config>) -> Self {
        Self {
            speech_service,
            config,
        }
    }

    /// POST /api/tts - Convert text to a served audio file
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        payload: Result<Json<TextRequest>, JsonRejection>,
    ) -> AppResult<Json<TtsResponse>> {
        let text = require_text(payload)?;

        let result = controller.speech_service.synthesize(&text).await?;

        Ok(Json(TtsResponse {
            success: true,
            audio_url: controller.config.audio_url(&result.filename),
            timing: result.timing,
        }))
    }
}
