use axum::{extract::rejection::JsonRejection, Json};
use serde::{Deserialize, Serialize};

use crate::domain::tts::non_blank;
use crate::error::{AppError, AppResult};

/// Body of POST /api/tts, /api/generate and /api/fast-generate
#[derive(Debug, Serialize, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Pull a non-blank `text` out of the body, before any provider is involved
pub fn require_text(payload: Result<Json<TextRequest>, JsonRejection>) -> AppResult<String> {
    let Json(request) = payload.map_err(|rejection| {
        AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    request
        .text
        .as_deref()
        .and_then(non_blank)
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest("No text provided".to_string()))
}
