use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    infrastructure::repositories::AudioStore,
};

/// GET /api/audio/:filename - Serve a generated audio file.
/// Open to any origin so the video provider can fetch it.
pub async fn serve_audio(
    State(store): State<Arc<AudioStore>>,
    Path(filename): Path<String>,
) -> AppResult<(StatusCode, HeaderMap, Body)> {
    let audio = store
        .read(&filename)
        .await
        .map_err(|e| AppError::Internal(format!("Error serving audio: {}", e)))?
        .ok_or_else(|| AppError::NotFound("Audio file not found".to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );

    Ok((StatusCode::OK, headers, Body::from(audio)))
}
