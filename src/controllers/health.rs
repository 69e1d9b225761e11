use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// GET /api/health - Liveness probe
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "message": "Server is running"
        })),
    )
}
