pub mod request_id;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::controllers::{
    audio, avatar::AvatarController, health, tts::TtsController, webhook::WebhookController,
};
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::AudioStore;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

/// Build the application router with all routes configured
pub fn build_router(
    config: &Config,
    tts_controller: Arc<TtsController>,
    avatar_controller: Arc<AvatarController>,
    webhook_controller: Arc<WebhookController>,
    audio_store: Arc<AudioStore>,
) -> Router {
    let tts_routes = Router::new()
        .route("/api/tts", post(TtsController::synthesize))
        .with_state(tts_controller);

    let avatar_routes = Router::new()
        .route("/api/generate", post(AvatarController::generate))
        .route("/api/fast-generate", post(AvatarController::fast_generate))
        .with_state(avatar_controller);

    let audio_routes = Router::new()
        .route("/api/audio/:filename", get(audio::serve_audio))
        .with_state(audio_store);

    let webhook_routes = Router::new()
        .route("/api/webhook", post(WebhookController::receive))
        .route("/api/events", get(WebhookController::subscribe))
        .with_state(webhook_controller);

    Router::new()
        .route("/api/health", get(health::health))
        .merge(tts_routes)
        .merge(avatar_routes)
        .merge(audio_routes)
        .merge(webhook_routes)
        .layer(cors_layer(&config.cors_origins))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Start the HTTP server
pub async fn start_http_server(config: &Config, app: Router) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
