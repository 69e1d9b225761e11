use avatar_relay::controllers::{
    avatar::AvatarController, tts::TtsController, webhook::WebhookController,
};
use avatar_relay::domain::{avatar::AvatarService, completion::VideoEvents, tts::SpeechService};
use avatar_relay::infrastructure::config::Config;
use avatar_relay::infrastructure::http::{build_router, start_http_server};
use avatar_relay::infrastructure::logging::init_logging;
use avatar_relay::infrastructure::repositories::AudioStore;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting avatar relay on {}:{} (public URL {})",
        config.host,
        config.port,
        config.public_base_url
    );

    let audio_store = Arc::new(AudioStore::new(
        config.audio_dir.clone(),
        config.audio_retention,
    ));
    audio_store.ensure_dir().await?;
    tracing::info!(
        dir = %audio_store.dir().display(),
        retention = config.audio_retention,
        "Audio directory ready"
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Services (fail fast on missing credentials)
    let speech_service = Arc::new(SpeechService::from_config(&config, audio_store.clone())?);
    let avatar_service = Arc::new(AvatarService::from_config(&config)?);
    let events = Arc::new(VideoEvents::default());

    let config = Arc::new(config);

    // 2. Controllers
    let tts_controller = Arc::new(TtsController::new(speech_service.clone(), config.clone()));
    let avatar_controller = Arc::new(AvatarController::new(
        speech_service,
        avatar_service,
        config.clone(),
    ));
    let webhook_controller = Arc::new(WebhookController::new(events));

    let app = build_router(
        &config,
        tts_controller,
        avatar_controller,
        webhook_controller,
        audio_store,
    );

    start_http_server(&config, app).await?;

    Ok(())
}
