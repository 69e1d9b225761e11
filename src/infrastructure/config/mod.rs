use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DID_SOURCE_URL: &str =
    "https://res.cloudinary.com/drvwan14l/image/upload/v1743239627/magen_igp4ts.png";
const DEFAULT_GTTS_BASE_URL: &str = "https://translate.google.com/translate_tts";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    pub public_base_url: String,
    pub cors_origins: Vec<String>,
    // Audio artifacts
    pub audio_dir: PathBuf,
    pub audio_retention: usize,
    pub audio_settle_delay: Duration,
    // Speech synthesis
    pub tts_provider: TtsProviderKind,
    pub tts_fallback_provider: Option<TtsProviderKind>,
    pub gtts_lang: String,
    pub gtts_base_url: String,
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_voice_id: String,
    pub elevenlabs_model_id: String,
    pub elevenlabs_base_url: String,
    pub elevenlabs_with_timestamps: bool,
    pub max_chars: usize,
    // Video generation
    pub did_api_key: Option<String>,
    pub did_api_url: String,
    pub did_source_url: String,
    pub poll_interval: Duration,
    pub poll_timeout: Duration,
    pub talks_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Speech provider selected once at startup
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProviderKind {
    Gtts,
    ElevenLabs,
}

impl std::str::FromStr for TtsProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gtts" => Ok(TtsProviderKind::Gtts),
            "elevenlabs" => Ok(TtsProviderKind::ElevenLabs),
            other => Err(format!("Unsupported TTS provider: {}", other)),
        }
    }
}

impl std::fmt::Display for TtsProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TtsProviderKind::Gtts => write!(f, "gtts"),
            TtsProviderKind::ElevenLabs => write!(f, "elevenlabs"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 5003,
            log_format: LogFormat::Pretty,
            public_base_url: "http://localhost:5003".to_string(),
            cors_origins: vec!["http://localhost:3003".to_string()],
            audio_dir: PathBuf::from("audio"),
            audio_retention: 3,
            audio_settle_delay: Duration::from_millis(3000),
            tts_provider: TtsProviderKind::Gtts,
            tts_fallback_provider: None,
            gtts_lang: "en".to_string(),
            gtts_base_url: DEFAULT_GTTS_BASE_URL.to_string(),
            elevenlabs_api_key: None,
            elevenlabs_voice_id: "XrExE9yKIg1WjnnlVkGX".to_string(),
            elevenlabs_model_id: "eleven_multilingual_v2".to_string(),
            elevenlabs_base_url: "https://api.elevenlabs.io/v1".to_string(),
            elevenlabs_with_timestamps: true,
            max_chars: 350,
            did_api_key: None,
            did_api_url: "https://api.d-id.com/talks".to_string(),
            did_source_url: DEFAULT_DID_SOURCE_URL.to_string(),
            poll_interval: Duration::from_secs(5),
            poll_timeout: Duration::from_secs(300),
            talks_dir: PathBuf::from("talks"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let config = Config {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", defaults.port)?,
            log_format: match non_empty_var("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                Some(_) => LogFormat::Pretty,
                None => defaults.log_format,
            },
            public_base_url: non_empty_var("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.public_base_url),
            cors_origins: non_empty_var("CORS_ORIGINS")
                .map(|raw| parse_list(&raw))
                .unwrap_or(defaults.cors_origins),
            audio_dir: non_empty_var("AUDIO_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.audio_dir),
            audio_retention: parse_var("AUDIO_RETENTION", defaults.audio_retention)?,
            audio_settle_delay: Duration::from_millis(parse_var(
                "AUDIO_SETTLE_DELAY_MS",
                defaults.audio_settle_delay.as_millis() as u64,
            )?),
            tts_provider: parse_var("TTS_PROVIDER", defaults.tts_provider)?,
            tts_fallback_provider: non_empty_var("TTS_FALLBACK_PROVIDER")
                .map(|s| s.parse::<TtsProviderKind>())
                .transpose()?,
            gtts_lang: env::var("GTTS_LANG").unwrap_or(defaults.gtts_lang),
            gtts_base_url: env::var("GTTS_BASE_URL").unwrap_or(defaults.gtts_base_url),
            elevenlabs_api_key: non_empty_var("ELEVENLABS_API_KEY"),
            elevenlabs_voice_id: env::var("ELEVENLABS_VOICE_ID")
                .unwrap_or(defaults.elevenlabs_voice_id),
            elevenlabs_model_id: env::var("ELEVENLABS_MODEL_ID")
                .unwrap_or(defaults.elevenlabs_model_id),
            elevenlabs_base_url: non_empty_var("ELEVENLABS_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.elevenlabs_base_url),
            elevenlabs_with_timestamps: non_empty_var("ELEVENLABS_WITH_TIMESTAMPS")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(defaults.elevenlabs_with_timestamps),
            max_chars: parse_var("ELEVENLABS_MAX_CHARS", defaults.max_chars)?,
            did_api_key: non_empty_var("DID_API_KEY"),
            did_api_url: non_empty_var("DID_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.did_api_url),
            did_source_url: env::var("DID_SOURCE_URL").unwrap_or(defaults.did_source_url),
            poll_interval: Duration::from_secs(parse_var(
                "POLL_INTERVAL_SECS",
                defaults.poll_interval.as_secs(),
            )?),
            poll_timeout: Duration::from_secs(parse_var(
                "POLL_TIMEOUT_SECS",
                defaults.poll_timeout.as_secs(),
            )?),
            talks_dir: non_empty_var("TALKS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.talks_dir),
        };

        Ok(config)
    }

    /// Callback the video provider invokes once a talk is finished
    pub fn webhook_url(&self) -> String {
        format!("{}/api/webhook", self.public_base_url)
    }

    /// Public URL under which a stored audio artifact is served
    pub fn audio_url(&self, filename: &str) -> String {
        format!(
            "{}/api/audio/{}",
            self.public_base_url,
            urlencoding::encode(filename)
        )
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T, Box<dyn std::error::Error>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty_var(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| format!("Invalid value for {}: {}", key, e).into()),
        None => Ok(default),
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
