use crate::domain::tts::VoiceSettings;
use serde::Serialize;

/// Body of a create-talk request
#[derive(Debug, Clone, Serialize)]
pub struct TalkRequest {
    pub source_url: String,
    pub script: Script,
    pub config: TalkConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
}

/// How the speech for a talk is sourced
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Script {
    Audio {
        audio_url: String,
    },
    Text {
        input: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        provider: Option<ScriptProvider>,
    },
}

/// Synthesis config embedded in a text script, so the video provider runs TTS itself
#[derive(Debug, Clone, Serialize)]
pub struct ScriptProvider {
    #[serde(rename = "type")]
    pub kind: String,
    pub voice_id: String,
    pub voice_config: VoiceConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoiceConfig {
    pub model_id: String,
    #[serde(flatten)]
    pub settings: VoiceSettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct TalkConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fluent: Option<bool>,
    pub stitch: bool,
}

impl TalkRequest {
    /// Audio-script mode: the provider fetches previously synthesized audio
    pub fn audio(source_url: &str, audio_url: &str, webhook: Option<&str>) -> Self {
        Self {
            source_url: source_url.to_string(),
            script: Script::Audio {
                audio_url: audio_url.to_string(),
            },
            config: TalkConfig {
                fluent: Some(false),
                stitch: true,
            },
            webhook: webhook.map(str::to_string),
        }
    }

    /// Text-script retry after the provider could not validate the audio
    pub fn text_fallback(source_url: &str, text: &str, webhook: Option<&str>) -> Self {
        Self {
            source_url: source_url.to_string(),
            script: Script::Text {
                input: text.to_string(),
                provider: None,
            },
            config: TalkConfig {
                fluent: None,
                stitch: true,
            },
            webhook: webhook.map(str::to_string),
        }
    }

    /// Text-script fast path with embedded ElevenLabs config
    pub fn text_with_voice(
        source_url: &str,
        text: &str,
        voice: ScriptProvider,
        webhook: Option<&str>,
    ) -> Self {
        Self {
            source_url: source_url.to_string(),
            script: Script::Text {
                input: text.to_string(),
                provider: Some(voice),
            },
            config: TalkConfig {
                fluent: Some(true),
                stitch: true,
            },
            webhook: webhook.map(str::to_string),
        }
    }
}

impl ScriptProvider {
    pub fn elevenlabs(voice_id: &str, model_id: &str, settings: VoiceSettings) -> Self {
        Self {
            kind: "elevenlabs".to_string(),
            voice_id: voice_id.to_string(),
            voice_config: VoiceConfig {
                model_id: model_id.to_string(),
                settings,
            },
        }
    }
}
