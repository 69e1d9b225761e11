use super::error::ProviderError;
use super::tts_repository::TtsRepository;
use crate::domain::tts::{truncate_to_max_chars, Alignment, SynthesizedAudio, Timing, VoiceSettings};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

const OUTPUT_FORMAT: &str = "mp3_44100_128";

#[derive(Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: &'a VoiceSettings,
    output_format: &'static str,
    apply_text_normalization: &'static str,
}

#[derive(Deserialize)]
struct WithTimestampsResponse {
    audio_base64: String,
    #[serde(default)]
    alignment: Option<Alignment>,
    #[serde(default)]
    normalized_alignment: Option<Alignment>,
}

/// Premium synthesis through ElevenLabs, optionally with character alignment
pub struct ElevenLabsTtsRepository {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    voice_id: String,
    model_id: String,
    voice_settings: VoiceSettings,
    with_timestamps: bool,
    max_chars: usize,
}

impl ElevenLabsTtsRepository {
    pub fn new(
        base_url: String,
        api_key: String,
        voice_id: String,
        model_id: String,
        with_timestamps: bool,
        max_chars: usize,
    ) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url,
            api_key,
            voice_id,
            model_id,
            voice_settings: VoiceSettings::default(),
            with_timestamps,
            max_chars,
        }
    }

    fn endpoint(&self) -> String {
        if self.with_timestamps {
            format!("{}/text-to-speech/{}/with-timestamps", self.base_url, self.voice_id)
        } else {
            format!("{}/text-to-speech/{}", self.base_url, self.voice_id)
        }
    }

    fn decode_timestamped(&self, body: WithTimestampsResponse) -> Result<SynthesizedAudio, ProviderError> {
        let audio = BASE64
            .decode(body.audio_base64.as_bytes())
            .map_err(|e| ProviderError::Decode {
                provider: self.name(),
                message: format!("audio_base64 is not valid base64: {}", e),
            })?;

        let timing = match (body.alignment, body.normalized_alignment) {
            (None, None) => None,
            (alignment, normalized_alignment) => Some(Timing {
                alignment,
                normalized_alignment,
            }),
        };

        Ok(SynthesizedAudio { audio, timing })
    }
}

#[async_trait]
impl TtsRepository for ElevenLabsTtsRepository {
    async fn synthesize(&self, text: &str) -> Result<SynthesizedAudio, ProviderError> {
        let start_time = std::time::Instant::now();
        let text = truncate_to_max_chars(text, self.max_chars);

        tracing::info!(
            voice_id = %self.voice_id,
            model = %self.model_id,
            with_timestamps = self.with_timestamps,
            text_length = text.chars().count(),
            "Calling ElevenLabs TTS API"
        );

        let body = ElevenLabsRequest {
            text: &text,
            model_id: &self.model_id,
            voice_settings: &self.voice_settings,
            output_format: OUTPUT_FORMAT,
            apply_text_normalization: "on",
        };

        let accept = if self.with_timestamps {
            "application/json"
        } else {
            "audio/mpeg"
        };

        let response = self
            .http_client
            .post(self.endpoint())
            .header("Accept", accept)
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(self.name(), response).await);
        }

        let result = if self.with_timestamps {
            let body = response
                .json::<WithTimestampsResponse>()
                .await
                .map_err(|e| ProviderError::Decode {
                    provider: self.name(),
                    message: e.to_string(),
                })?;
            self.decode_timestamped(body)?
        } else {
            SynthesizedAudio {
                audio: response.bytes().await?.to_vec(),
                timing: None,
            }
        };

        tracing::info!(
            provider = self.name(),
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = result.audio.len(),
            has_timing = result.timing.is_some(),
            "TTS synthesis completed"
        );

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "elevenlabs"
    }
}
