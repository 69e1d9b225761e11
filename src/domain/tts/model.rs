use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-character timing returned by providers that support alignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    pub characters: Vec<String>,
    pub character_start_times_seconds: Vec<f64>,
    pub character_end_times_seconds: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_alignment: Option<Alignment>,
}

/// Raw provider output before it is written to the artifact directory
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub audio: Vec<u8>,
    pub timing: Option<Timing>,
}

/// A stored audio artifact. Not `Clone`: each result backs at most one avatar job.
#[derive(Debug)]
pub struct SynthesisResult {
    pub filename: String,
    pub path: PathBuf,
    pub timing: Option<Timing>,
}

/// ElevenLabs voice tuning, shared by local synthesis and the video provider's
/// embedded synthesis config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
    pub speed: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.8,
            similarity_boost: 0.75,
            style: 0.0,
            use_speaker_boost: true,
            speed: 0.8,
        }
    }
}
