use super::error::ProviderError;
use super::tts_repository::TtsRepository;
use crate::domain::tts::SynthesizedAudio;
use async_trait::async_trait;

/// Same per-request limit gTTS uses for the translate endpoint
const MAX_BATCH_SIZE: usize = 100;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; avatar-relay)";

/// Basic synthesis through the Google translate TTS endpoint. No timing data.
pub struct GoogleTtsRepository {
    http_client: reqwest::Client,
    base_url: String,
    lang: String,
}

impl GoogleTtsRepository {
    pub fn new(base_url: String, lang: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url,
            lang,
        }
    }

    async fn fetch_batch(&self, text: &str, index: usize, total: usize) -> Result<Vec<u8>, ProviderError> {
        tracing::debug!(
            batch_index = index,
            batch_count = total,
            batch_chars = text.chars().count(),
            "Calling Google TTS endpoint"
        );

        let index_param = index.to_string();
        let total_param = total.to_string();
        let len_param = text.chars().count().to_string();

        let response = self
            .http_client
            .get(&self.base_url)
            .header("User-Agent", USER_AGENT)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.lang.as_str()),
                ("q", text),
                ("idx", index_param.as_str()),
                ("total", total_param.as_str()),
                ("textlen", len_param.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(self.name(), response).await);
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Split text into batches that respect sentence boundaries.
/// Each batch is at most `max_chars` characters; sentences longer than that
/// are cut on character boundaries.
fn split_into_batches(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let sentence_pattern = regex::Regex::new(r"[.!?]+\s+").expect("static regex");

    let mut sentences: Vec<&str> = Vec::new();
    let mut last_end = 0;
    for mat in sentence_pattern.find_iter(text) {
        sentences.push(&text[last_end..mat.end()]);
        last_end = mat.end();
    }
    if last_end < text.len() {
        sentences.push(&text[last_end..]);
    }

    let mut batches = Vec::new();
    let mut current_batch = String::new();
    let mut current_len = 0;

    for sentence in sentences {
        let sentence_len = sentence.chars().count();

        if sentence_len > max_chars {
            if !current_batch.is_empty() {
                batches.push(std::mem::take(&mut current_batch));
                current_len = 0;
            }
            let chars: Vec<char> = sentence.chars().collect();
            for chunk in chars.chunks(max_chars) {
                batches.push(chunk.iter().collect());
            }
            continue;
        }

        if !current_batch.is_empty() && current_len + sentence_len > max_chars {
            batches.push(std::mem::take(&mut current_batch));
            current_len = 0;
        }

        current_batch.push_str(sentence);
        current_len += sentence_len;
    }

    if !current_batch.is_empty() {
        batches.push(current_batch);
    }

    batches
        .into_iter()
        .map(|batch| batch.trim().to_string())
        .filter(|batch| !batch.is_empty())
        .collect()
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(&self, text: &str) -> Result<SynthesizedAudio, ProviderError> {
        let start_time = std::time::Instant::now();

        let batches = split_into_batches(text, MAX_BATCH_SIZE);
        tracing::info!(
            lang = %self.lang,
            batch_count = batches.len(),
            text_length = text.chars().count(),
            "Starting Google TTS synthesis"
        );

        // MP3 frames concatenate cleanly, so batches are merged in order
        let mut audio = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            let chunk = self.fetch_batch(batch, index, batches.len()).await?;
            audio.extend(chunk);
        }

        tracing::info!(
            provider = self.name(),
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        Ok(SynthesizedAudio {
            audio,
            timing: None,
        })
    }

    fn name(&self) -> &'static str {
        "gtts"
    }
}
