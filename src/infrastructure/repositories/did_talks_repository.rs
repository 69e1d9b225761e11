use super::error::ProviderError;
use crate::domain::avatar::{TalkRequest, TalkStatus};
use futures::StreamExt;
use serde::Deserialize;
use std::path::Path;
use tokio::io::AsyncWriteExt;

const PROVIDER: &str = "d-id";

/// Response of the create-talk endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTalk {
    pub id: String,
    #[serde(default = "created_status")]
    pub status: TalkStatus,
}

fn created_status() -> TalkStatus {
    TalkStatus::Created
}

/// Status document of a talk. The raw document is kept for callers that need
/// provider fields this type does not model.
#[derive(Debug, Clone)]
pub struct TalkDetails {
    pub id: String,
    pub status: TalkStatus,
    pub result_url: Option<String>,
    pub raw: serde_json::Value,
}

#[derive(Deserialize)]
struct TalkDocument {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    result_url: Option<String>,
}

/// Client for the video-generation provider's talks API
pub struct DidTalksRepository {
    http_client: reqwest::Client,
    api_url: String,
    auth_header: String,
}

impl DidTalksRepository {
    /// `api_key` is the provider's pre-encoded Basic credential
    pub fn new(api_url: String, api_key: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_url,
            auth_header: format!("Basic {}", api_key),
        }
    }

    pub async fn create_talk(&self, request: &TalkRequest) -> Result<CreatedTalk, ProviderError> {
        tracing::debug!(
            payload = %serde_json::to_string(request).unwrap_or_default(),
            "Create talk payload"
        );

        let response = self
            .http_client
            .post(&self.api_url)
            .header("accept", "application/json")
            .header("Authorization", &self.auth_header)
            .json(request)
            .send()
            .await?;

        // The provider answers 201 Created
        if !response.status().is_success() {
            return Err(ProviderError::from_response(PROVIDER, response).await);
        }

        let talk = response
            .json::<CreatedTalk>()
            .await
            .map_err(|e| ProviderError::Decode {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        tracing::info!(talk_id = %talk.id, status = %talk.status, "Talk created");

        Ok(talk)
    }

    pub async fn get_talk(&self, talk_id: &str) -> Result<TalkDetails, ProviderError> {
        let url = format!("{}/{}", self.api_url, urlencoding::encode(talk_id));

        let response = self
            .http_client
            .get(&url)
            .header("accept", "application/json")
            .header("Authorization", &self.auth_header)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(PROVIDER, response).await);
        }

        let raw = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ProviderError::Decode {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        let document: TalkDocument =
            serde_json::from_value(raw.clone()).map_err(|e| ProviderError::Decode {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        Ok(TalkDetails {
            id: document.id.unwrap_or_else(|| talk_id.to_string()),
            status: document
                .status
                .map(TalkStatus::from)
                .unwrap_or(TalkStatus::Processing),
            result_url: document.result_url.filter(|url| !url.is_empty()),
            raw,
        })
    }

    /// Stream a finished video to `dest`. Returns the number of bytes written.
    /// The result URL is pre-signed, so no credential is sent.
    pub async fn download(&self, url: &str, dest: &Path) -> Result<u64, ProviderError> {
        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(PROVIDER, response).await);
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut written = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}
