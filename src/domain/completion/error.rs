use crate::error::AppError;
use crate::infrastructure::repositories::ProviderError;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("talk status request failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("talk {talk_id} did not finish within {timeout:?}")]
    Timeout { talk_id: String, timeout: Duration },
    #[error("talk {talk_id} failed at the provider")]
    JobFailed {
        talk_id: String,
        details: serde_json::Value,
    },
    #[error("talk {0} is done but has no result URL")]
    MissingResultUrl(String),
    #[error("video download failed: {0}")]
    Download(String),
}

impl From<CompletionError> for AppError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Timeout { .. } => AppError::Timeout(err.to_string()),
            CompletionError::Provider(e) => AppError::ExternalService {
                details: e.details(),
                message: e.to_string(),
            },
            CompletionError::JobFailed { ref details, .. } => AppError::ExternalService {
                details: Some(details.clone()),
                message: err.to_string(),
            },
            other => AppError::Internal(other.to_string()),
        }
    }
}
