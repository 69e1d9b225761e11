use crate::error::AppError;
use crate::infrastructure::repositories::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum TtsServiceError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("speech provider error: {message}")]
    Provider {
        message: String,
        details: Option<serde_json::Value>,
    },
    #[error("network error: {0}")]
    Network(String),
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl From<ProviderError> for TtsServiceError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Network(msg) => TtsServiceError::Network(msg),
            ProviderError::Io(e) => TtsServiceError::Storage(e),
            other => TtsServiceError::Provider {
                details: other.details(),
                message: other.to_string(),
            },
        }
    }
}

impl From<TtsServiceError> for AppError {
    fn from(err: TtsServiceError) -> Self {
        match err {
            TtsServiceError::Configuration(msg) => AppError::Configuration(msg),
            TtsServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TtsServiceError::Provider { message, details } => AppError::ExternalService {
                message: format!("Speech synthesis failed: {}", message),
                details,
            },
            TtsServiceError::Network(msg) => AppError::ExternalService {
                message: format!("Speech synthesis failed: {}", msg),
                details: None,
            },
            TtsServiceError::Storage(e) => AppError::Internal(e.to_string()),
        }
    }
}
