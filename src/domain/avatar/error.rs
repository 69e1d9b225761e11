use crate::error::AppError;
use crate::infrastructure::repositories::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum AvatarServiceError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("{message}")]
    Submission {
        message: String,
        details: Option<serde_json::Value>,
    },
}

impl AvatarServiceError {
    /// Collapse a provider failure into one coarse submission error
    pub fn submission(context: &str, err: &ProviderError) -> Self {
        AvatarServiceError::Submission {
            message: format!("{}: {}", context, err),
            details: err.details(),
        }
    }
}

impl From<AvatarServiceError> for AppError {
    fn from(err: AvatarServiceError) -> Self {
        match err {
            AvatarServiceError::Configuration(msg) => AppError::Configuration(msg),
            AvatarServiceError::Invalid(msg) => AppError::BadRequest(msg),
            AvatarServiceError::Submission { message, details } => {
                AppError::ExternalService { message, details }
            }
        }
    }
}
