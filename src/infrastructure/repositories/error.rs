/// Failure talking to a remote provider
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{provider} error {status}: {body}")]
    Http {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response from {provider}: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProviderError {
    /// The provider's error body, when it was JSON
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Http { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }

    /// Lowercased `description` field of a JSON error body
    pub fn description(&self) -> Option<String> {
        self.details()?
            .get("description")?
            .as_str()
            .map(str::to_lowercase)
    }

    pub(crate) async fn from_response(provider: &'static str, response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        tracing::error!(provider = provider, status = status, body = %body, "Provider request failed");

        Self::Http {
            provider,
            status,
            body,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}
