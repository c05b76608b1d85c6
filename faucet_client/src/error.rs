use faucet_rpc::provider::ProviderError;

/// Errors generated while building the client [`Config`][crate::Config].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid URL in {key}: {source}")]
    InvalidUrl {
        key: &'static str,
        source: url::ParseError,
    },
}

/// Possible faucet client errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("Serialization failed: {0}")]
    Serialization(serde_json::Error),

    #[error("Deserialization failed: {0}")]
    Deserialization(serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] crate::http::HttpClientError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// The provider error object, if the wallet rejected the request.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            Self::Provider(err) => Some(err),
            _ => None,
        }
    }
}
