use thiserror::Error;

/// Problems detected before any request is sent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("{var} environment variable not set")]
    MissingCredential { var: String },

    #[error("template '{template}' has no {{{placeholder}}} placeholder")]
    MissingPlaceholder {
        template: String,
        placeholder: String,
    },

    #[error("template '{template}' references unknown placeholder {{{found}}} (expected {{{expected}}})")]
    UnexpectedPlaceholder {
        template: String,
        expected: String,
        found: String,
    },

    #[error("template '{template}' has an unterminated '{{' at byte {offset}")]
    UnterminatedPlaceholder { template: String, offset: usize },

    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}

/// Failures reported by the completion service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("authentication rejected ({status}): {body}")]
    Authentication { status: u16, body: String },

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("completion API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ServiceError::Timeout
        } else if err.is_decode() {
            ServiceError::MalformedResponse(err.to_string())
        } else {
            ServiceError::Network(err.to_string())
        }
    }
}

/// Errors surfaced by a chain invocation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("sentence is empty")]
    EmptySentence,
}

impl ChainError {
    /// The underlying service failure, if this was one
    pub fn as_service(&self) -> Option<&ServiceError> {
        match self {
            ChainError::Service(err) => Some(err),
            _ => None,
        }
    }
}
