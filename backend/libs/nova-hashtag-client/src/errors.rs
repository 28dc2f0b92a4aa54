use thiserror::Error;

/// Failures reported by a [`Transport`](crate::transport::Transport).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Request line plus headers exceed what the transport can carry.
    #[error("Request headers too large: {size} bytes (limit {limit})")]
    HeadersTooLarge { size: usize, limit: usize },

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("API error: {message}")]
    Api { message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl TransportError {
    pub fn is_headers_too_large(&self) -> bool {
        matches!(self, Self::HeadersTooLarge { .. })
    }
}

/// Hashtag client error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashtagError {
    /// Rejected locally, before any request was built
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl HashtagError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Whether a caller-side retry could succeed. The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(TransportError::Http(_)) => true,
            Self::Transport(TransportError::Status { status, .. }) => *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, HashtagError>;
