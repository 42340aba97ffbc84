use thiserror::Error;

/// Errors that can occur while asking a backend for a summary
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// The backend could not be reached
    #[error("connection error: {0}")]
    Connection(String),

    /// The backend did not answer before the deadline
    #[error("request to summarization backend timed out")]
    Timeout,

    /// Credentials were rejected
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The backend answered with a non-success status
    #[error("backend returned {status}: {message}")]
    ProviderApiError { status: u16, message: String },

    /// The response did not contain the expected text field
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The backend could not be set up from configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl SummarizeError {
    /// Map a transport-level `reqwest` failure
    pub(crate) fn from_transport(backend: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Connection(format!("failed to reach {backend}: {err}"))
        }
    }

    /// Map a non-success HTTP status with its body
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Self::AuthenticationFailed(message),
            _ => Self::ProviderApiError { status, message },
        }
    }

    /// Map a body that failed to decode
    pub(crate) fn from_decode(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::MalformedResponse(format!("failed to parse response: {err}"))
        }
    }
}
