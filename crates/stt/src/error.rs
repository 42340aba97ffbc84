use thiserror::Error;

pub type Result<T> = std::result::Result<T, SttError>;

/// Transcription engine errors
#[derive(Debug, Error)]
pub enum SttError {
    /// The audio could not be read or decoded
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    /// Authentication with the engine failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The engine returned a non-success status
    #[error("Engine API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The engine did not answer before the deadline
    #[error("Transcription timed out")]
    Timeout,

    /// The engine answered with something we could not understand
    #[error("Malformed engine response: {0}")]
    MalformedResponse(String),

    /// Engine configuration is unusable
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Inference itself failed
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
}

impl SttError {
    /// Map a transport-level `reqwest` failure
    pub(crate) fn from_transport(engine: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::ConnectionError(format!("Failed to send request to {engine}: {err}"))
        }
    }

    /// Map a non-success HTTP status with its body
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Self::AuthenticationFailed(message),
            400 | 415 | 422 => Self::InvalidAudio(message),
            _ => Self::ProviderApiError { status, message },
        }
    }
}
