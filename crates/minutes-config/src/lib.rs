#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod server;
pub mod storage;
pub mod stt;
pub mod summarizer;
pub mod telemetry;
pub mod timeout;

use serde::Deserialize;

pub use server::*;
pub use storage::*;
pub use stt::*;
pub use summarizer::*;
pub use telemetry::{OtlpConfig, OtlpProtocol, TelemetryConfig};
pub use timeout::RequestTimeout;

/// Top-level service configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Transcription engine configuration
    #[serde(default)]
    pub stt: SttConfig,
    /// Summarization backend configuration
    pub summarizer: SummarizerConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
