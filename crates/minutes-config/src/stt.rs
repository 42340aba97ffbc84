use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use crate::timeout::RequestTimeout;

/// Top-level STT configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SttConfig {
    /// Language hint passed to the engine (ISO 639-1)
    #[serde(default = "default_language")]
    pub language: String,
    /// Beam-search width; wider is more accurate but slower
    #[serde(default = "default_beam_size")]
    pub beam_size: u32,
    /// Skip silent stretches before decoding
    #[serde(default = "default_true")]
    pub vad_filter: bool,
    /// Feed the previous window's text back in as decoding context
    #[serde(default = "default_true")]
    pub condition_on_previous_text: bool,
    /// Sampling temperature for decoding
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Engine selection
    #[serde(default)]
    pub engine: SttEngineConfig,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            beam_size: default_beam_size(),
            vad_filter: true,
            condition_on_previous_text: true,
            temperature: None,
            engine: SttEngineConfig::default(),
        }
    }
}

/// Supported transcription engines
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SttEngineConfig {
    /// OpenAI-compatible transcription server (faster-whisper, whisper.cpp server)
    WhisperHttp(WhisperHttpConfig),
    /// In-process whisper.cpp model
    WhisperLocal(WhisperLocalConfig),
}

impl Default for SttEngineConfig {
    fn default() -> Self {
        Self::WhisperHttp(WhisperHttpConfig::default())
    }
}

/// Remote whisper server configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WhisperHttpConfig {
    /// Base URL including the API version prefix (e.g. `http://127.0.0.1:8000/v1`)
    #[serde(default = "default_whisper_url")]
    pub base_url: Url,
    /// Model identifier understood by the server
    #[serde(default = "default_whisper_model")]
    pub model: String,
    /// Bearer token, if the server requires one
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Per-call deadline
    #[serde(default = "default_stt_timeout")]
    pub timeout: RequestTimeout,
    /// Send `beam_size`, `vad_filter` and `condition_on_previous_text` as
    /// extra form fields (faster-whisper servers understand them)
    #[serde(default = "default_true")]
    pub decoding_options: bool,
}

impl Default for WhisperHttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_whisper_url(),
            model: default_whisper_model(),
            api_key: None,
            timeout: default_stt_timeout(),
            decoding_options: true,
        }
    }
}

/// In-process whisper.cpp configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WhisperLocalConfig {
    /// Path to a ggml model file; size and quantization follow the file
    pub model_path: PathBuf,
    /// CPU threads per inference
    #[serde(default = "default_threads")]
    pub threads: u16,
    /// Inferences allowed to run at once
    #[serde(default = "default_workers")]
    pub workers: u16,
}

fn default_language() -> String {
    "ko".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_beam_size() -> u32 {
    5
}

#[allow(clippy::missing_const_for_fn)]
fn default_true() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_threads() -> u16 {
    4
}

#[allow(clippy::missing_const_for_fn)]
fn default_workers() -> u16 {
    1
}

#[allow(clippy::missing_panics_doc)]
fn default_whisper_url() -> Url {
    Url::parse("http://127.0.0.1:8000/v1").expect("valid default URL")
}

fn default_whisper_model() -> String {
    "Systran/faster-whisper-small".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_stt_timeout() -> RequestTimeout {
    RequestTimeout::Bounded(Duration::from_secs(600))
}
