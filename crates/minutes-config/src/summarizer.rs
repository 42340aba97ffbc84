use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use crate::timeout::RequestTimeout;

/// Top-level summarization configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummarizerConfig {
    /// The single active backend
    pub backend: SummarizerBackendConfig,
    /// Generation parameters sent with every request
    #[serde(default)]
    pub params: GenerationParamsConfig,
    /// Per-call deadline
    #[serde(default = "default_timeout")]
    pub timeout: RequestTimeout,
    /// Replaces the built-in minutes instruction text
    #[serde(default)]
    pub instructions: Option<String>,
}

/// Supported summarization backends
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SummarizerBackendConfig {
    /// Google Generative Language API (API key)
    Google(GoogleBackendConfig),
    /// IBM watsonx.ai text generation (project id + access token)
    Watsonx(WatsonxBackendConfig),
    /// Local Ollama-compatible inference server
    Local(LocalBackendConfig),
}

impl SummarizerBackendConfig {
    /// Short backend name used in logs and metrics
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Google(_) => "google",
            Self::Watsonx(_) => "watsonx",
            Self::Local(_) => "local",
        }
    }
}

/// Google Generative Language API backend
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoogleBackendConfig {
    /// API key
    pub api_key: SecretString,
    /// Model name
    #[serde(default = "default_google_model")]
    pub model: String,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
}

/// watsonx.ai backend
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatsonxBackendConfig {
    /// Regional service URL (e.g. `https://us-south.ml.cloud.ibm.com`)
    pub base_url: Url,
    /// Project that owns the deployment
    pub project_id: String,
    /// Bearer access token
    pub access_token: SecretString,
    /// Foundation model identifier
    #[serde(default = "default_watsonx_model")]
    pub model_id: String,
    /// API version date
    #[serde(default = "default_watsonx_version")]
    pub api_version: String,
}

/// Local inference server backend
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalBackendConfig {
    /// Server address (e.g. `http://127.0.0.1:11434`)
    #[serde(default = "default_local_url")]
    pub base_url: Url,
    /// Model tag
    pub model: String,
}

/// Generation parameters; unset values use the backend's defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationParamsConfig {
    /// Cap on generated tokens
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
    /// Sampling temperature (0 = deterministic)
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Penalty applied to repeated tokens
    #[serde(default)]
    pub repetition_penalty: Option<f64>,
}

fn default_google_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_watsonx_model() -> String {
    "meta-llama/llama-3-3-70b-instruct".to_string()
}

fn default_watsonx_version() -> String {
    "2023-05-29".to_string()
}

#[allow(clippy::missing_panics_doc)]
fn default_local_url() -> Url {
    Url::parse("http://127.0.0.1:11434").expect("valid default URL")
}

#[allow(clippy::missing_const_for_fn)]
fn default_timeout() -> RequestTimeout {
    RequestTimeout::Bounded(Duration::from_secs(120))
}
