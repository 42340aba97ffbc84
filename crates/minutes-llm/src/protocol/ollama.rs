//! Ollama `/api/generate` wire format types

use serde::{Deserialize, Serialize};

/// Non-streaming generate request
#[derive(Debug, Clone, Serialize)]
pub struct OllamaGenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    /// Always false; the whole completion comes back in one body
    pub stream: bool,
    #[serde(skip_serializing_if = "OllamaOptions::is_empty")]
    pub options: OllamaOptions,
}

/// Model options
#[derive(Debug, Clone, Default, Serialize)]
pub struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_penalty: Option<f64>,
}

impl OllamaOptions {
    pub const fn is_empty(&self) -> bool {
        self.num_predict.is_none() && self.temperature.is_none() && self.repeat_penalty.is_none()
    }
}

/// Generate response
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaGenerateResponse {
    pub response: Option<String>,
    #[serde(default)]
    pub done: bool,
}
