//! Local inference server backend (Ollama `/api/generate`)

use async_trait::async_trait;
use minutes_config::{LocalBackendConfig, RequestTimeout};
use reqwest::Client;
use url::Url;

use super::{SummarizationEngine, send_json};
use crate::error::SummarizeError;
use crate::http_client::http_client;
use crate::protocol::ollama::{OllamaGenerateRequest, OllamaGenerateResponse, OllamaOptions};
use crate::types::{GenerationParams, PromptStyle, SummaryPrompt};

/// Model served over HTTP on the local network
///
/// The server applies the model's own chat template, so prompts are sent
/// plain.
pub struct LocalEngine {
    client: Client,
    base_url: Url,
    model: String,
}

impl LocalEngine {
    /// Create from backend configuration
    ///
    /// # Errors
    ///
    /// Returns `SummarizeError::Config` if the HTTP client cannot be built
    pub fn new(config: &LocalBackendConfig, timeout: RequestTimeout) -> Result<Self, SummarizeError> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        })
    }

    fn generate_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/api/generate")
    }
}

#[async_trait]
impl SummarizationEngine for LocalEngine {
    fn name(&self) -> &str {
        "local"
    }

    fn prompt_style(&self) -> PromptStyle {
        PromptStyle::Plain
    }

    async fn complete(&self, prompt: &SummaryPrompt, params: &GenerationParams) -> Result<String, SummarizeError> {
        let wire_request = OllamaGenerateRequest {
            model: &self.model,
            prompt: prompt.as_str(),
            stream: false,
            options: OllamaOptions {
                num_predict: params.max_output_tokens,
                temperature: params.temperature,
                repeat_penalty: params.repetition_penalty,
            },
        };

        let request = self.client.post(self.generate_url()).json(&wire_request);

        let wire_response: OllamaGenerateResponse = send_json(self.name(), request).await?;

        if !wire_response.done {
            tracing::debug!(backend = "local", "generation reported as not done");
        }

        wire_response
            .response
            .ok_or_else(|| SummarizeError::MalformedResponse("missing `response` field".to_owned()))
    }
}
