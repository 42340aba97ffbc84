//! Google Generative Language API backend

use async_trait::async_trait;
use minutes_config::{GoogleBackendConfig, RequestTimeout};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{SummarizationEngine, send_json};
use crate::error::SummarizeError;
use crate::http_client::http_client;
use crate::protocol::google::{GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use crate::types::{GenerationParams, PromptStyle, SummaryPrompt};

/// Default Google Generative Language API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Hosted Gemini models, authenticated with an API key
pub struct GoogleEngine {
    client: Client,
    base_url: Url,
    api_key: SecretString,
    model: String,
}

impl GoogleEngine {
    /// Create from backend configuration
    ///
    /// # Errors
    ///
    /// Returns `SummarizeError::Config` if the HTTP client cannot be built
    /// or the default base URL fails to parse
    pub fn new(config: &GoogleBackendConfig, timeout: RequestTimeout) -> Result<Self, SummarizeError> {
        let base_url = match &config.base_url {
            Some(url) => url.clone(),
            None => Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| SummarizeError::Config(format!("invalid default base URL: {e}")))?,
        };

        Ok(Self {
            client: http_client(timeout)?,
            base_url,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// Build the `generateContent` endpoint URL
    fn generate_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/models/{}:generateContent", self.model)
    }
}

fn generation_config(params: &GenerationParams) -> Option<GenerationConfig> {
    (params.max_output_tokens.is_some() || params.temperature.is_some()).then_some(GenerationConfig {
        temperature: params.temperature,
        max_output_tokens: params.max_output_tokens,
    })
}

#[async_trait]
impl SummarizationEngine for GoogleEngine {
    fn name(&self) -> &str {
        "google"
    }

    fn prompt_style(&self) -> PromptStyle {
        PromptStyle::Plain
    }

    async fn complete(&self, prompt: &SummaryPrompt, params: &GenerationParams) -> Result<String, SummarizeError> {
        if params.repetition_penalty.is_some() {
            tracing::debug!(backend = "google", "repetition_penalty is not supported by this API, ignoring");
        }

        let wire_request = GenerateContentRequest::user_text(prompt.as_str(), generation_config(params));

        let request = self
            .client
            .post(self.generate_url())
            .query(&[("key", self.api_key.expose_secret())])
            .json(&wire_request);

        let wire_response: GenerateContentResponse = send_json(self.name(), request).await?;

        wire_response.first_text().ok_or_else(|| {
            let reason = wire_response.finish_reason().unwrap_or("no candidates");
            SummarizeError::MalformedResponse(format!("response contains no text ({reason})"))
        })
    }
}
