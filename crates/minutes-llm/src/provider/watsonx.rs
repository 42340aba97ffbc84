//! IBM watsonx.ai text generation backend

use async_trait::async_trait;
use minutes_config::{RequestTimeout, WatsonxBackendConfig};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{SummarizationEngine, send_json};
use crate::error::SummarizeError;
use crate::http_client::http_client;
use crate::protocol::watsonx::{WatsonxParameters, WatsonxRequest, WatsonxResponse};
use crate::types::{GenerationParams, PromptStyle, SummaryPrompt};

/// Managed inference service, authenticated with a project id and bearer token
///
/// Serves Llama 3 instruct models, so prompts arrive already framed with
/// the chat template.
pub struct WatsonxEngine {
    client: Client,
    base_url: Url,
    project_id: String,
    access_token: SecretString,
    model_id: String,
    api_version: String,
}

impl WatsonxEngine {
    /// Create from backend configuration
    ///
    /// # Errors
    ///
    /// Returns `SummarizeError::Config` if the HTTP client cannot be built
    pub fn new(config: &WatsonxBackendConfig, timeout: RequestTimeout) -> Result<Self, SummarizeError> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: config.base_url.clone(),
            project_id: config.project_id.clone(),
            access_token: config.access_token.clone(),
            model_id: config.model_id.clone(),
            api_version: config.api_version.clone(),
        })
    }

    fn generation_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/ml/v1/text/generation")
    }
}

impl From<&GenerationParams> for WatsonxParameters {
    fn from(params: &GenerationParams) -> Self {
        let sampling = params.temperature.is_some_and(|t| t > 0.0);

        Self {
            decoding_method: if sampling { "sample" } else { "greedy" },
            max_new_tokens: params.max_output_tokens,
            temperature: params.temperature,
            repetition_penalty: params.repetition_penalty,
        }
    }
}

#[async_trait]
impl SummarizationEngine for WatsonxEngine {
    fn name(&self) -> &str {
        "watsonx"
    }

    fn prompt_style(&self) -> PromptStyle {
        PromptStyle::Llama3Chat
    }

    async fn complete(&self, prompt: &SummaryPrompt, params: &GenerationParams) -> Result<String, SummarizeError> {
        let wire_request = WatsonxRequest {
            input: prompt.as_str(),
            model_id: &self.model_id,
            project_id: &self.project_id,
            parameters: params.into(),
        };

        tracing::debug!(
            backend = "watsonx",
            model_id = %self.model_id,
            decoding_method = wire_request.parameters.decoding_method,
            "watsonx generation request"
        );

        let request = self
            .client
            .post(self.generation_url())
            .query(&[("version", self.api_version.as_str())])
            .bearer_auth(self.access_token.expose_secret())
            .json(&wire_request);

        let wire_response: WatsonxResponse = send_json(self.name(), request).await?;

        wire_response
            .results
            .into_iter()
            .next()
            .and_then(|r| r.generated_text)
            .ok_or_else(|| SummarizeError::MalformedResponse("missing results[0].generated_text".to_owned()))
    }
}
