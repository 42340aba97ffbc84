//! watsonx.ai text generation wire format types

use serde::{Deserialize, Serialize};

/// `POST /ml/v1/text/generation` request
#[derive(Debug, Clone, Serialize)]
pub struct WatsonxRequest<'a> {
    /// Fully framed prompt
    pub input: &'a str,
    /// Foundation model identifier
    pub model_id: &'a str,
    /// Owning project
    pub project_id: &'a str,
    /// Decoding parameters
    pub parameters: WatsonxParameters,
}

/// Decoding parameters
#[derive(Debug, Clone, Serialize)]
pub struct WatsonxParameters {
    /// "greedy" or "sample"
    pub decoding_method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_new_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetition_penalty: Option<f64>,
}

/// Generation response
#[derive(Debug, Clone, Deserialize)]
pub struct WatsonxResponse {
    #[serde(default)]
    pub results: Vec<WatsonxResult>,
}

/// One generation result
#[derive(Debug, Clone, Deserialize)]
pub struct WatsonxResult {
    pub generated_text: Option<String>,
}
