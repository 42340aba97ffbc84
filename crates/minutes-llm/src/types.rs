use std::fmt;

use minutes_config::GenerationParamsConfig;

/// Generation knobs; `None` leaves the backend default in place
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GenerationParams {
    /// Cap on generated tokens
    pub max_output_tokens: Option<u32>,
    /// Sampling temperature (0 = deterministic)
    pub temperature: Option<f64>,
    /// Discourages repeated phrases
    pub repetition_penalty: Option<f64>,
}

impl From<&GenerationParamsConfig> for GenerationParams {
    fn from(config: &GenerationParamsConfig) -> Self {
        Self {
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
            repetition_penalty: config.repetition_penalty,
        }
    }
}

/// How a backend expects the prompt to be framed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    /// Instructions followed by the transcript, no turn markers
    Plain,
    /// Llama 3 chat template with system, user and assistant headers
    Llama3Chat,
}

/// The exact text sent to a summarization backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPrompt(String);

impl SummaryPrompt {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SummaryPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
