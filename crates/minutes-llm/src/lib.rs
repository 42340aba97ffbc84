//! Summarization for the minutes service
//!
//! [`PromptBuilder`] frames a transcript for the configured backend and
//! [`summarize`] sends it through a [`SummarizationEngine`].

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

mod error;
mod http_client;
mod invoker;
pub mod prompt;
mod protocol;
pub mod provider;
mod types;

use std::sync::Arc;

use minutes_config::{SummarizerBackendConfig, SummarizerConfig};

pub use error::SummarizeError;
pub use invoker::summarize;
pub use prompt::PromptBuilder;
pub use provider::SummarizationEngine;
pub use types::{GenerationParams, PromptStyle, SummaryPrompt};

/// Build the single active summarization backend
///
/// # Errors
///
/// Returns an error if the backend's HTTP client cannot be created
pub fn build_engine(config: &SummarizerConfig) -> anyhow::Result<Arc<dyn SummarizationEngine>> {
    let timeout = config.timeout;

    tracing::debug!(backend = config.backend.name(), %timeout, "initializing summarization backend");

    let engine: Arc<dyn SummarizationEngine> = match &config.backend {
        SummarizerBackendConfig::Google(google) => Arc::new(provider::google::GoogleEngine::new(google, timeout)?),
        SummarizerBackendConfig::Watsonx(watsonx) => {
            Arc::new(provider::watsonx::WatsonxEngine::new(watsonx, timeout)?)
        }
        SummarizerBackendConfig::Local(local) => Arc::new(provider::local::LocalEngine::new(local, timeout)?),
    };

    Ok(engine)
}

/// Prompt builder matching the engine's framing and the configured instructions
pub fn prompt_builder(config: &SummarizerConfig, engine: &dyn SummarizationEngine) -> PromptBuilder {
    let builder = PromptBuilder::new(engine.prompt_style());

    match &config.instructions {
        Some(instructions) => builder.with_instructions(instructions.clone()),
        None => builder,
    }
}
