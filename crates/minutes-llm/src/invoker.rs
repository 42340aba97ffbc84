use std::time::Instant;

use minutes_telemetry::{KeyValue, metrics};

use crate::error::SummarizeError;
use crate::provider::SummarizationEngine;
use crate::types::{GenerationParams, SummaryPrompt};

/// Ask `engine` for a summary of `prompt`
///
/// Records the call duration per backend; errors are returned unchanged.
///
/// # Errors
///
/// Returns the backend's error on network, authentication, response-shape
/// or timeout failures
pub async fn summarize(
    engine: &dyn SummarizationEngine,
    prompt: &SummaryPrompt,
    params: &GenerationParams,
) -> Result<String, SummarizeError> {
    let start = Instant::now();
    let histogram = metrics::duration_histogram(metrics::SUMMARIZER_REQUEST_DURATION, "Summarization call duration");

    tracing::debug!(backend = engine.name(), prompt_chars = prompt.as_str().chars().count(), "requesting summary");

    let result = engine.complete(prompt, params).await;

    let status = if result.is_ok() { "ok" } else { "error" };
    metrics::record_duration(
        &histogram,
        start,
        &[
            KeyValue::new("backend", engine.name().to_owned()),
            KeyValue::new("status", status),
        ],
    );

    if let Ok(summary) = &result {
        tracing::debug!(backend = engine.name(), summary_chars = summary.chars().count(), "summary received");
    }

    result
}
