use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use futures_util::FutureExt;
use minutes_config::Config;
use minutes_llm::{GenerationParams, PromptBuilder, SummarizationEngine};
use minutes_telemetry::{KeyValue, metrics};
use stt::{TranscribeOptions, TranscriptionEngine};
use tracing::Instrument;

use crate::error::PipelineError;
use crate::result::{Outcome, ProcessResult};
use crate::storage::{UploadStore, UploadedAudio};

/// Runs one upload from bytes to `{script, summary}`
///
/// Holds the two process-wide engine handles; nothing in here is mutated
/// per request.
pub struct Pipeline {
    store: UploadStore,
    transcriber: Arc<dyn TranscriptionEngine>,
    summarizer: Arc<dyn SummarizationEngine>,
    prompt_builder: PromptBuilder,
    options: TranscribeOptions,
    params: GenerationParams,
}

impl Pipeline {
    /// Assemble a pipeline from already-built engines
    ///
    /// The prompt framing follows the summarizer; transcription options and
    /// generation parameters start from their defaults.
    pub fn new(
        store: UploadStore,
        transcriber: Arc<dyn TranscriptionEngine>,
        summarizer: Arc<dyn SummarizationEngine>,
    ) -> Self {
        let prompt_builder = PromptBuilder::new(summarizer.prompt_style());

        Self {
            store,
            transcriber,
            summarizer,
            prompt_builder,
            options: TranscribeOptions::default(),
            params: GenerationParams::default(),
        }
    }

    /// Build both engines and the upload store from configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let transcriber = stt::build_engine(&config.stt)?;
        let summarizer = minutes_llm::build_engine(&config.summarizer)?;
        let prompt_builder = minutes_llm::prompt_builder(&config.summarizer, summarizer.as_ref());

        tracing::info!(
            transcriber = transcriber.name(),
            summarizer = summarizer.name(),
            upload_dir = %config.storage.upload_dir.display(),
            "pipeline ready"
        );

        Ok(Self::new(UploadStore::new(&config.storage.upload_dir), transcriber, summarizer)
            .with_prompt_builder(prompt_builder)
            .with_options(TranscribeOptions::from(&config.stt))
            .with_params(GenerationParams::from(&config.summarizer.params)))
    }

    #[must_use]
    pub fn with_prompt_builder(mut self, prompt_builder: PromptBuilder) -> Self {
        self.prompt_builder = prompt_builder;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: TranscribeOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn store(&self) -> &UploadStore {
        &self.store
    }

    /// Process one upload
    ///
    /// Engine failures and panics are reported in-band; the stored file is
    /// released on every path once it exists.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Storage`] if the upload cannot be written;
    /// no engine is invoked in that case.
    pub async fn process(&self, upload: UploadedAudio) -> Result<ProcessResult, PipelineError> {
        let start = Instant::now();
        let filename = upload.filename.clone().unwrap_or_default();

        let stored = match self.store.acquire(upload).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!(filename = %filename, error = %e, "failed to store upload");
                record_outcome(Outcome::StorageFailed, start);
                return Err(e.into());
            }
        };

        let span = tracing::info_span!("process", request_id = %stored.token());

        let (result, outcome) = async {
            tracing::info!(filename = %filename, "transcription started");
            self.run_stages(stored.path()).await
        }
        .instrument(span.clone())
        .await;

        stored.release().await;

        span.in_scope(|| {
            tracing::info!(
                outcome = %outcome,
                elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
                "request finished"
            );
        });
        record_outcome(outcome, start);

        Ok(result)
    }

    async fn run_stages(&self, path: &Path) -> (ProcessResult, Outcome) {
        let transcribed = AssertUnwindSafe(stt::assemble(self.transcriber.as_ref(), path, &self.options))
            .catch_unwind()
            .await;

        let transcript = match transcribed {
            Ok(Ok(transcript)) => transcript,
            Ok(Err(err)) => {
                tracing::warn!(
                    engine = self.transcriber.name(),
                    error = %err,
                    partial_chars = err.partial.as_str().chars().count(),
                    "transcription failed"
                );
                let partial = Some(err.partial.into_string());
                return (ProcessResult::failed(partial, &err.source), Outcome::TranscriptionFailed);
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                tracing::error!(stage = "transcription", panic = %message, "unexpected failure");
                return (ProcessResult::failed(None, message), Outcome::Unexpected);
            }
        };

        if transcript.is_empty() {
            tracing::info!("no speech recognized, skipping summarization");
            return (ProcessResult::no_speech(), Outcome::NoSpeech);
        }

        tracing::info!(
            backend = self.summarizer.name(),
            chars = transcript.as_str().chars().count(),
            "summarization requested"
        );

        let summarized = AssertUnwindSafe(async {
            let prompt = self.prompt_builder.build(transcript.as_str());
            minutes_llm::summarize(self.summarizer.as_ref(), &prompt, &self.params).await
        })
        .catch_unwind()
        .await;

        let script = transcript.into_string();

        match summarized {
            Ok(Ok(summary)) => (ProcessResult { script, summary }, Outcome::Summarized),
            Ok(Err(err)) => {
                tracing::warn!(backend = self.summarizer.name(), error = %err, "summarization failed");
                (ProcessResult::failed(Some(script), err), Outcome::SummarizationFailed)
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                tracing::error!(stage = "summarization", panic = %message, "unexpected failure");
                (ProcessResult::failed(Some(script), message), Outcome::Unexpected)
            }
        }
    }
}

fn record_outcome(outcome: Outcome, start: Instant) {
    let attributes = [KeyValue::new("outcome", outcome.as_str())];

    metrics::counter(metrics::PIPELINE_REQUEST_COUNT, "Processed uploads").add(1, &attributes);
    metrics::record_duration(
        &metrics::duration_histogram(metrics::PIPELINE_REQUEST_DURATION, "End-to-end processing time"),
        start,
        &attributes,
    );
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unexpected internal error".to_owned())
}
