//! Speech-to-text for the minutes service
//!
//! A [`TranscriptionEngine`] turns an audio file into a stream of timed
//! segments; [`assemble`] drains that stream into a single [`Transcript`].

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod assembler;
mod builder;
mod error;
mod http_client;
mod provider;
mod types;

use std::sync::Arc;

pub use assembler::{AssemblyError, assemble};
pub use error::{Result, SttError};
pub use provider::{SegmentStream, TranscriptionEngine};
pub use types::{TranscribeOptions, Transcript, TranscriptSegment};

/// Build the transcription engine selected in configuration
///
/// # Errors
///
/// Returns an error if the engine cannot be initialized (bad model path,
/// unusable HTTP client, or an engine not compiled into this build)
pub fn build_engine(config: &minutes_config::SttConfig) -> anyhow::Result<Arc<dyn TranscriptionEngine>> {
    builder::EngineBuilder::new(config)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to initialize transcription engine: {e}"))
}
