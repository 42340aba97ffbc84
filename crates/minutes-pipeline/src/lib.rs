//! Upload-to-minutes pipeline
//!
//! [`UploadStore`] keeps each upload on disk for exactly one request and
//! [`Pipeline`] sequences transcription and summarization over it.

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

mod error;
mod pipeline;
mod result;
mod storage;

pub use error::PipelineError;
pub use pipeline::Pipeline;
pub use result::{
    ERROR_SUMMARY_PREFIX, NO_SPEECH_SCRIPT, NO_SPEECH_SUMMARY, Outcome, ProcessResult, SCRIPT_FAILED,
};
pub use storage::{StorageError, StoredAudio, UploadStore, UploadedAudio};
