pub(crate) mod whisper_http;
#[cfg(feature = "whisper-local")]
pub(crate) mod whisper_local;

use std::path::Path;
use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;

use crate::{
    error::SttError,
    types::{TranscribeOptions, TranscriptSegment},
};

/// Lazily produced segments; an engine may defer work until polled
pub type SegmentStream = Pin<Box<dyn Stream<Item = Result<TranscriptSegment, SttError>> + Send>>;

/// Speech-to-text engine capability
///
/// Implementations are built once at startup and shared across requests,
/// so they must not hold per-request mutable state.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Start transcribing the audio file at `path`
    async fn transcribe(&self, path: &Path, options: &TranscribeOptions) -> crate::error::Result<SegmentStream>;

    /// Get the engine name
    fn name(&self) -> &str;
}
