use std::path::Path;
use std::time::Instant;

use futures_util::StreamExt;
use minutes_telemetry::{KeyValue, metrics};

use crate::{
    error::SttError,
    provider::TranscriptionEngine,
    types::{TranscribeOptions, Transcript},
};

/// Transcription that failed part-way through
///
/// `partial` holds whatever text the engine produced before failing,
/// joined the same way a complete transcript would be.
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct AssemblyError {
    pub partial: Transcript,
    #[source]
    pub source: SttError,
}

impl AssemblyError {
    fn without_text(source: SttError) -> Self {
        Self {
            partial: Transcript::default(),
            source,
        }
    }
}

/// Run the engine over `path` and assemble the full transcript
///
/// The segment stream is drained to the end; engines may defer work until
/// polled, so stopping early would truncate the transcript. An empty
/// transcript is a valid result.
///
/// # Errors
///
/// Returns the engine error along with any text gathered before it
pub async fn assemble(
    engine: &dyn TranscriptionEngine,
    path: &Path,
    options: &TranscribeOptions,
) -> Result<Transcript, AssemblyError> {
    let start = Instant::now();
    let histogram = metrics::duration_histogram(metrics::STT_TRANSCRIPTION_DURATION, "Transcription duration");
    let attributes = [KeyValue::new("engine", engine.name().to_owned())];

    let mut stream = engine
        .transcribe(path, options)
        .await
        .map_err(AssemblyError::without_text)?;

    let mut texts = Vec::new();

    while let Some(item) = stream.next().await {
        match item {
            Ok(segment) => texts.push(segment.text),
            Err(source) => {
                metrics::record_duration(&histogram, start, &attributes);
                return Err(AssemblyError {
                    partial: Transcript::from_texts(&texts),
                    source,
                });
            }
        }
    }

    metrics::record_duration(&histogram, start, &attributes);

    let transcript = Transcript::from_texts(&texts);

    tracing::debug!(
        engine = engine.name(),
        segments = texts.len(),
        chars = transcript.as_str().chars().count(),
        "transcript assembled"
    );

    Ok(transcript)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::provider::SegmentStream;
    use crate::types::TranscriptSegment;

    /// Yields scripted items lazily and counts how many were polled
    struct ScriptedEngine {
        items: Vec<Result<&'static str, &'static str>>,
        polled: Arc<AtomicUsize>,
    }

    impl ScriptedEngine {
        fn new(items: Vec<Result<&'static str, &'static str>>) -> Self {
            Self {
                items,
                polled: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl TranscriptionEngine for ScriptedEngine {
        async fn transcribe(&self, _path: &Path, _options: &TranscribeOptions) -> crate::error::Result<SegmentStream> {
            let polled = Arc::clone(&self.polled);
            let items = self.items.clone();
            let stream = futures_util::stream::iter(items.into_iter().enumerate()).map(move |(i, item)| {
                polled.fetch_add(1, Ordering::SeqCst);
                #[allow(clippy::cast_precision_loss)]
                let start = i as f64;
                item.map(|text| TranscriptSegment::new(start, start + 1.0, text))
                    .map_err(|message| SttError::InferenceFailed(message.to_owned()))
            });
            Ok(Box::pin(stream))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    struct RejectingEngine;

    #[async_trait]
    impl TranscriptionEngine for RejectingEngine {
        async fn transcribe(&self, _path: &Path, _options: &TranscribeOptions) -> crate::error::Result<SegmentStream> {
            Err(SttError::InvalidAudio("unsupported codec".to_owned()))
        }

        fn name(&self) -> &str {
            "rejecting"
        }
    }

    #[tokio::test]
    async fn drains_every_segment_in_order() {
        let engine = ScriptedEngine::new(vec![Ok(" 안녕하세요."), Ok(" 오늘 회의는"), Ok(" 여기까지입니다. ")]);

        let transcript = assemble(&engine, Path::new("a.wav"), &TranscribeOptions::default())
            .await
            .unwrap();

        assert_eq!(transcript.as_str(), "안녕하세요.  오늘 회의는  여기까지입니다.");
        assert_eq!(engine.polled.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn no_segments_is_an_empty_transcript() {
        let engine = ScriptedEngine::new(vec![]);

        let transcript = assemble(&engine, Path::new("a.wav"), &TranscribeOptions::default())
            .await
            .unwrap();

        assert!(transcript.is_empty());
    }

    #[tokio::test]
    async fn mid_stream_failure_keeps_partial_text() {
        let engine = ScriptedEngine::new(vec![Ok("첫 문장"), Ok(" 둘째 문장"), Err("decoder crashed"), Ok("never")]);

        let err = assemble(&engine, Path::new("a.wav"), &TranscribeOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.partial.as_str(), "첫 문장  둘째 문장");
        assert!(matches!(err.source, SttError::InferenceFailed(ref m) if m == "decoder crashed"));
    }

    #[tokio::test]
    async fn engine_rejection_has_no_partial_text() {
        let err = assemble(&RejectingEngine, Path::new("a.wav"), &TranscribeOptions::default())
            .await
            .unwrap_err();

        assert!(err.partial.is_empty());
        assert!(err.to_string().contains("unsupported codec"));
    }
}
