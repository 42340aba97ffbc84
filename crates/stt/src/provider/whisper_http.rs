use std::path::Path;

use async_trait::async_trait;
use minutes_config::WhisperHttpConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{
    error::SttError,
    http_client::http_client,
    types::{TranscribeOptions, TranscriptSegment},
};

use super::{SegmentStream, TranscriptionEngine};

/// Whisper engine behind an OpenAI-compatible `/audio/transcriptions` endpoint
///
/// Works with faster-whisper servers as well as whisper.cpp's server. The
/// `verbose_json` response format is requested so segment timing survives.
pub(crate) struct WhisperHttpEngine {
    client: Client,
    base_url: Url,
    model: String,
    api_key: Option<SecretString>,
    decoding_options: bool,
    name: String,
}

impl WhisperHttpEngine {
    pub fn new(name: String, config: &WhisperHttpConfig) -> crate::error::Result<Self> {
        Ok(Self {
            client: http_client(config.timeout)?,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            decoding_options: config.decoding_options,
            name,
        })
    }

    fn transcriptions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/audio/transcriptions")
    }

    fn form(&self, audio: Vec<u8>, filename: String, options: &TranscribeOptions) -> reqwest::multipart::Form {
        let mut form = reqwest::multipart::Form::new()
            .part("file", reqwest::multipart::Part::bytes(audio).file_name(filename))
            .text("model", self.model.clone())
            .text("language", options.language.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "segment");

        if let Some(temperature) = options.temperature {
            form = form.text("temperature", temperature.to_string());
        }

        if self.decoding_options {
            form = form
                .text("beam_size", options.beam_size.to_string())
                .text("vad_filter", options.vad_filter.to_string())
                .text(
                    "condition_on_previous_text",
                    options.condition_on_previous_text.to_string(),
                );
        }

        form
    }
}

#[derive(serde::Deserialize)]
struct VerboseTranscription {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    segments: Option<Vec<VerboseSegment>>,
}

#[derive(serde::Deserialize)]
struct VerboseSegment {
    #[serde(default)]
    start: f64,
    #[serde(default)]
    end: f64,
    text: String,
}

impl VerboseTranscription {
    /// Segments in server order
    ///
    /// Without segments (absent or an empty list) the plain `text` answer
    /// becomes one segment.
    fn into_segments(self) -> crate::error::Result<Vec<TranscriptSegment>> {
        let segments = self.segments.filter(|segments| !segments.is_empty());

        match (segments, self.text) {
            (Some(segments), _) => Ok(segments
                .into_iter()
                .map(|s| TranscriptSegment::new(s.start, s.end, s.text))
                .collect()),
            (None, Some(text)) if text.trim().is_empty() => Ok(Vec::new()),
            (None, Some(text)) => Ok(vec![TranscriptSegment::new(0.0, 0.0, text)]),
            (None, None) => Err(SttError::MalformedResponse(
                "response has neither `segments` nor `text`".to_owned(),
            )),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for WhisperHttpEngine {
    async fn transcribe(&self, path: &Path, options: &TranscribeOptions) -> crate::error::Result<SegmentStream> {
        let audio = tokio::fs::read(path)
            .await
            .map_err(|e| SttError::InvalidAudio(format!("Failed to read {}: {e}", path.display())))?;

        let filename = path
            .file_name()
            .map_or_else(|| "audio".to_owned(), |n| n.to_string_lossy().into_owned());

        tracing::debug!(
            engine = %self.name,
            bytes = audio.len(),
            model = %self.model,
            language = %options.language,
            "whisper transcription request"
        );

        let mut builder = self
            .client
            .post(self.transcriptions_url())
            .multipart(self.form(audio, filename, options));

        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(engine = %self.name, error = %e, "whisper request failed");
            SttError::from_transport(&self.name, &e)
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(engine = %self.name, %status, "whisper API error: {error_text}");

            return Err(SttError::from_status(status.as_u16(), error_text));
        }

        let result: VerboseTranscription = response.json().await.map_err(|e| {
            tracing::error!(engine = %self.name, error = %e, "failed to parse whisper response");
            if e.is_timeout() {
                SttError::Timeout
            } else {
                SttError::MalformedResponse(e.to_string())
            }
        })?;

        let segments = result.into_segments()?;

        tracing::debug!(engine = %self.name, segments = segments.len(), "whisper transcription complete");

        Ok(Box::pin(futures_util::stream::iter(segments.into_iter().map(Ok))))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
