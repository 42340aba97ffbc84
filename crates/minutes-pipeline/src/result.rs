use std::fmt;

use serde::Serialize;

/// Script placeholder when no speech was recognized
pub const NO_SPEECH_SCRIPT: &str = "인식된 음성이 없습니다.";

/// Summary placeholder when there is nothing to summarize
pub const NO_SPEECH_SUMMARY: &str = "내용이 비어있어 요약할 수 없습니다.";

/// Script placeholder when transcription produced no text at all
pub const SCRIPT_FAILED: &str = "스크립트 추출 실패";

/// Prefix of every synthesized error summary
pub const ERROR_SUMMARY_PREFIX: &str = "오류가 발생했습니다: ";

/// Response body of `POST /process`; both fields are always populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessResult {
    pub script: String,
    pub summary: String,
}

impl ProcessResult {
    pub fn no_speech() -> Self {
        Self {
            script: NO_SPEECH_SCRIPT.to_owned(),
            summary: NO_SPEECH_SUMMARY.to_owned(),
        }
    }

    /// In-band failure; keeps `script` when there is any text to keep
    pub fn failed(script: Option<String>, error: impl fmt::Display) -> Self {
        Self {
            script: script.filter(|s| !s.is_empty()).unwrap_or_else(|| SCRIPT_FAILED.to_owned()),
            summary: format!("{ERROR_SUMMARY_PREFIX}{error}"),
        }
    }
}

/// How a request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Summarized,
    NoSpeech,
    TranscriptionFailed,
    SummarizationFailed,
    StorageFailed,
    Unexpected,
}

impl Outcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Summarized => "summarized",
            Self::NoSpeech => "no_speech",
            Self::TranscriptionFailed => "transcription_failed",
            Self::SummarizationFailed => "summarization_failed",
            Self::StorageFailed => "storage_failed",
            Self::Unexpected => "unexpected",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
