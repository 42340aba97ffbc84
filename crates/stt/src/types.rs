use std::fmt;

use minutes_config::SttConfig;
use serde::{Deserialize, Serialize};

/// A timed fragment of recognized speech, in engine order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start offset in seconds
    pub start: f64,
    /// End offset in seconds
    pub end: f64,
    /// Recognized text, possibly with surrounding whitespace
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Decoding options passed to every engine call
#[derive(Debug, Clone, PartialEq)]
pub struct TranscribeOptions {
    /// Language hint (ISO 639-1)
    pub language: String,
    /// Beam-search width
    pub beam_size: u32,
    /// Skip silence before decoding
    pub vad_filter: bool,
    /// Carry previous text as context
    pub condition_on_previous_text: bool,
    /// Decoding temperature
    pub temperature: Option<f32>,
}

impl Default for TranscribeOptions {
    fn default() -> Self {
        Self {
            language: "ko".to_owned(),
            beam_size: 5,
            vad_filter: true,
            condition_on_previous_text: true,
            temperature: None,
        }
    }
}

impl From<&SttConfig> for TranscribeOptions {
    fn from(config: &SttConfig) -> Self {
        Self {
            language: config.language.clone(),
            beam_size: config.beam_size,
            vad_filter: config.vad_filter,
            condition_on_previous_text: config.condition_on_previous_text,
            temperature: config.temperature,
        }
    }
}

/// Whitespace-joined, trimmed text of all segments
///
/// An empty transcript is a valid result meaning no speech was recognized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript(String);

impl Transcript {
    /// Join segment texts with a single space and trim the result
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = String::new();
        for (i, text) in texts.into_iter().enumerate() {
            if i > 0 {
                joined.push(' ');
            }
            joined.push_str(text.as_ref());
        }
        Self(joined.trim().to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
