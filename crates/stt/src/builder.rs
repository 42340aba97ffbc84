use std::sync::Arc;

use minutes_config::{SttConfig, SttEngineConfig};

use crate::provider::{TranscriptionEngine, whisper_http::WhisperHttpEngine};

/// Builds the process-wide transcription engine from configuration
pub(crate) struct EngineBuilder<'a> {
    config: &'a SttConfig,
}

impl<'a> EngineBuilder<'a> {
    pub fn new(config: &'a SttConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Arc<dyn TranscriptionEngine>> {
        let engine: Arc<dyn TranscriptionEngine> = match &self.config.engine {
            SttEngineConfig::WhisperHttp(http) => {
                tracing::debug!(base_url = %http.base_url, model = %http.model, timeout = %http.timeout, "initializing whisper HTTP engine");
                Arc::new(WhisperHttpEngine::new("whisper_http".to_owned(), http)?)
            }
            #[cfg(feature = "whisper-local")]
            SttEngineConfig::WhisperLocal(local) => {
                tracing::debug!(model = %local.model_path.display(), "initializing local whisper engine");
                Arc::new(crate::provider::whisper_local::WhisperLocalEngine::new(
                    "whisper_local".to_owned(),
                    local,
                )?)
            }
            #[cfg(not(feature = "whisper-local"))]
            SttEngineConfig::WhisperLocal(_) => {
                return Err(crate::error::SttError::ConfigError(
                    "the whisper_local engine requires building with the `whisper-local` feature".to_owned(),
                ));
            }
        };

        Ok(engine)
    }
}
