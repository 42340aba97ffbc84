use std::path::Path;

use secrecy::ExposeSecret;

use crate::{Config, SttEngineConfig, SummarizerBackendConfig};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml_str(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server_config()?;
        self.validate_stt_config()?;
        self.validate_summarizer_config()?;
        self.validate_telemetry_config()?;
        Ok(())
    }

    fn validate_telemetry_config(&self) -> anyhow::Result<()> {
        let Some(otlp) = self.telemetry.as_ref().and_then(|t| t.otlp.as_ref()) else {
            return Ok(());
        };

        if !(0.0..=1.0).contains(&otlp.sampling_ratio) {
            anyhow::bail!("telemetry.otlp.sampling_ratio must be between 0 and 1");
        }

        if otlp.export_interval_secs == 0 {
            anyhow::bail!("telemetry.otlp.export_interval_secs must be greater than 0");
        }

        Ok(())
    }

    fn validate_server_config(&self) -> anyhow::Result<()> {
        if self.server.max_upload_bytes == 0 {
            anyhow::bail!("server.max_upload_bytes must be greater than 0");
        }

        if self.server.health.enabled && !self.server.health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }

    fn validate_stt_config(&self) -> anyhow::Result<()> {
        let stt = &self.stt;

        if stt.language.trim().is_empty() {
            anyhow::bail!("stt.language must not be empty");
        }

        if stt.beam_size == 0 {
            anyhow::bail!("stt.beam_size must be at least 1");
        }

        if let Some(temperature) = stt.temperature
            && !(0.0..=1.0).contains(&temperature)
        {
            anyhow::bail!("stt.temperature must be between 0 and 1");
        }

        match &stt.engine {
            SttEngineConfig::WhisperHttp(http) => {
                if http.model.trim().is_empty() {
                    anyhow::bail!("stt.engine.model must not be empty");
                }
            }
            SttEngineConfig::WhisperLocal(local) => {
                if local.threads == 0 {
                    anyhow::bail!("stt.engine.threads must be at least 1");
                }
                if local.workers == 0 {
                    anyhow::bail!("stt.engine.workers must be at least 1");
                }
            }
        }

        Ok(())
    }

    fn validate_summarizer_config(&self) -> anyhow::Result<()> {
        let summarizer = &self.summarizer;

        match &summarizer.backend {
            SummarizerBackendConfig::Google(google) => {
                if google.api_key.expose_secret().trim().is_empty() {
                    anyhow::bail!("summarizer.backend.api_key must not be empty");
                }
            }
            SummarizerBackendConfig::Watsonx(watsonx) => {
                if watsonx.project_id.trim().is_empty() {
                    anyhow::bail!("summarizer.backend.project_id must not be empty");
                }
                if watsonx.access_token.expose_secret().trim().is_empty() {
                    anyhow::bail!("summarizer.backend.access_token must not be empty");
                }
            }
            SummarizerBackendConfig::Local(local) => {
                if local.model.trim().is_empty() {
                    anyhow::bail!("summarizer.backend.model must not be empty");
                }
            }
        }

        let params = &summarizer.params;

        if params.max_output_tokens == Some(0) {
            anyhow::bail!("summarizer.params.max_output_tokens must be greater than 0");
        }

        if let Some(temperature) = params.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            anyhow::bail!("summarizer.params.temperature must be between 0 and 2");
        }

        if let Some(penalty) = params.repetition_penalty
            && penalty <= 0.0
        {
            anyhow::bail!("summarizer.params.repetition_penalty must be greater than 0");
        }

        if summarizer.instructions.as_deref().is_some_and(|text| text.trim().is_empty()) {
            anyhow::bail!("summarizer.instructions must not be blank when set");
        }

        Ok(())
    }
}
