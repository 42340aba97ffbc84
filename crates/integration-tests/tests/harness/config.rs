//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use minutes_config::{
    Config, GenerationParamsConfig, GoogleBackendConfig, HealthConfig, LocalBackendConfig, RequestTimeout,
    ServerConfig, StorageConfig, SttConfig, SttEngineConfig, SummarizerBackendConfig, SummarizerConfig,
    WatsonxBackendConfig, WhisperHttpConfig,
};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a builder storing uploads in `upload_dir`
    ///
    /// Engines point at closed ports until a mock is attached.
    pub fn new(upload_dir: &Path) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                storage: StorageConfig {
                    upload_dir: upload_dir.to_path_buf(),
                },
                stt: SttConfig {
                    engine: SttEngineConfig::WhisperHttp(WhisperHttpConfig {
                        base_url: "http://127.0.0.1:9/v1".parse().expect("valid URL"),
                        timeout: RequestTimeout::Bounded(Duration::from_secs(10)),
                        ..WhisperHttpConfig::default()
                    }),
                    ..SttConfig::default()
                },
                summarizer: SummarizerConfig {
                    backend: SummarizerBackendConfig::Local(LocalBackendConfig {
                        base_url: "http://127.0.0.1:9".parse().expect("valid URL"),
                        model: "llama3.1".to_owned(),
                    }),
                    params: GenerationParamsConfig::default(),
                    timeout: RequestTimeout::Bounded(Duration::from_secs(10)),
                    instructions: None,
                },
                telemetry: None,
            },
        }
    }

    /// Point the transcription engine at a mock whisper server
    pub fn with_whisper(mut self, base_url: &str) -> Self {
        if let SttEngineConfig::WhisperHttp(http) = &mut self.config.stt.engine {
            http.base_url = base_url.parse().expect("valid URL");
        }
        self
    }

    /// Use the Google backend at `base_url`
    pub fn with_google(mut self, base_url: &str) -> Self {
        self.config.summarizer.backend = SummarizerBackendConfig::Google(GoogleBackendConfig {
            api_key: SecretString::from("test-key"),
            model: "gemini-2.5-flash".to_owned(),
            base_url: Some(base_url.parse().expect("valid URL")),
        });
        self
    }

    /// Use the watsonx backend at `base_url`
    pub fn with_watsonx(mut self, base_url: &str) -> Self {
        self.config.summarizer.backend = SummarizerBackendConfig::Watsonx(WatsonxBackendConfig {
            base_url: base_url.parse().expect("valid URL"),
            project_id: "test-project".to_owned(),
            access_token: SecretString::from("test-token"),
            model_id: "meta-llama/llama-3-3-70b-instruct".to_owned(),
            api_version: "2023-05-29".to_owned(),
        });
        self
    }

    /// Use the local backend at `base_url`
    pub fn with_local(mut self, base_url: &str) -> Self {
        self.config.summarizer.backend = SummarizerBackendConfig::Local(LocalBackendConfig {
            base_url: base_url.parse().expect("valid URL"),
            model: "llama3.1".to_owned(),
        });
        self
    }

    /// Set generation parameters
    pub fn with_params(mut self, params: GenerationParamsConfig) -> Self {
        self.config.summarizer.params = params;
        self
    }

    /// Per-call summarization deadline
    pub fn with_summarizer_timeout(mut self, timeout: Duration) -> Self {
        self.config.summarizer.timeout = RequestTimeout::Bounded(timeout);
        self
    }

    /// Cap request bodies
    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.config.server.max_upload_bytes = limit;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
