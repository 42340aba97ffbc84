use std::collections::HashMap;

use serde::Deserialize;
use url::Url;

/// `[telemetry]` section
///
/// Logs always go to stdout; OTLP export happens only when `[telemetry.otlp]`
/// is present.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Extra resource attributes attached to spans and metrics
    #[serde(default)]
    pub resource_attributes: HashMap<String, String>,
    #[serde(default)]
    pub otlp: Option<OtlpConfig>,
}

/// OTLP collector connection
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OtlpConfig {
    pub endpoint: Url,
    #[serde(default)]
    pub protocol: OtlpProtocol,
    /// Sent with every export; HTTP transport only
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default = "default_true")]
    pub traces: bool,
    #[serde(default = "default_true")]
    pub metrics: bool,
    /// Fraction of root traces kept, 0.0 to 1.0
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,
    #[serde(default = "default_export_interval_secs")]
    pub export_interval_secs: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtlpProtocol {
    #[default]
    Grpc,
    HttpProto,
}

fn default_service_name() -> String {
    "minutes".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_true() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_sampling_ratio() -> f64 {
    1.0
}

#[allow(clippy::missing_const_for_fn)]
fn default_export_interval_secs() -> u64 {
    30
}
