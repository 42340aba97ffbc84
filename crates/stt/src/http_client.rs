use std::time::Duration;

use minutes_config::RequestTimeout;
use reqwest::{Client, header};

/// HTTP client for talking to a transcription server
///
/// Uploads can be large and decoding slow, so the deadline comes from
/// configuration rather than a fixed default.
pub fn http_client(timeout: RequestTimeout) -> crate::error::Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::CONNECTION, header::HeaderValue::from_static("keep-alive"));

    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers);

    if let Some(timeout) = timeout.as_duration() {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| crate::error::SttError::ConfigError(format!("Failed to build HTTP client: {e}")))
}
