use std::time::Duration;

use minutes_config::RequestTimeout;
use reqwest::Client;

use crate::error::SummarizeError;

/// HTTP client shared by every call to one backend
pub(crate) fn http_client(timeout: RequestTimeout) -> Result<Client, SummarizeError> {
    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .pool_idle_timeout(Some(Duration::from_secs(30)))
        .tcp_nodelay(true);

    if let Some(timeout) = timeout.as_duration() {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| SummarizeError::Config(format!("failed to build HTTP client: {e}")))
}
