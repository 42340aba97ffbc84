//! Summarization engine trait and backend implementations

pub mod google;
pub mod local;
pub mod watsonx;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::SummarizeError;
use crate::types::{GenerationParams, PromptStyle, SummaryPrompt};

/// A backend that turns a prompt into a completion
///
/// Built once at startup and shared by every request.
#[async_trait]
pub trait SummarizationEngine: Send + Sync {
    /// Backend name used in logs and metrics
    fn name(&self) -> &str;

    /// Prompt framing this backend accepts
    fn prompt_style(&self) -> PromptStyle;

    /// Generate a completion for `prompt`
    async fn complete(&self, prompt: &SummaryPrompt, params: &GenerationParams) -> Result<String, SummarizeError>;
}

/// Send a prepared request and decode a JSON success body
pub(crate) async fn send_json<T: DeserializeOwned>(
    backend: &str,
    request: reqwest::RequestBuilder,
) -> Result<T, SummarizeError> {
    let response = request.send().await.map_err(|e| {
        tracing::error!(backend, error = %e, "summarization request failed");
        SummarizeError::from_transport(backend, &e)
    })?;

    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(backend, %status, "summarization backend returned error");
        return Err(SummarizeError::from_status(status.as_u16(), body));
    }

    response.json().await.map_err(|e| SummarizeError::from_decode(&e))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};

    use axum::Router;

    /// Last request body and URI seen by a mock backend
    #[derive(Default, Clone)]
    pub struct Recorded(pub Arc<Mutex<Option<(String, serde_json::Value)>>>);

    impl Recorded {
        pub fn set(&self, uri: String, body: serde_json::Value) {
            *self.0.lock().unwrap() = Some((uri, body));
        }

        pub fn take(&self) -> (String, serde_json::Value) {
            self.0.lock().unwrap().take().expect("no request recorded")
        }
    }

    pub async fn serve(router: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        addr
    }

    /// An address nothing is listening on
    pub fn closed_port() -> SocketAddr {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    }
}
