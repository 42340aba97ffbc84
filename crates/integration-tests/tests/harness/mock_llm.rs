//! Mock summarization backends
//!
//! One server answers the Gemini, watsonx and Ollama generation routes so a
//! test can point any backend at it.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

struct MockState {
    summary: String,
    fail_with: Option<StatusCode>,
    delay: Option<Duration>,
    request_count: AtomicU32,
    last_request: Mutex<Option<Value>>,
    last_path: Mutex<Option<String>>,
}

/// A running mock LLM server
pub struct MockLlm {
    addr: SocketAddr,
    state: Arc<MockState>,
    shutdown: CancellationToken,
}

impl MockLlm {
    /// Start a backend that answers every generation with `summary`
    pub async fn start(summary: &str) -> Self {
        Self::spawn(summary.to_owned(), None, None).await
    }

    /// Start a backend that rejects every generation with `status`
    pub async fn failing(status: StatusCode) -> Self {
        Self::spawn(String::new(), Some(status), None).await
    }

    /// Start a backend that answers with `summary` only after `delay`
    pub async fn slow(summary: &str, delay: Duration) -> Self {
        Self::spawn(summary.to_owned(), None, Some(delay)).await
    }

    async fn spawn(summary: String, fail_with: Option<StatusCode>, delay: Option<Duration>) -> Self {
        let state = Arc::new(MockState {
            summary,
            fail_with,
            delay,
            request_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
            last_path: Mutex::new(None),
        });

        let router = Router::new()
            .route("/v1beta/models/{action}", post(google_generate))
            .route("/ml/v1/text/generation", post(watsonx_generate))
            .route("/api/generate", post(ollama_generate))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock llm");
        let addr = listener.local_addr().expect("mock llm address");
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move { token.cancelled().await })
                .await
                .ok();
        });

        Self { addr, state, shutdown }
    }

    /// Base URL for the Google backend
    pub fn google_url(&self) -> String {
        format!("http://{}/v1beta", self.addr)
    }

    /// Base URL for the watsonx and local backends
    pub fn root_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::SeqCst)
    }

    /// JSON body of the most recent generation request
    pub fn last_request(&self) -> Option<Value> {
        self.state.last_request.lock().expect("request lock").clone()
    }

    /// Path segment of the most recent Gemini request (`model:generateContent`)
    pub fn last_google_action(&self) -> Option<String> {
        self.state.last_path.lock().expect("path lock").clone()
    }
}

impl Drop for MockLlm {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn record(state: &MockState, body: Value) -> Option<Response> {
    state.request_count.fetch_add(1, Ordering::SeqCst);
    *state.last_request.lock().expect("request lock") = Some(body);

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    state
        .fail_with
        .map(|status| (status, Json(json!({"error": {"message": "mock backend failure"}}))).into_response())
}

async fn google_generate(
    State(state): State<Arc<MockState>>,
    Path(action): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    *state.last_path.lock().expect("path lock") = Some(action);
    if let Some(rejection) = record(&state, body).await {
        return rejection;
    }

    Json(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": state.summary}]},
            "finishReason": "STOP"
        }]
    }))
    .into_response()
}

async fn watsonx_generate(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    if let Some(rejection) = record(&state, body).await {
        return rejection;
    }

    Json(json!({
        "model_id": "meta-llama/llama-3-3-70b-instruct",
        "results": [{"generated_text": state.summary, "stop_reason": "eos_token"}]
    }))
    .into_response()
}

async fn ollama_generate(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    if let Some(rejection) = record(&state, body).await {
        return rejection;
    }

    Json(json!({"model": "llama3.1", "response": state.summary, "done": true})).into_response()
}
