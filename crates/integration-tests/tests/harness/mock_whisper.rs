//! Mock OpenAI-compatible transcription server

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// How the mock answers `/v1/audio/transcriptions`
#[derive(Clone)]
pub enum WhisperBehavior {
    /// Return these segment texts in order
    Segments(Vec<&'static str>),
    /// Return the uploaded bytes, read as UTF-8, as a single segment
    Echo,
    /// Fail with this status and body
    Fail(StatusCode, &'static str),
}

struct MockState {
    behavior: WhisperBehavior,
    request_count: AtomicU32,
    last_fields: Mutex<Vec<(String, String)>>,
}

/// A running mock whisper server
pub struct MockWhisper {
    addr: SocketAddr,
    state: Arc<MockState>,
    shutdown: CancellationToken,
}

impl MockWhisper {
    pub async fn start(behavior: WhisperBehavior) -> Self {
        let state = Arc::new(MockState {
            behavior,
            request_count: AtomicU32::new(0),
            last_fields: Mutex::new(Vec::new()),
        });

        let router = Router::new()
            .route("/v1/audio/transcriptions", post(transcriptions))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock whisper");
        let addr = listener.local_addr().expect("mock whisper address");
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

    /// Base URL including the `/v1` prefix
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::SeqCst)
    }

    /// Value of a form field from the most recent request
    pub fn last_field(&self, name: &str) -> Option<String> {
        self.state
            .last_fields
            .lock()
            .expect("fields lock")
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }
}

impl Drop for MockWhisper {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn transcriptions(State(state): State<Arc<MockState>>, mut multipart: Multipart) -> Response {
    state.request_count.fetch_add(1, Ordering::SeqCst);

    let mut fields = Vec::new();
    let mut audio = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_owned();
        if name == "file" {
            let filename = field.file_name().unwrap_or_default().to_owned();
            audio = field.bytes().await.unwrap_or_default().to_vec();
            fields.push(("filename".to_owned(), filename));
        } else {
            fields.push((name, field.text().await.unwrap_or_default()));
        }
    }
    *state.last_fields.lock().expect("fields lock") = fields;

    match &state.behavior {
        WhisperBehavior::Segments(texts) => {
            let segments: Vec<_> = texts
                .iter()
                .enumerate()
                .map(|(i, text)| json!({"id": i, "start": i, "end": i + 1, "text": text}))
                .collect();
            Json(json!({"text": texts.concat(), "segments": segments})).into_response()
        }
        WhisperBehavior::Echo => {
            let text = String::from_utf8_lossy(&audio).into_owned();
            Json(json!({"text": text, "segments": [{"id": 0, "start": 0.0, "end": 1.0, "text": text}]}))
                .into_response()
        }
        WhisperBehavior::Fail(status, body) => (*status, *body).into_response(),
    }
}
