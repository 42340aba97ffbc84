use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use minutes_pipeline::{Pipeline, ProcessResult};

use crate::upload::ExtractAudio;

/// `POST /process`
///
/// The pipeline runs in its own task, so a client that disconnects does not
/// cancel transcription or summarization midway.
pub async fn process_handler(State(pipeline): State<Arc<Pipeline>>, ExtractAudio(upload): ExtractAudio) -> Response {
    let task = tokio::spawn(async move { pipeline.process(upload).await });

    match task.await {
        Ok(Ok(result)) => Json(result).into_response(),
        Ok(Err(e)) => e.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "processing task aborted");
            Json(ProcessResult::failed(None, "unexpected internal error")).into_response()
        }
    }
}
