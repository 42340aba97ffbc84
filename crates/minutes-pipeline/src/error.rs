use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::result::ProcessResult;
use crate::storage::StorageError;

/// Failures that end a request before any engine runs
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The upload could not be persisted
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PipelineError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to expose to clients
    pub fn client_message(&self) -> String {
        match self {
            Self::Storage(_) => "failed to store the uploaded audio".to_owned(),
        }
    }
}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed before processing");

        let body = ProcessResult::failed(None, self.client_message());

        (self.status_code(), Json(body)).into_response()
    }
}
