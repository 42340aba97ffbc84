use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Upload could not be read from the request
#[derive(Debug)]
pub struct UploadRejection {
    status: StatusCode,
    message: String,
}

impl UploadRejection {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn error_type(&self) -> &'static str {
        match self.status {
            StatusCode::PAYLOAD_TOO_LARGE => "payload_too_large_error",
            StatusCode::UNSUPPORTED_MEDIA_TYPE | StatusCode::BAD_REQUEST => "invalid_request_error",
            _ => "internal_error",
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    message: String,
    r#type: String,
    code: u16,
}

impl IntoResponse for UploadRejection {
    fn into_response(self) -> Response {
        tracing::debug!(status = %self.status, message = %self.message, "upload rejected");

        let error_response = ErrorResponse {
            error: ErrorDetails {
                r#type: self.error_type().to_owned(),
                code: self.status.as_u16(),
                message: self.message,
            },
        };

        (self.status, Json(error_response)).into_response()
    }
}
