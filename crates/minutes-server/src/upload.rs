use axum::body::Body;
use axum::extract::{FromRequest, Multipart};
use http::{Request, StatusCode};
use minutes_pipeline::UploadedAudio;

use crate::error::UploadRejection;

/// Form field names accepted for the audio file
const AUDIO_FIELDS: [&str; 2] = ["audio_file", "file"];

/// Extracts the uploaded recording from a `multipart/form-data` body
///
/// Parsing runs on the original request so the router's body limit applies;
/// an oversized upload is rejected with 413.
pub struct ExtractAudio(pub UploadedAudio);

impl<S> FromRequest<S> for ExtractAudio
where
    S: Send + Sync,
{
    type Rejection = UploadRejection;

    async fn from_request(request: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| UploadRejection::new(e.status(), format!("Failed to parse multipart form: {}", e.body_text())))?;

        loop {
            let field = multipart
                .next_field()
                .await
                .map_err(|e| UploadRejection::new(e.status(), format!("Failed to read multipart form: {}", e.body_text())))?;

            let Some(field) = field else {
                break;
            };

            if !field.name().is_some_and(|name| AUDIO_FIELDS.contains(&name)) {
                continue;
            }

            let filename = field.file_name().map(str::to_owned);
            let data = field
                .bytes()
                .await
                .map_err(|e| UploadRejection::new(e.status(), format!("Failed to read audio data: {}", e.body_text())))?;

            tracing::debug!(filename = filename.as_deref().unwrap_or_default(), bytes = data.len(), "audio received");

            return Ok(Self(UploadedAudio::new(filename, data)));
        }

        Err(UploadRejection::new(
            StatusCode::BAD_REQUEST,
            "Missing required 'audio_file' field in multipart form",
        ))
    }
}
