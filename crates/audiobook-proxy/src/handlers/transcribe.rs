use crate::{ApiError, AppState, AudioUpload, ProxyError, ProxyResult};

use std::{panic::Location, sync::Arc};

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use error_location::ErrorLocation;
use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub(crate) struct TranscriptionResponse {
    text: String,
}

/// Forward an uploaded recording to the transcription service.
#[instrument(skip(state, multipart), fields(request_id = %Uuid::new_v4()))]
pub(crate) async fn transcribe_audio(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::plain(ProxyError::from(e)))?;

    let upload = read_audio_field(&mut multipart)
        .await
        .map_err(ApiError::plain)?
        .ok_or_else(|| {
            ApiError::plain(ProxyError::BadRequest {
                reason: "Missing audio file".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
        })?;

    let text = state
        .transcriber
        .transcribe(upload)
        .await
        .map_err(ApiError::plain)?;

    Ok(Json(TranscriptionResponse { text }))
}

/// First `file` field that carries a file name. Plain text fields named
/// `file` do not count as an upload.
async fn read_audio_field(multipart: &mut Multipart) -> ProxyResult<Option<AudioUpload>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            debug!("Ignoring non-file value in file field");
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        debug!(file_name = %file_name, bytes = bytes.len(), "Audio upload received");
        return Ok(Some(AudioUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}
