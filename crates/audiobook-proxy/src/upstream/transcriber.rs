use crate::{
    ProxyError, ProxyResult, config::TranscriptionConfig, upstream::build_http_client,
};

use std::panic::Location;

use error_location::ErrorLocation;
use reqwest::{
    Client,
    multipart::{Form, Part},
};
use serde::Deserialize;
use tracing::{error, info, instrument};

/// An audio file received from a client, ready to forward.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    /// Original file name; the upstream API uses its extension.
    pub file_name: String,
    /// Declared MIME type, if the client sent one.
    pub content_type: Option<String>,
    /// Raw audio bytes.
    pub bytes: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct TranscriptionBody {
    #[serde(default)]
    text: Option<String>,
}

/// Client for an OpenAI-compatible transcription endpoint.
///
/// The API key is never logged and never returned to callers.
#[derive(Clone)]
pub struct Transcriber {
    http: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl Transcriber {
    /// Build a transcriber from config. A blank key counts as missing.
    #[track_caller]
    pub fn new(config: &TranscriptionConfig) -> ProxyResult<Self> {
        Ok(Self {
            http: build_http_client(config.timeout_secs)?,
            endpoint: config.base_url.trim().to_string(),
            model: config.model.clone(),
            api_key: config
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string),
        })
    }

    /// Forward `upload` and return the transcript text (empty when the
    /// service returns none).
    #[instrument(skip(self, upload), fields(file_name = %upload.file_name, bytes = upload.bytes.len()))]
    pub async fn transcribe(&self, upload: AudioUpload) -> ProxyResult<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProxyError::MissingCredential {
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let mut part = Part::bytes(upload.bytes).file_name(upload.file_name);
        if let Some(content_type) = upload.content_type.as_deref() {
            part = part.mime_str(content_type).map_err(|_| ProxyError::BadRequest {
                reason: "Invalid audio content type".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;
        }

        let form = Form::new()
            .part("file", part)
            .text("model", self.model.clone());

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Self::failed(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Transcription API rejected upload");
            return Err(Self::failed(format!("Upstream returned HTTP {status}")));
        }

        let body: TranscriptionBody = response
            .json()
            .await
            .map_err(|e| Self::failed(format!("Failed to parse response: {e}")))?;

        let text = body.text.unwrap_or_default();
        info!(chars = text.len(), "Transcription complete");
        Ok(text)
    }

    #[track_caller]
    fn failed(reason: String) -> ProxyError {
        ProxyError::TranscriptionFailed {
            reason,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
