use crate::{CatalogError, CoreResult, ProxyConnection};

use std::{
    collections::HashSet,
    panic::Location,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use error_location::ErrorLocation;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{info, instrument, warn};

#[derive(Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

/// Uploads recordings to the `transcribe-audio` proxy function.
///
/// At most one request per recording is in flight; a second call for the
/// same path while the first is pending fails with
/// [`CatalogError::AlreadyInFlight`].
#[derive(Debug, Clone)]
pub struct TranscriptionClient {
    connection: ProxyConnection,
    in_flight: Arc<Mutex<HashSet<PathBuf>>>,
}

/// Removes a recording from the in-flight set when dropped, whether the
/// request finished, failed or was cancelled.
struct InFlightGuard {
    in_flight: Arc<Mutex<HashSet<PathBuf>>>,
    path: PathBuf,
}

impl InFlightGuard {
    #[track_caller]
    fn acquire(in_flight: &Arc<Mutex<HashSet<PathBuf>>>, path: &Path) -> CoreResult<Self> {
        let mut set = in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !set.insert(path.to_path_buf()) {
            return Err(CatalogError::AlreadyInFlight {
                path: path.to_path_buf(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            in_flight: Arc::clone(in_flight),
            path: path.to_path_buf(),
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&self.path);
    }
}

impl TranscriptionClient {
    /// Transcription client for the proxy at `base_url`.
    #[track_caller]
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> CoreResult<Self> {
        Ok(Self::from_connection(ProxyConnection::new(
            base_url, anon_key,
        )?))
    }

    /// Transcription client sharing an existing connection.
    pub fn from_connection(connection: ProxyConnection) -> Self {
        Self {
            connection,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Upload the recording at `path` and return its transcript.
    #[instrument(skip(self))]
    pub async fn transcribe(&self, path: &Path) -> CoreResult<String> {
        let _guard = InFlightGuard::acquire(&self.in_flight, path)?;

        let bytes = tokio::fs::read(path).await.map_err(|e| CatalogError::Io {
            path: path.to_path_buf(),
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "recording".to_string());
        let byte_len = bytes.len();

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_for(path))?;
        let form = Form::new().part("file", part);

        let response = self
            .connection
            .post("transcribe-audio")
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Transcription request rejected");
            return Err(ProxyConnection::status_error(status, &body));
        }

        let result: TranscriptionResponse = ProxyConnection::decode(&body)?;
        info!(
            byte_len,
            text_len = result.text.len(),
            "Transcription received"
        );

        Ok(result.text)
    }
}

fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("m4a") => "audio/m4a",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("webm") => "audio/webm",
        Some("ogg") => "audio/ogg",
        Some("caf") => "audio/x-caf",
        _ => "application/octet-stream",
    }
}
