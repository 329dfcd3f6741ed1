use std::{panic::Location, path::PathBuf};

use error_location::ErrorLocation;
use thiserror::Error;

/// Catalog, search and transcription client errors with source location tracking.
///
/// The playback controller has no error type: guard violations are no-ops
/// and transport failures surface as an unloaded status.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Proxy base URL is empty or not http(s).
    #[error("Invalid proxy URL: {reason} {location}")]
    InvalidUrl {
        /// Why the URL was rejected.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// HTTP request could not be sent or its body could not be read.
    #[error("Request failed: {source} {location}")]
    Request {
        /// Underlying error from reqwest.
        #[source]
        source: reqwest::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Proxy answered with a non-success status.
    #[error("Proxy returned status {status}: {message} {location}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message taken from the proxy's `error` field.
        message: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Response body did not match the expected shape.
    #[error("Failed to decode response: {reason} {location}")]
    Decode {
        /// Description of the decode failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Local audio file could not be read.
    #[error("Failed to read audio file {path:?}: {source} {location}")]
    Io {
        /// Path of the recording.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A transcription for this recording is already pending.
    #[error("Transcription already in flight for {path:?} {location}")]
    AlreadyInFlight {
        /// Path of the recording.
        path: PathBuf,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl From<reqwest::Error> for CatalogError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        CatalogError::Request {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias using [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;
