mod api_error;

pub(crate) use api_error::ApiError;

use std::{panic::Location, result::Result as StdResult};

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
};
use error_location::ErrorLocation;
use thiserror::Error;

/// Application-level errors for the audiobook proxy.
///
/// All variants include `ErrorLocation` for call-site tracking.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// The client sent something unusable.
    #[error("Bad request: {reason} {location}")]
    BadRequest {
        /// Message returned to the client.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// The requested resource does not exist upstream.
    #[error("Not found: {reason} {location}")]
    NotFound {
        /// Message returned to the client.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Upload body exceeded the configured limit.
    #[error("Payload too large: {reason} {location}")]
    PayloadTooLarge {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// The catalog service could not be reached.
    #[error("Upstream request failed: {source} {location}")]
    Upstream {
        /// The underlying HTTP client error.
        #[source]
        source: reqwest::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// The catalog service answered with a failure status.
    #[error("Upstream returned HTTP {status} {location}")]
    UpstreamStatus {
        /// HTTP status returned upstream.
        status: u16,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// The catalog service answered with a body we could not decode.
    #[error("Upstream response invalid: {reason} {location}")]
    UpstreamDecode {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// No transcription API key is configured.
    #[error("Transcription credential missing {location}")]
    MissingCredential {
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// The transcription service failed or rejected the upload.
    #[error("Transcription failed: {reason} {location}")]
    TranscriptionFailed {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Configuration loading or saving error.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// IO error from filesystem or socket operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

impl ProxyError {
    /// HTTP status reported to the client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ProxyError::NotFound { .. } => StatusCode::NOT_FOUND,
            ProxyError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::TranscriptionFailed { .. } => StatusCode::BAD_GATEWAY,
            ProxyError::Upstream { .. }
            | ProxyError::UpstreamStatus { .. }
            | ProxyError::UpstreamDecode { .. }
            | ProxyError::MissingCredential { .. }
            | ProxyError::ConfigError { .. }
            | ProxyError::IoError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The `error` string placed in the response body.
    ///
    /// Never includes upstream bodies, credentials or source locations.
    pub fn client_message(&self) -> String {
        match self {
            ProxyError::BadRequest { reason, .. }
            | ProxyError::NotFound { reason, .. }
            | ProxyError::PayloadTooLarge { reason, .. } => reason.clone(),
            ProxyError::Upstream { .. } => "Failed to reach LibriVox API".to_string(),
            ProxyError::UpstreamStatus { status, .. } => format!("LibriVox API error: {status}"),
            ProxyError::UpstreamDecode { .. } => "Invalid response from LibriVox API".to_string(),
            ProxyError::MissingCredential { .. } => "OpenAI API key not configured".to_string(),
            ProxyError::TranscriptionFailed { .. } => "Failed to transcribe audio".to_string(),
            ProxyError::ConfigError { .. } | ProxyError::IoError { .. } => {
                "Unexpected server error".to_string()
            }
        }
    }
}

impl From<std::io::Error> for ProxyError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        ProxyError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        ProxyError::Upstream {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<JsonRejection> for ProxyError {
    #[track_caller]
    fn from(rejection: JsonRejection) -> Self {
        ProxyError::BadRequest {
            reason: format!("Invalid JSON body: {}", rejection.body_text()),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<MultipartRejection> for ProxyError {
    #[track_caller]
    fn from(rejection: MultipartRejection) -> Self {
        ProxyError::BadRequest {
            reason: format!("Expected multipart form data: {}", rejection.body_text()),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<MultipartError> for ProxyError {
    #[track_caller]
    fn from(source: MultipartError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        if source.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ProxyError::PayloadTooLarge {
                reason: "Audio file too large".to_string(),
                location,
            }
        } else {
            ProxyError::BadRequest {
                reason: format!("Malformed multipart body: {}", source.body_text()),
                location,
            }
        }
    }
}

/// Convenience type alias for Results using `ProxyError`.
pub type Result<T> = StdResult<T, ProxyError>;
