mod librivox;
mod transcriber;

pub(crate) use {
    librivox::LibriVoxClient,
    transcriber::{AudioUpload, Transcriber},
};

use crate::{ProxyError, ProxyResult};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use reqwest::Client;

const USER_AGENT: &str = concat!("audiobook-proxy/", env!("CARGO_PKG_VERSION"));

/// HTTP client shared shape for both upstream services.
#[track_caller]
pub(crate) fn build_http_client(timeout_secs: u64) -> ProxyResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ProxyError::ConfigError {
            reason: format!("Failed to build HTTP client: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
}
