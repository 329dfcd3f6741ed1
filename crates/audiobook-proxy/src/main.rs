//! Audiobook proxy: CORS-enabled HTTP front for the LibriVox catalog and a
//! speech-to-text API, used by the audiobook player.

mod app;
mod config;
mod error;
mod handlers;
mod logging;
#[cfg(test)]
mod tests;
mod upstream;

pub(crate) use {
    app::{App, AppState},
    error::{ApiError, ProxyError, Result as ProxyResult},
    upstream::{AudioUpload, LibriVoxClient, Transcriber},
};

use crate::config::Config;

use tracing::{error, info};

/// Application entry point.
#[tokio::main]
async fn main() {
    // Logging settings live in the config file, so failures before the
    // subscriber exists go to stderr.
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    let _log_guard = match logging::init(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {:?}", e);
        std::process::exit(1);
    }

    info!(
        catalog = %config.catalog.base_url,
        transcription = %config.transcription.base_url,
        "Configuration ready"
    );

    let app = App { config };
    if let Err(e) = app.run().await {
        error!(error = ?e, "Server error");
        std::process::exit(1);
    }
}
