use crate::{
    LibriVoxClient, ProxyError, ProxyResult, Transcriber,
    config::Config,
    handlers::{get_audiobook, health, method_not_allowed, search_audiobooks, transcribe_audio},
};

use std::{panic::Location, sync::Arc};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{
        HeaderName, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post},
};
use error_location::ErrorLocation;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, instrument};

/// Shared handler state: one client per upstream service.
pub struct AppState {
    pub(crate) catalog: LibriVoxClient,
    pub(crate) transcriber: Transcriber,
    pub(crate) default_limit: u32,
    pub(crate) max_upload_bytes: usize,
}

impl AppState {
    /// Build upstream clients from `config`.
    #[track_caller]
    pub fn new(config: &Config) -> ProxyResult<Self> {
        Ok(Self {
            catalog: LibriVoxClient::new(&config.catalog)?,
            transcriber: Transcriber::new(&config.transcription)?,
            default_limit: config.catalog.default_limit,
            max_upload_bytes: config.transcription.max_upload_bytes,
        })
    }
}

/// Browser clients call every route cross-origin.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ])
}

/// The full route table with CORS and request tracing applied.
pub fn build_router(state: Arc<AppState>) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route(
            "/search-audiobooks",
            post(search_audiobooks).fallback(method_not_allowed),
        )
        .route(
            "/get-audiobook",
            post(get_audiobook).fallback(method_not_allowed),
        )
        .route(
            "/transcribe-audio",
            post(transcribe_audio)
                .fallback(method_not_allowed)
                .layer(upload_limit),
        )
        .route("/health", get(health))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The running proxy server.
pub struct App {
    pub(crate) config: Config,
}

impl App {
    /// Bind the configured address and serve until Ctrl-C.
    #[instrument(skip(self), fields(address = %self.config.server.bind_address()))]
    pub async fn run(self) -> ProxyResult<()> {
        let state = Arc::new(AppState::new(&self.config)?);
        let router = build_router(state);

        let address = self.config.server.bind_address();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|e| ProxyError::ConfigError {
                reason: format!("Failed to bind {address}: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(address = %address, "Audiobook proxy listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Audiobook proxy stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = ?e, "Failed to listen for shutdown signal");
    }
}
