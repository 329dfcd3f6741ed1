mod catalog_config;
#[allow(clippy::module_inception)]
mod config;
mod logging_config;
mod server_config;
mod transcription_config;

pub(crate) use {
    catalog_config::CatalogConfig,
    config::Config,
    logging_config::{LogFormat, LoggingConfig},
    server_config::ServerConfig,
    transcription_config::TranscriptionConfig,
};

pub(crate) const DEFAULT_HOST: &str = "127.0.0.1";
pub(crate) const DEFAULT_PORT: u16 = 54321;
pub(crate) const DEFAULT_CATALOG_URL: &str = "https://librivox.org/api/feed/audiobooks/";
pub(crate) const DEFAULT_SEARCH_LIMIT: u32 = 50;
pub(crate) const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_TRANSCRIPTION_URL: &str = "https://api.openai.com/v1/audio/transcriptions";
pub(crate) const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";
pub(crate) const DEFAULT_TRANSCRIPTION_TIMEOUT_SECS: u64 = 60;
pub(crate) const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Environment variable naming an explicit config file.
pub(crate) const CONFIG_PATH_ENV: &str = "AUDIOBOOK_PROXY_CONFIG";
/// Environment variable overriding `transcription.api_key`.
pub(crate) const API_KEY_ENV: &str = "OPENAI_API_KEY";

pub(crate) fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

pub(crate) fn default_port() -> u16 {
    DEFAULT_PORT
}

pub(crate) fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

pub(crate) fn default_search_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

pub(crate) fn default_catalog_timeout_secs() -> u64 {
    DEFAULT_CATALOG_TIMEOUT_SECS
}

pub(crate) fn default_transcription_url() -> String {
    DEFAULT_TRANSCRIPTION_URL.to_string()
}

pub(crate) fn default_transcription_model() -> String {
    DEFAULT_TRANSCRIPTION_MODEL.to_string()
}

pub(crate) fn default_transcription_timeout_secs() -> u64 {
    DEFAULT_TRANSCRIPTION_TIMEOUT_SECS
}

pub(crate) fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}
