//! Configuration management for the audiobook proxy.
//!
//! Loads and saves a TOML file from the platform config directory (or the
//! path named by `AUDIOBOOK_PROXY_CONFIG`), creating it with defaults on
//! first run. Secrets can be supplied through the environment instead.

use crate::{
    ProxyError, ProxyResult,
    config::{
        API_KEY_ENV, CONFIG_PATH_ENV, CatalogConfig, LoggingConfig, ServerConfig,
        TranscriptionConfig,
    },
};

use std::{
    env, fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Upstream transcription settings.
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration, creating a default file if none exists, then
    /// apply environment overrides.
    #[track_caller]
    #[instrument]
    pub fn load() -> ProxyResult<Self> {
        let config_path = match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => Self::config_path()?,
        };

        let mut config = Self::load_or_create(&config_path)?;
        config.apply_api_key_override(env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    /// Read `path`, or write defaults there when it does not exist yet.
    #[track_caller]
    #[instrument]
    pub fn load_or_create(path: &Path) -> ProxyResult<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            info!(config_path = ?path, "No config found, creating default");
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Parse the TOML file at `path`.
    #[track_caller]
    #[instrument]
    pub fn load_from(path: &Path) -> ProxyResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| ProxyError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| ProxyError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?path, "Configuration loaded");

        Ok(config)
    }

    /// Save configuration to `path` using the atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames over the target.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, path: &Path) -> ProxyResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| ProxyError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
                debug!(config_dir = ?parent, "Created config directory");
            }
        }

        let temp_path = path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| ProxyError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| ProxyError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| ProxyError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, path).map_err(|e| ProxyError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Check the values the server cannot start without.
    ///
    /// A missing transcription key is not an error here: catalog routes
    /// still work, and `/transcribe-audio` reports the missing credential.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn validate(&self) -> ProxyResult<()> {
        if self.server.port == 0 {
            return Err(ProxyError::ConfigError {
                reason: "server.port must be non-zero".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Self::validate_url("catalog.base_url", &self.catalog.base_url)?;
        Self::validate_url("transcription.base_url", &self.transcription.base_url)?;

        if self.transcription.model.trim().is_empty() {
            return Err(ProxyError::ConfigError {
                reason: "transcription.model must not be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.transcription_api_key().is_none() {
            warn!("No transcription API key configured; /transcribe-audio will fail");
        }

        Ok(())
    }

    /// The configured transcription key, ignoring blank values.
    pub fn transcription_api_key(&self) -> Option<&str> {
        self.transcription
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Replace the transcription key when `value` is present and non-blank.
    pub(crate) fn apply_api_key_override(&mut self, value: Option<String>) {
        if let Some(key) = value.filter(|key| !key.trim().is_empty()) {
            debug!("Transcription API key taken from environment");
            self.transcription.api_key = Some(key);
        }
    }

    #[track_caller]
    fn validate_url(field: &str, url: &str) -> ProxyResult<()> {
        let url = url.trim();
        if url.is_empty() || !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ProxyError::ConfigError {
                reason: format!("{field} must be an http(s) URL, got {url:?}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    #[track_caller]
    fn config_path() -> ProxyResult<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "audiobook-proxy", "Audiobook-Proxy")
            .ok_or_else(|| ProxyError::ConfigError {
                reason: "Failed to get config directory".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}
