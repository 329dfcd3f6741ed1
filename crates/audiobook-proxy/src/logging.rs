use crate::{
    ProxyError, ProxyResult,
    config::{LogFormat, LoggingConfig},
};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt::writer::BoxMakeWriter};

/// Filter used when `RUST_LOG` is unset.
pub(crate) const DEFAULT_LOG_FILTER: &str =
    "audiobook_proxy=debug,audiobook_core=debug,tower_http=info";

const LOG_FILE_PREFIX: &str = "audiobook-proxy.log";

/// Install the global subscriber.
///
/// Returns the file writer guard when logging to a directory; it must be
/// held until shutdown or buffered lines are lost.
#[track_caller]
pub(crate) fn init(config: &LoggingConfig) -> ProxyResult<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let (writer, guard) = match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer);

    let installed = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| ProxyError::ConfigError {
        reason: format!("Failed to initialize logging: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    Ok(guard)
}
