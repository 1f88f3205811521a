//! Tracing subscriber setup.
//!
//! Stdout carries native-messaging frames, so human-readable logs go to
//! stderr (the browser collects it) and, optionally, JSON logs to a daily
//! rolling file.

use crate::{AppError, AppResult, config::LoggingConfig};

use std::{panic::Location, path::Path};

use error_location::ErrorLocation;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "meet-tracker";
const LOG_FILE_SUFFIX: &str = "log";

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the configured filter. The returned guard flushes
/// the file writer on drop and must live until shutdown.
#[track_caller]
pub(crate) fn init(config: &LoggingConfig, log_dir: Option<&Path>) -> AppResult<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| AppError::LoggingInit {
            reason: format!("Invalid log filter {:?}: {}", config.filter, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let (file_layer, guard) = match log_dir {
        Some(dir) if config.file_logging => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .filename_suffix(LOG_FILE_SUFFIX)
                .build(dir)
                .map_err(|e| AppError::LoggingInit {
                    reason: format!("Failed to open log directory {:?}: {}", dir, e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().json().with_writer(writer)),
                Some(guard),
            )
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::LoggingInit {
            reason: format!("Failed to install subscriber: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(guard)
}
