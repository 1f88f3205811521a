use meet_tracker_core::LedgerError;

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Application-level errors for the meet-tracker host.
///
/// All variants include `ErrorLocation` for call-site tracking.
#[derive(Error, Debug)]
pub enum AppError {
    /// Ledger error from meet-tracker-core.
    #[error("Ledger error: {source} {location}")]
    Ledger {
        /// The underlying ledger error.
        #[source]
        source: LedgerError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// A native-messaging frame could not be read, decoded or encoded.
    #[error("Protocol error: {reason} {location}")]
    Protocol {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Failed to send message through async channel.
    #[error("Channel send failed: {message} {location}")]
    ChannelSendFailed {
        /// Human-readable error message.
        message: String,
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

    /// Tracing subscriber could not be installed.
    #[error("Logging setup failed: {reason} {location}")]
    LoggingInit {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// IO error from filesystem or stdio operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

// Manual From<LedgerError> with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<LedgerError> for AppError {
    #[track_caller]
    fn from(source: LedgerError) -> Self {
        AppError::Ledger {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for AppError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        AppError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convenience type alias for Results using `AppError`.
pub type Result<T> = StdResult<T, AppError>;
