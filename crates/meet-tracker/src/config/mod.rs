mod badge_config;
#[allow(clippy::module_inception)]
mod config;
mod ledger_config;
mod logging_config;
mod storage_config;

pub(crate) use {
    badge_config::BadgeConfig, config::Config, ledger_config::LedgerConfig,
    logging_config::LoggingConfig, storage_config::StorageConfig,
};

use meet_tracker_core::{
    DEFAULT_ACTIVE_COLOR, DEFAULT_COMPLETED_COLOR, DEFAULT_MAX_WRITE_ATTEMPTS, DEFAULT_STORAGE_KEY,
};

pub(crate) const DEFAULT_LOG_FILTER: &str = "meet_tracker=info,meet_tracker_core=info";
pub(crate) const DEFAULT_FILE_LOGGING: bool = true;

pub(crate) fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

pub(crate) fn default_max_write_attempts() -> u32 {
    DEFAULT_MAX_WRITE_ATTEMPTS
}

pub(crate) fn default_active_color() -> String {
    DEFAULT_ACTIVE_COLOR.to_string()
}

pub(crate) fn default_completed_color() -> String {
    DEFAULT_COMPLETED_COLOR.to_string()
}

pub(crate) fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

pub(crate) fn default_file_logging() -> bool {
    DEFAULT_FILE_LOGGING
}
