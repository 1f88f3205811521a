use crate::config::{default_file_logging, default_log_filter};

use serde::{Deserialize, Serialize};

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Also write JSON logs to a daily rolling file in the data directory.
    #[serde(default = "default_file_logging")]
    pub file_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            file_logging: default_file_logging(),
        }
    }
}
