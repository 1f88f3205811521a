use crate::config::default_max_write_attempts;

use serde::{Deserialize, Serialize};

/// Ledger write behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Read-modify-write attempts before a contended write gives up.
    #[serde(default = "default_max_write_attempts")]
    pub max_write_attempts: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_write_attempts: default_max_write_attempts(),
        }
    }
}
