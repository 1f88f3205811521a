use crate::config::default_storage_key;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the meeting collection is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file backing the key-value store.
    pub path: PathBuf,

    /// Key the collection is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}
