//! JSON-file key-value store.
//!
//! One file holds a JSON object mapping storage keys to values. Values that
//! are JSON objects or arrays are embedded as JSON so the file stays
//! readable; anything else is kept as a string, verbatim.

use meet_tracker_core::{CoreResult, KeyValueStore, LedgerError};

use std::{
    io::ErrorKind,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use serde_json::{Map, Value};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, instrument, warn};

/// Key-value store persisted as a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by the file at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents, or `None` when there is nothing stored yet.
    async fn read_contents(&self, key: &str) -> CoreResult<Option<String>> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(None),
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LedgerError::StoreRead {
                key: key.to_string(),
                reason: format!("Failed to read {:?}: {}", self.path, e),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    async fn read_entries(&self, key: &str) -> CoreResult<Map<String, Value>> {
        let Some(contents) = self.read_contents(key).await? else {
            return Ok(Map::new());
        };

        serde_json::from_str(&contents).map_err(|e| LedgerError::StoreRead {
            key: key.to_string(),
            reason: format!("Failed to parse {:?}: {}", self.path, e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Entries to write back over. An unparseable file is moved aside and
    /// replaced, so one bad write does not block every later one.
    async fn entries_for_write(&self, key: &str) -> CoreResult<Map<String, Value>> {
        let Some(contents) = self.read_contents(key).await? else {
            return Ok(Map::new());
        };

        match serde_json::from_str::<Map<String, Value>>(&contents) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                let aside = self.corrupt_path();
                warn!(error = %e, path = ?self.path, aside = ?aside, "Store file unreadable, moving it aside");

                fs::rename(&self.path, &aside)
                    .await
                    .map_err(|e| LedgerError::StoreWrite {
                        key: key.to_string(),
                        reason: format!("Failed to move corrupt store file aside: {}", e),
                        location: ErrorLocation::from(Location::caller()),
                    })?;

                Ok(Map::new())
            }
        }
    }

    /// Where an unreadable store file is kept for inspection.
    pub fn corrupt_path(&self) -> PathBuf {
        self.path.with_extension("json.corrupt")
    }

    /// Atomic write: write to temp file then rename.
    async fn write_entries(&self, key: &str, entries: &Map<String, Value>) -> CoreResult<()> {
        let write_error = |reason: String| LedgerError::StoreWrite {
            key: key.to_string(),
            reason,
            location: ErrorLocation::from(Location::caller()),
        };

        let contents = serde_json::to_vec_pretty(entries).map_err(|source| {
            LedgerError::Serialization {
                source,
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let temp_path = self.path.with_extension("json.tmp");

        let mut temp_file = fs::File::create(&temp_path)
            .await
            .map_err(|e| write_error(format!("Failed to create temp store file: {}", e)))?;

        temp_file
            .write_all(&contents)
            .await
            .map_err(|e| write_error(format!("Failed to write temp store file: {}", e)))?;

        temp_file
            .sync_all()
            .await
            .map_err(|e| write_error(format!("Failed to sync temp store file: {}", e)))?;

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| write_error(format!("Failed to rename temp store file: {}", e)))?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    #[instrument(skip(self), fields(path = ?self.path))]
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let mut entries = self.read_entries(key).await?;

        Ok(entries.remove(key).map(|value| match value {
            Value::String(text) => text,
            other => other.to_string(),
        }))
    }

    #[instrument(skip(self, value), fields(path = ?self.path, bytes = value.len()))]
    async fn set(&self, key: &str, value: String) -> CoreResult<()> {
        let mut entries = self.entries_for_write(key).await?;

        let stored = match serde_json::from_str::<Value>(&value) {
            Ok(json @ (Value::Object(_) | Value::Array(_))) => json,
            _ => Value::String(value),
        };
        entries.insert(key.to_string(), stored);

        self.write_entries(key, &entries).await?;

        debug!(key, "Store entry written");

        Ok(())
    }
}
