//! Configuration management for meet-tracker.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{BadgeConfig, LedgerConfig, LoggingConfig, StorageConfig, default_storage_key},
};

use std::{fs, io::Write, panic::Location, path::PathBuf};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const STORAGE_FILE_NAME: &str = "meetings.json";
const LOG_DIR_NAME: &str = "logs";

/// Main configuration struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Persisted collection location.
    pub storage: StorageConfig,
    /// Ledger write behavior.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Toolbar badge appearance.
    #[serde(default)]
    pub badge: BadgeConfig,
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    ///
    /// Runs before logging is installed, so the caller reports the outcome.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            Self::from_toml_str(&contents)
        } else {
            Self::create_default()
        }
    }

    /// Parse configuration from TOML text.
    #[track_caller]
    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        toml::from_str(contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Make sure the storage file's directory exists.
    ///
    /// Called once at startup so the first write does not fail on a
    /// missing directory.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn prepare_storage_dir(&self) -> AppResult<()> {
        let Some(parent) = self.storage.path.parent() else {
            return Err(AppError::ConfigError {
                reason: format!("Storage path has no parent: {:?}", self.storage.path),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
            debug!(storage_dir = ?parent, "Created storage directory");
        }

        Ok(())
    }

    /// Save configuration to disk using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;

        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Atomic write: write to temp file then rename
        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Directory for rolling log files.
    #[track_caller]
    pub fn log_dir() -> AppResult<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().join(LOG_DIR_NAME))
    }

    /// Path of the configuration file.
    #[track_caller]
    pub fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from("com", "meet-tracker", "Meet-Tracker").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get project directories".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    #[track_caller]
    fn create_default() -> AppResult<Self> {
        let proj_dirs = Self::project_dirs()?;

        let config = Config {
            storage: StorageConfig {
                path: proj_dirs.data_dir().join(STORAGE_FILE_NAME),
                key: default_storage_key(),
            },
            ledger: LedgerConfig::default(),
            badge: BadgeConfig::default(),
            logging: LoggingConfig::default(),
        };

        config.save()?;

        Ok(config)
    }
}
