//! Application configuration management.
//!
//! Handles loading, saving, and accessing the application configuration:
//! database location and pragmas, logging, registration form defaults, and
//! the blood banks inserted by bootstrap. Configuration is persisted as TOML
//! on disk and fixed for the lifetime of the process.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::constants::{BLOOD_GROUPS, DB_FILE_NAME, DEFAULT_BLOOD_BANK_CHOICES};
use crate::error::{DonorError, DonorResult};
use crate::platform::Platform;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Registration form defaults and choices.
    #[serde(default)]
    pub form: FormConfig,

    /// Blood banks inserted at startup if not already present.
    #[serde(default)]
    pub blood_banks: Vec<BloodBankSeed>,
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file. If empty, uses default location.
    #[serde(default)]
    pub path: String,

    /// Enable WAL (Write-Ahead Logging) mode.
    #[serde(default = "default_true")]
    pub wal_mode: bool,

    /// Maximum number of connections in the pool.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Run integrity check on startup.
    #[serde(default = "default_true")]
    pub integrity_check_on_startup: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

/// Registration form configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Blood group selected when the form is reset.
    #[serde(default = "default_blood_group")]
    pub default_blood_group: String,

    /// Blood bank names offered in the blood bank choice. The first entry is
    /// selected when the form is reset.
    #[serde(default = "default_blood_bank_choices")]
    pub blood_bank_choices: Vec<String>,
}

/// A blood bank row written by bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodBankSeed {
    /// Caller-supplied identifier.
    pub id: i64,
    /// Unique display name.
    pub name: String,
    /// Location text.
    pub location: String,
}

// Default value functions for serde

fn default_true() -> bool {
    true
}

fn default_pool_size() -> u32 {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_blood_group() -> String {
    BLOOD_GROUPS[0].to_string()
}

fn default_blood_bank_choices() -> Vec<String> {
    DEFAULT_BLOOD_BANK_CHOICES.iter().map(|s| s.to_string()).collect()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            wal_mode: true,
            pool_size: default_pool_size(),
            integrity_check_on_startup: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_blood_group: default_blood_group(),
            blood_bank_choices: default_blood_bank_choices(),
        }
    }
}

impl FormConfig {
    /// Blood bank selected when the form is reset, if any choices exist.
    pub fn default_blood_bank(&self) -> Option<&str> {
        self.blood_bank_choices.first().map(String::as_str)
    }
}

impl AppConfig {
    /// Load configuration from the default config file path.
    pub fn load_default() -> DonorResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> DonorResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> DonorResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| DonorError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> DonorResult<PathBuf> {
        let config_dir = Platform::config_dir()?;
        Ok(config_dir.join("config.toml"))
    }

    /// Get the effective database path, using the configured path or the default.
    pub fn effective_db_path(&self) -> DonorResult<PathBuf> {
        if self.database.path.is_empty() {
            let data_dir = Platform::data_dir()?;
            Ok(data_dir.join(DB_FILE_NAME))
        } else {
            Ok(PathBuf::from(&self.database.path))
        }
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> DonorResult<PathBuf> {
        if self.logging.directory.is_empty() {
            let data_dir = Platform::data_dir()?;
            Ok(data_dir.join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Reject configurations that would break the registration form or the
    /// blood bank bootstrap.
    pub fn validate(&self) -> DonorResult<()> {
        if !BLOOD_GROUPS.contains(&self.form.default_blood_group.as_str()) {
            return Err(DonorError::Config(format!(
                "form.default_blood_group \"{}\" is not one of {}",
                self.form.default_blood_group,
                BLOOD_GROUPS.join(", ")
            )));
        }

        if self.database.pool_size == 0 {
            return Err(DonorError::Config("database.pool_size must be at least 1".into()));
        }

        for seed in &self.blood_banks {
            if seed.name.trim().is_empty() || seed.location.trim().is_empty() {
                return Err(DonorError::Config(format!(
                    "blood bank {} needs a non-empty name and location",
                    seed.id
                )));
            }
        }

        Ok(())
    }
}
