//! Configuration module for camsh
//!
//! Settings live in `<config dir>/camsh/config.toml` and can be overridden
//! per invocation with `CAMSH_*` environment variables (`CAMSH_RECURSE=false`,
//! `CAMSH_LOGGING__LEVEL=debug`). Command-line flags take precedence over
//! both.

mod setup;

pub use setup::setup_wizard;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::actions::{FilenamePattern, RetryPolicy, filename};
use crate::logging::LoggingConfig;
use crate::range::{DEFAULT_CAPACITY, MAX_CAPACITY};
use crate::store::FolderPath;

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "CAMSH";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CamshConfig {
    /// Directory used as the store when `--store` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<PathBuf>,

    /// Folder commands start from
    #[serde(default = "default_folder")]
    pub folder: String,

    /// Descend into subfolders
    #[serde(default = "default_true")]
    pub recurse: bool,

    /// Process items and folders in reverse order
    #[serde(default)]
    pub reverse: bool,

    /// Highest item number a range expression may use
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Local filename pattern for saved items
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Replace existing local files when saving
    #[serde(default)]
    pub overwrite: bool,

    /// Retries when the device reports busy during a delete
    #[serde(default = "default_busy_retries")]
    pub busy_retries: u32,

    /// Base delay between busy retries, doubled on every attempt
    #[serde(default = "default_busy_retry_delay_ms")]
    pub busy_retry_delay_ms: u64,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_folder() -> String {
    "/".to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_filename() -> String {
    filename::DEFAULT_PATTERN.to_string()
}

const fn default_busy_retries() -> u32 {
    3
}

const fn default_busy_retry_delay_ms() -> u64 {
    250
}

impl Default for CamshConfig {
    fn default() -> Self {
        Self {
            store: None,
            folder: default_folder(),
            recurse: default_true(),
            reverse: false,
            capacity: default_capacity(),
            quiet: false,
            filename: default_filename(),
            overwrite: false,
            busy_retries: default_busy_retries(),
            busy_retry_delay_ms: default_busy_retry_delay_ms(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CamshConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("camsh").join("config.toml"))
    }

    /// Load the config file with environment overrides, creating a default
    /// file if none exists
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, created or
    /// fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?, Some(Environment::with_prefix(ENV_PREFIX)))
    }

    /// Load the config file alone, ignoring the environment
    ///
    /// Used when the file is about to be edited, so overrides are not
    /// written back.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_file() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?, None)
    }

    /// Load from `path`, layering `env` on top
    ///
    /// A missing file is created with default values first.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_from(path: &Path, env: Option<Environment>) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::default().save_to(path)?;
        }

        let mut builder =
            Config::builder().add_source(File::from(path.to_path_buf()).format(FileFormat::Toml));
        if let Some(env) = env {
            builder = builder.add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Same as [`save`](Self::save).
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Check values serde cannot check on its own
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` naming the first invalid key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::Message("capacity must be at least 1".to_string()));
        }
        if self.capacity > MAX_CAPACITY {
            return Err(ConfigError::Message(format!(
                "capacity must be at most {MAX_CAPACITY}"
            )));
        }
        FolderPath::parse(&self.folder)
            .map_err(|e| ConfigError::Message(format!("folder: {e}")))?;
        FilenamePattern::parse(&self.filename)
            .map_err(|e| ConfigError::Message(format!("filename: {e}")))?;
        Ok(())
    }

    /// Value of a dotted key (`recurse`, `logging.level`) rendered as text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for unknown or unset keys.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let table = self.to_table()?;
        let value = lookup(&table, key).ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        Ok(match value {
            toml::Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }

    /// Set a dotted key from text, keeping the existing value's type
    ///
    /// Does not save; call [`save`](Self::save) afterwards.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys, values of the wrong type, or
    /// values that fail validation.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut table = self.to_table()?;
        let (section, field) = match key.split_once('.') {
            Some((section, field)) => (Some(section), field),
            None => (None, key),
        };

        let target = match section {
            Some(section) => table
                .get_mut(section)
                .and_then(toml::Value::as_table_mut)
                .ok_or_else(|| ConfigError::NotFound(key.to_string()))?,
            None => &mut table,
        };
        let parsed = match target.get(field) {
            Some(existing) => parse_like(existing, value)
                .ok_or_else(|| ConfigError::Message(format!("Invalid value for {key}: '{value}'")))?,
            // store is optional and omitted while unset
            None if section.is_none() && field == "store" => toml::Value::String(value.to_string()),
            None => return Err(ConfigError::NotFound(key.to_string())),
        };
        target.insert(field.to_string(), parsed);

        let updated: Self = toml::Value::Table(table)
            .try_into()
            .map_err(|e| ConfigError::Message(format!("Invalid value for {key}: {e}")))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Retry policy for busy devices
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.busy_retries, Duration::from_millis(self.busy_retry_delay_ms))
    }

    fn to_table(&self) -> Result<toml::Table, ConfigError> {
        match toml::Value::try_from(self) {
            Ok(toml::Value::Table(table)) => Ok(table),
            Ok(_) => Err(ConfigError::Message("Config did not serialize to a table".to_string())),
            Err(e) => Err(ConfigError::Message(format!("Failed to serialize config: {e}"))),
        }
    }
}

fn lookup<'t>(table: &'t toml::Table, key: &str) -> Option<&'t toml::Value> {
    let mut parts = key.split('.');
    let mut value = table.get(parts.next()?)?;
    for part in parts {
        value = value.as_table()?.get(part)?;
    }
    Some(value)
}

/// Parse `text` as the same TOML type as `existing`
fn parse_like(existing: &toml::Value, text: &str) -> Option<toml::Value> {
    let text = text.trim();
    match existing {
        toml::Value::Boolean(_) => text.parse().ok().map(toml::Value::Boolean),
        toml::Value::Integer(_) => text.parse().ok().map(toml::Value::Integer),
        toml::Value::String(_) => Some(toml::Value::String(text.to_string())),
        _ => None,
    }
}
