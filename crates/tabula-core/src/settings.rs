//! TOML-backed configuration
//!
//! Settings are read from `--config` or from `<config_dir>/tabula/config.toml`.
//! A missing default file is not an error; every field has a default.

use crate::{Credentials, Result, TabulaError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join("tabula"))
        .ok_or_else(|| TabulaError::Configuration("Could not determine config directory".into()))
}

pub fn default_config_file() -> Result<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

fn local_dir(sub: &str) -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tabula")
        .join(sub)
}

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub auth: Credentials,
    pub database: DatabaseSettings,
    pub console: ConsoleSettings,
    pub logging: LoggingSettings,
}

/// Where database files live and how they must be named
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Directory user-named database files are resolved against
    pub directory: PathBuf,
    /// Suffix every database name must carry
    pub required_suffix: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            directory: local_dir("databases"),
            required_suffix: ".db".to_string(),
        }
    }
}

/// Zebra-striping direction of the result grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Striping {
    /// Alternate by column index parity
    #[default]
    Column,
    /// Alternate by row index parity
    Row,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    pub striping: Striping,
    /// Line editor history; `None` disables persistence
    pub history_file: Option<PathBuf>,
    pub max_history: usize,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            striping: Striping::default(),
            history_file: Some(local_dir("history")),
            max_history: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default `EnvFilter` directive; `RUST_LOG` wins when set
    pub filter: String,
    pub log_dir: PathBuf,
    /// Write JSON logs to a daily rolling file
    pub file_logs: bool,
    /// Mirror logs to stderr
    pub console_logs: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "warn,tabula_cli=info,tabula_core=info,tabula_driver_sqlite=info".to_string(),
            log_dir: local_dir("logs"),
            file_logs: true,
            console_logs: false,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| TabulaError::Configuration(e.to_string()))
    }

    /// Load settings from `path`, or from the default location.
    ///
    /// An explicit path must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (default_config_file()?, false),
        };

        if !path.exists() {
            if required {
                return Err(TabulaError::Configuration(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path)?;
        let settings = Self::from_toml_str(&text).map_err(|e| {
            TabulaError::Configuration(format!("{}: {}", path.display(), e))
        })?;
        tracing::info!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Full path of a validated database file name
    pub fn database_path(&self, name: &str) -> PathBuf {
        self.database.directory.join(name)
    }
}
