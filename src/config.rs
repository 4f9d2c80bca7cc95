//! Rota configuration.
//!
//! The last cadence used by `rota generate` is kept in `~/.rota/config.toml`
//! so the next run can omit flags:
//!
//! ```toml
//! saved-at = "2026-10-17T09:30:00Z"
//!
//! [cadence]
//! work-days = 14
//! rest-days = 7
//! induction-days = 5
//! horizon-days = 40
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::model::Cadence;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = core::result::Result<T, ConfigError>;

/// Persisted configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// When the cadence was last saved.
    pub saved_at: Option<Timestamp>,

    /// Last cadence used.
    pub cadence: Cadence,
}

impl Config {
    pub fn new(cadence: Cadence) -> Self {
        Self {
            saved_at: Some(Timestamp::now()),
            cadence,
        }
    }
}

/// Reads and writes the config file at a fixed path.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The default config path: `~/.rota/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".rota").join("config.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved config. `None` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<Config>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(config))
    }

    /// Write the config, creating the parent directory if needed.
    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let contents = toml::to_string(config)?;
        fs::write(&self.path, contents).map_err(|e| self.io_error(e))
    }

    /// Remove the saved config. Returns whether a file was removed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn io_error(&self, source: io::Error) -> ConfigError {
        ConfigError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
