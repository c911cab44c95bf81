//! Derivation settings for the `hdkeys` binary.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hd::FULL_FUNDRAISER_PATH;

/// Environment variable overriding [`DerivationConfig::path`]
pub const ENV_PATH: &str = "HDKEYS_PATH";
/// Environment variable overriding [`DerivationConfig::passphrase`]
pub const ENV_PASSPHRASE: &str = "HDKEYS_PASSPHRASE";
/// Environment variable overriding [`DerivationConfig::log_level`]
pub const ENV_LOG: &str = "HDKEYS_LOG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed
        path: String,
        /// Underlying error
        source: std::io::Error,
    },
    /// Config file is not valid JSON for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Derivation configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivationConfig {
    /// Path walked from the master key
    pub path: String,
    /// BIP-39 passphrase mixed into the seed
    pub passphrase: String,
    /// Log filter directive (`error`, `info`, `hdkeys=debug`, ...)
    pub log_level: String,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            path: FULL_FUNDRAISER_PATH.to_string(),
            passphrase: String::new(),
            log_level: "info".to_string(),
        }
    }
}

impl DerivationConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parse from a JSON string
    ///
    /// # Errors
    /// Returns error if the JSON does not match the schema
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Override fields from `HDKEYS_*` environment variables
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(ENV_PATH) {
            self.path = path;
        }
        if let Some(passphrase) = lookup(ENV_PASSPHRASE) {
            self.passphrase = passphrase;
        }
        if let Some(level) = lookup(ENV_LOG) {
            self.log_level = level;
        }
        self
    }
}
