//! Configuration for threat-feed.
//!
//! Read from `~/.config/threat-feed/config.toml`. If the file doesn't exist, a
//! default configuration with comments is created. Missing keys fall back to
//! their defaults.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name of the fingerprint store inside the data directory.
pub const STORE_FILE_NAME: &str = "post_id.db";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub fetcher: FetcherConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Fingerprint store location; `None` means the per-user data directory.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: format!("threat-feed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_config_path()?)
    }

    /// Load configuration from `config_path`.
    ///
    /// If the file doesn't exist, creates a default one with comments.
    /// If the file exists but is invalid, returns an error.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/threat-feed/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("threat-feed").join("config.toml"))
    }

    /// Resolve the fingerprint store path, creating the default data
    /// directory when no explicit path is configured.
    pub fn store_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.store.path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
        let app_dir = data_dir.join("threat-feed");
        fs::create_dir_all(&app_dir).map_err(|e| ConfigError::Io {
            path: app_dir.clone(),
            source: e,
        })?;
        Ok(app_dir.join(STORE_FILE_NAME))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!("Wrote default configuration to {}", path.display());
        Ok(())
    }

    fn default_config_content() -> String {
        r##"# threat-feed configuration

[store]
# Append-only file of announced post fingerprints, one per line.
# If it is lost, rebuild it with `threat-feed recon <archive>`.
# Defaults to <data dir>/threat-feed/post_id.db
# path = "/var/lib/threat-feed/post_id.db"

[fetcher]
# Per-request timeout in seconds
timeout_secs = 10

# User-Agent header sent to feed hosts
user_agent = "threat-feed/0.1.0"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
