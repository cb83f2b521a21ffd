use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThreatFeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Feed '{alias}' is unusable: {reason}")]
    Feed { alias: String, reason: String },

    #[error("Fingerprint store error at {path}: {source}")]
    Store {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl ThreatFeedError {
    pub(crate) fn feed(alias: &str, reason: impl Into<String>) -> Self {
        Self::Feed {
            alias: alias.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn store(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Store {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ThreatFeedError>;
