use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::pipeline::Pipeline;
use crate::store::FileStore;

/// Wires configuration, the durable store and the HTTP fetcher together.
pub struct AppContext {
    pub config: Config,
    pub store: Arc<FileStore>,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        Self::with_store_path(config, None)
    }

    /// Like [`new`](Self::new), with `store_path` taking precedence over the
    /// configured location.
    pub fn with_store_path(config: Config, store_path: Option<PathBuf>) -> Result<Self> {
        let store_path = match store_path {
            Some(p) => p,
            None => config.store_path()?,
        };
        tracing::debug!("Using fingerprint store {}", store_path.display());

        let store = Arc::new(FileStore::new(store_path));
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.fetcher)?);

        Ok(Self {
            config,
            store,
            fetcher,
        })
    }

    /// Pipeline that records announcements in the durable store.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.fetcher.clone(), self.store.clone())
    }

    /// Pipeline gated against a snapshot of the store; nothing is written.
    pub fn dry_run_pipeline(&self) -> Result<Pipeline> {
        let snapshot = Arc::new(self.store.snapshot()?);
        Ok(Pipeline::new(self.fetcher.clone(), snapshot))
    }
}
