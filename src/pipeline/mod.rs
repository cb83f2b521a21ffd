//! The single entry point host processes call: alias in, announcement out.

use std::sync::Arc;

use crate::app::Result;
use crate::fetcher::Fetcher;
use crate::formatter::format_post;
use crate::gate::DedupGate;
use crate::sources::Source;
use crate::store::FingerprintStore;

/// Text returned for an alias that names no source.
pub fn unknown_alias_message(alias: &str) -> String {
    format!("Undefined function alias '{}'; check spelling.", alias)
}

/// Fetch → adapt → format → gate, one source per run.
pub struct Pipeline {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    gate: DedupGate,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        store: Arc<dyn FingerprintStore + Send + Sync>,
    ) -> Self {
        Self {
            fetcher,
            gate: DedupGate::new(store),
        }
    }

    /// Run the source named by `alias`.
    ///
    /// Returns the annotated announcement, `None` when it was already
    /// announced, or the unknown-alias message without touching the network
    /// or the store.
    pub async fn run_alias(&self, alias: &str) -> Result<Option<String>> {
        match Source::from_alias(alias) {
            Some(source) => self.run(source).await,
            None => {
                tracing::warn!("Unknown source alias {:?}", alias);
                Ok(Some(unknown_alias_message(alias)))
            }
        }
    }

    pub async fn run(&self, source: Source) -> Result<Option<String>> {
        let body = self.fetcher.fetch(source.url()).await?;
        let fields = source.adapt(&body)?;
        tracing::debug!("{}: newest entry {:?}", source, fields.title);

        self.gate.gate(&format_post(&fields))
    }

    /// Run every known source, one after another.
    pub async fn run_all(&self) -> Vec<(Source, Result<Option<String>>)> {
        let mut results = Vec::with_capacity(Source::ALL.len());
        for source in Source::ALL {
            results.push((source, self.run(source).await));
        }
        results
    }
}
