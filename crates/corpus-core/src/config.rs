//! Configuration for the search front ends
//!
//! Handles the simulated result latency and an optional corpus override.

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::corpus::CorpusIndex;

/// Delay between submitting a query and its results becoming available
pub const DEFAULT_LATENCY_MS: u64 = 800;

/// Search configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Simulated lookup latency
    pub latency: Duration,
    /// Corpus file to use instead of the built-in corpus
    pub corpus_path: Option<PathBuf>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            corpus_path: None,
        }
    }
}

impl SearchConfig {
    /// Override the simulated latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Load the corpus from `path` instead of the built-in data
    pub fn with_corpus_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.corpus_path = Some(path.into());
        self
    }

    /// Load configuration from environment variables
    ///
    /// Expected variables:
    /// - TAX_CORPUS_LATENCY_MS: simulated latency in milliseconds (default: 800)
    /// - TAX_CORPUS_PATH: corpus JSON file (default: built-in corpus)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`SearchConfig::from_env`] with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup("TAX_CORPUS_LATENCY_MS") {
            let millis: u64 = raw
                .trim()
                .parse()
                .map_err(|_| anyhow!("Invalid TAX_CORPUS_LATENCY_MS: {}", raw))?;
            config.latency = Duration::from_millis(millis);
        }

        if let Some(path) = lookup("TAX_CORPUS_PATH").filter(|p| !p.trim().is_empty()) {
            config.corpus_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }

    /// Load the configured corpus
    pub fn load_corpus(&self) -> Result<Arc<CorpusIndex>> {
        match &self.corpus_path {
            Some(path) => {
                let corpus = CorpusIndex::from_path(path)
                    .with_context(|| format!("Failed to load corpus from {}", path.display()))?;
                Ok(Arc::new(corpus))
            }
            None => Ok(CorpusIndex::builtin_shared()),
        }
    }
}
