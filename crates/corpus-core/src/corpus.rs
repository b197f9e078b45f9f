//! The fixed tax document corpus
//!
//! The corpus is a list of sections, each keyed by a canonical lower-case
//! phrase ("sales tax nexus", "form 1040", ...) and holding the entries
//! authored under that phrase. Section order and entry order are authoring
//! order; nothing here re-sorts them.
//!
//! The built-in corpus ships inside the binary as `data/tax_corpus.json` and
//! is parsed once, on first use.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use shared_types::CorpusEntry;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

const BUILTIN_CORPUS_JSON: &str = include_str!("../data/tax_corpus.json");

lazy_static! {
    static ref BUILTIN_CORPUS: Arc<CorpusIndex> = Arc::new(
        CorpusIndex::from_json(BUILTIN_CORPUS_JSON).expect("built-in tax corpus is malformed")
    );
}

/// Errors raised while loading or validating corpus data
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed corpus data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Corpus section {0} has an empty key")]
    EmptyKey(usize),

    #[error("Duplicate corpus key: {0}")]
    DuplicateKey(String),

    #[error("Corpus key '{0}' has no entries")]
    EmptySection(String),

    #[error("Entry {index} under '{key}' has score {score} outside [0, 1]")]
    ScoreOutOfRange { key: String, index: usize, score: f32 },

    #[error("Entry {index} under '{key}' must name a state iff its jurisdiction is state")]
    StateMismatch { key: String, index: usize },
}

/// Entries authored under one canonical query key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusSection {
    pub key: String,
    pub entries: Vec<CorpusEntry>,
}

impl CorpusSection {
    pub fn new(key: impl Into<String>, entries: Vec<CorpusEntry>) -> Self {
        Self {
            key: key.into(),
            entries,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CorpusFile {
    version: String,
    sections: Vec<CorpusSection>,
}

/// Read-only, ordered mapping from canonical key to entries
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusIndex {
    version: String,
    sections: Vec<CorpusSection>,
}

impl CorpusIndex {
    /// The corpus shipped with the crate
    ///
    /// # Panics
    ///
    /// Panics on first use if the embedded corpus data is malformed. There
    /// is nothing to search without it.
    pub fn builtin() -> &'static CorpusIndex {
        BUILTIN_CORPUS.as_ref()
    }

    /// Shared handle to [`CorpusIndex::builtin`] without copying the data
    pub fn builtin_shared() -> Arc<CorpusIndex> {
        Arc::clone(&BUILTIN_CORPUS)
    }

    /// Parse and validate a corpus document
    /// (`{ "version": ..., "sections": [{ "key": ..., "entries": [...] }] }`)
    pub fn from_json(json: &str) -> Result<Self, CorpusError> {
        let file: CorpusFile = serde_json::from_str(json)?;
        Self::from_sections(file.version, file.sections)
    }

    /// Load a corpus document from disk
    pub fn from_path(path: &Path) -> Result<Self, CorpusError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Build an index from already-typed sections
    ///
    /// Keys are trimmed and lower-cased. Sections keep their given order.
    pub fn from_sections(
        version: impl Into<String>,
        sections: Vec<CorpusSection>,
    ) -> Result<Self, CorpusError> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(sections.len());

        for (position, mut section) in sections.into_iter().enumerate() {
            section.key = section.key.trim().to_lowercase();
            if section.key.is_empty() {
                return Err(CorpusError::EmptyKey(position));
            }
            if !seen.insert(section.key.clone()) {
                return Err(CorpusError::DuplicateKey(section.key));
            }
            validate_section(&section)?;
            normalized.push(section);
        }

        Ok(Self {
            version: version.into(),
            sections: normalized,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn sections(&self) -> &[CorpusSection] {
        &self.sections
    }

    /// Keys in authoring order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.key.as_str())
    }

    /// Entries authored under exactly `key`
    pub fn get(&self, key: &str) -> Option<&[CorpusEntry]> {
        self.sections
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.entries.as_slice())
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total entries across all keys
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }
}

fn validate_section(section: &CorpusSection) -> Result<(), CorpusError> {
    if section.entries.is_empty() {
        return Err(CorpusError::EmptySection(section.key.clone()));
    }

    for (index, entry) in section.entries.iter().enumerate() {
        if !(0.0..=1.0).contains(&entry.score) {
            return Err(CorpusError::ScoreOutOfRange {
                key: section.key.clone(),
                index,
                score: entry.score,
            });
        }
        if !entry.has_consistent_state() {
            return Err(CorpusError::StateMismatch {
                key: section.key.clone(),
                index,
            });
        }
    }

    // Results are served in authored order, so an unsorted section is
    // served unsorted. Flag it for whoever edits the data.
    let sorted = section
        .entries
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score);
    if !sorted {
        warn!(key = %section.key, "Corpus section is not sorted by descending score");
    }

    Ok(())
}
