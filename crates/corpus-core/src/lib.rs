//! Corpus Core - Mock tax-document search over a fixed corpus
//!
//! This crate provides:
//! - The keyed tax corpus (built-in data or a JSON file)
//! - Query matching with synthetic fallback and conjunctive filters
//! - Document-type options per jurisdiction
//! - A search session with simulated latency where the last request wins
//! - The search view state and its reducer
//! - Configuration management

pub mod config;
pub mod corpus;
pub mod doc_types;
pub mod search;
pub mod session;
pub mod view;

// Re-export commonly used types
pub use config::SearchConfig;
pub use corpus::{CorpusError, CorpusIndex, CorpusSection};
pub use doc_types::DocTypeOption;
pub use search::{
    MatchSource, QueryMatcher, QueryResult, RawFilters, SearchFilters, SearchOutcome,
    EXAMPLE_QUERIES,
};
pub use session::{SearchSession, SessionSlot};
pub use view::{reduce, Action, Effect, SearchViewState, ViewPhase};
