//! Search module - turns a free-text query plus filters into results
//!
//! This module provides:
//! - Query normalization and the ordered matching rules (containment,
//!   token overlap, alias table)
//! - Synthetic placeholder results when nothing in the corpus matches
//! - Conjunctive filters over jurisdiction, state, document type and tax type
//! - The three-way search outcome (empty query, no results, results)

pub mod aliases;
pub mod filters;
pub mod matcher;
pub mod synthetic;

pub use aliases::ALIASES;
pub use filters::{RawFilters, SearchFilters};
pub use matcher::{CorpusMatch, QueryMatcher};

use serde::{Deserialize, Serialize};
use shared_types::CorpusEntry;

/// Example queries offered while no search has been run
pub const EXAMPLE_QUERIES: [&str; 12] = [
    "sales tax nexus requirements",
    "Form 1040 instructions",
    "New York tax deductions",
    "California sales tax exemptions",
    "IRS publication 17",
    "business deductions",
    "charitable contributions",
    "capital gains",
    "retirement contributions",
    "estate tax",
    "home office deduction",
    "self employment tax",
];

/// Trim and lower-case a query before matching
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Which rule produced the candidate entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum MatchSource {
    /// The query contains a corpus key, or a key contains the query
    Containment { key: String },
    /// Enough query tokens overlap the key's tokens
    TokenOverlap { key: String },
    /// A known short term or alias points at the key
    Alias { alias: String, key: String },
    /// Nothing matched; placeholder entries were generated
    Synthetic,
}

impl MatchSource {
    /// Corpus key the candidates came from, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            MatchSource::Containment { key }
            | MatchSource::TokenOverlap { key }
            | MatchSource::Alias { key, .. } => Some(key),
            MatchSource::Synthetic => None,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, MatchSource::Synthetic)
    }
}

/// Filtered entries for one query, in corpus (or generation) order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// The normalized query
    pub query: String,
    pub source: MatchSource,
    pub count: usize,
    pub entries: Vec<CorpusEntry>,
}

/// Terminal state of a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The query was blank after trimming
    EmptyQuery,
    /// Candidates existed but the filters removed all of them
    NoResults { query: String, source: MatchSource },
    /// At least one entry survived the filters. A synthetic source means the
    /// corpus had no coverage for the query.
    Results(QueryResult),
}

impl SearchOutcome {
    pub fn entries(&self) -> &[CorpusEntry] {
        match self {
            SearchOutcome::Results(result) => &result.entries,
            _ => &[],
        }
    }

    pub fn count(&self) -> usize {
        self.entries().len()
    }

    pub fn source(&self) -> Option<&MatchSource> {
        match self {
            SearchOutcome::EmptyQuery => None,
            SearchOutcome::NoResults { source, .. } => Some(source),
            SearchOutcome::Results(result) => Some(&result.source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  Form 1040 Instructions\n"), "form 1040 instructions");
        assert_eq!(normalize_query("   "), "");
    }

    #[test]
    fn test_match_source_key() {
        let alias = MatchSource::Alias {
            alias: "pub 17".to_string(),
            key: "irs publication 17".to_string(),
        };
        assert_eq!(alias.key(), Some("irs publication 17"));
        assert_eq!(MatchSource::Synthetic.key(), None);
        assert!(MatchSource::Synthetic.is_synthetic());
    }

    #[test]
    fn test_outcome_wire_format() {
        let outcome = SearchOutcome::NoResults {
            query: "form 1040".to_string(),
            source: MatchSource::Containment {
                key: "form 1040".to_string(),
            },
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "no_results");
        assert_eq!(json["source"]["rule"], "containment");

        let empty = serde_json::to_value(SearchOutcome::EmptyQuery).unwrap();
        assert_eq!(empty["status"], "empty_query");
    }

    #[test]
    fn test_outcome_accessors() {
        assert_eq!(SearchOutcome::EmptyQuery.count(), 0);
        assert!(SearchOutcome::EmptyQuery.source().is_none());
    }
}
