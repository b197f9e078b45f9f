//! Query Matcher
//!
//! Maps `(query, filters)` to a [`SearchOutcome`]. Candidate selection runs
//! these rules in order and stops at the first that yields a key:
//!
//! 1. Containment: the normalized query contains a key, or a key contains
//!    the query. Keys are tried in corpus order.
//! 2. Token overlap: query tokens longer than two characters are compared
//!    with each key's tokens; a query token counts when it is a substring of
//!    some key token or vice versa. A key is selected when the count is at
//!    least 2 and at least half the query tokens. Keys are tried in corpus
//!    order and the first qualifying key wins, even if a later key overlaps
//!    more.
//! 3. Alias table, in table order.
//! 4. Synthetic generation.
//!
//! Filters are applied to the candidates afterwards. Candidate order is
//! corpus (or generation) order and is never re-sorted by score.

use std::sync::Arc;

use shared_types::CorpusEntry;
use tracing::debug;

use super::aliases::find_alias;
use super::filters::SearchFilters;
use super::{normalize_query, synthetic, MatchSource, QueryResult, SearchOutcome};
use crate::corpus::CorpusIndex;

/// Query tokens must be longer than this to take part in the overlap rule
const MIN_TOKEN_CHARS: usize = 2;
/// Minimum number of overlapping query tokens
const MIN_OVERLAP: usize = 2;

/// Candidates found in the corpus, before filtering
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusMatch<'a> {
    pub source: MatchSource,
    pub entries: &'a [CorpusEntry],
}

/// Stateless matcher over a read-only corpus
#[derive(Debug, Clone)]
pub struct QueryMatcher {
    corpus: Arc<CorpusIndex>,
}

impl QueryMatcher {
    pub fn new(corpus: Arc<CorpusIndex>) -> Self {
        Self { corpus }
    }

    /// Matcher over the built-in corpus
    pub fn builtin() -> Self {
        Self::new(CorpusIndex::builtin_shared())
    }

    pub fn corpus(&self) -> &CorpusIndex {
        &self.corpus
    }

    /// Run a search
    ///
    /// Never fails: unmatched queries fall through to synthetic results, and
    /// over-constrained filters yield [`SearchOutcome::NoResults`].
    pub fn match_query(&self, query: &str, filters: &SearchFilters) -> SearchOutcome {
        let query = normalize_query(query);
        if query.is_empty() {
            return SearchOutcome::EmptyQuery;
        }

        let (source, entries) = match self.find_corpus_match(&query) {
            Some(found) => (found.source, filters.apply(found.entries)),
            None => (
                MatchSource::Synthetic,
                filters.apply(&synthetic::generate(&query, filters)),
            ),
        };

        debug!(
            query = %query,
            source = ?source,
            count = entries.len(),
            "Matched query"
        );

        if entries.is_empty() {
            SearchOutcome::NoResults { query, source }
        } else {
            SearchOutcome::Results(QueryResult {
                query,
                source,
                count: entries.len(),
                entries,
            })
        }
    }

    /// Candidate selection without filtering or synthetic fallback
    ///
    /// `query` must already be normalized.
    pub fn find_corpus_match(&self, query: &str) -> Option<CorpusMatch<'_>> {
        self.containment_match(query)
            .or_else(|| self.token_overlap_match(query))
            .or_else(|| self.alias_match(query))
    }

    fn containment_match(&self, query: &str) -> Option<CorpusMatch<'_>> {
        self.corpus
            .sections()
            .iter()
            .find(|section| query.contains(section.key.as_str()) || section.key.contains(query))
            .map(|section| CorpusMatch {
                source: MatchSource::Containment {
                    key: section.key.clone(),
                },
                entries: &section.entries,
            })
    }

    fn token_overlap_match(&self, query: &str) -> Option<CorpusMatch<'_>> {
        let query_tokens = significant_tokens(query);
        if query_tokens.is_empty() {
            return None;
        }

        self.corpus
            .sections()
            .iter()
            .find(|section| {
                let count = overlap_count(&query_tokens, &section.key);
                count >= MIN_OVERLAP && 2 * count >= query_tokens.len()
            })
            .map(|section| CorpusMatch {
                source: MatchSource::TokenOverlap {
                    key: section.key.clone(),
                },
                entries: &section.entries,
            })
    }

    fn alias_match(&self, query: &str) -> Option<CorpusMatch<'_>> {
        let (alias, key) = find_alias(query, |key| self.corpus.get(key).is_some())?;
        let entries = self.corpus.get(key)?;
        Some(CorpusMatch {
            source: MatchSource::Alias {
                alias: alias.to_string(),
                key: key.to_string(),
            },
            entries,
        })
    }
}

/// Whitespace-delimited query tokens longer than two characters
fn significant_tokens(query: &str) -> Vec<&str> {
    query
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
        .collect()
}

/// Query tokens that are a substring of some key token, or contain one
///
/// Key tokens are not length-filtered, so "17" in "irs publication 17"
/// still counts against a query token such as "2017".
fn overlap_count(query_tokens: &[&str], key: &str) -> usize {
    query_tokens
        .iter()
        .filter(|query_token| {
            key.split_whitespace()
                .any(|key_token| key_token.contains(**query_token) || query_token.contains(key_token))
        })
        .count()
}
