//! Plain-text rendering of search outcomes

use std::fmt::Write;

use corpus_core::{CorpusIndex, DocTypeOption, SearchOutcome, EXAMPLE_QUERIES};
use shared_types::{CorpusEntry, DocType};

pub fn outcome(outcome: &SearchOutcome) -> String {
    let mut out = String::new();
    match outcome {
        SearchOutcome::EmptyQuery => {
            out.push_str("Enter a query to search tax documents. Try one of:\n");
            for example in EXAMPLE_QUERIES {
                let _ = writeln!(out, "  - {}", example);
            }
        }
        SearchOutcome::NoResults { query, .. } => {
            let _ = writeln!(out, "No results found for \"{}\".", query);
            out.push_str("Try adjusting your filters or search terms.\n");
        }
        SearchOutcome::Results(result) => {
            let noun = if result.count == 1 { "result" } else { "results" };
            let _ = writeln!(out, "{} {} for \"{}\"", result.count, noun, result.query);
            if result.source.is_synthetic() {
                out.push_str("(sample results: no indexed documents cover this query)\n");
            }
            for (i, entry) in result.entries.iter().enumerate() {
                out.push('\n');
                write_entry(&mut out, i + 1, entry);
            }
        }
    }
    out
}

fn write_entry(out: &mut String, position: usize, entry: &CorpusEntry) {
    let _ = writeln!(out, "{}. {}", position, entry.title);
    let _ = writeln!(
        out,
        "   [{}] {} | {} | {} | relevance {:.0}%",
        entry.jurisdiction_label(),
        entry.doc_type.label(),
        entry.tax_type,
        entry.year,
        entry.score * 100.0
    );
    let _ = writeln!(out, "   {}", entry.citation);
    let _ = writeln!(out, "   {}", entry.text);
    let _ = writeln!(out, "   {}", entry.source_url);
}

pub fn keys(corpus: &CorpusIndex) -> String {
    let mut out = String::new();
    for section in corpus.sections() {
        let _ = writeln!(out, "{} ({})", section.key, section.entries.len());
    }
    let _ = writeln!(
        out,
        "{} keys, {} entries (corpus {})",
        corpus.len(),
        corpus.entry_count(),
        corpus.version()
    );
    out
}

pub fn doc_type_options(options: &[DocTypeOption], selected: Option<DocType>) -> String {
    let mut out = String::new();
    for option in options {
        let marker = if option.value == selected { '*' } else { ' ' };
        let value = option.value.map(|d| d.as_str()).unwrap_or("");
        let _ = writeln!(out, "{} {:<12} {}", marker, value, option.label);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use corpus_core::{doc_types, QueryMatcher, SearchFilters};
    use pretty_assertions::assert_eq;
    use shared_types::{Jurisdiction, State};

    #[test]
    fn test_empty_query_lists_examples() {
        let text = outcome(&SearchOutcome::EmptyQuery);
        assert!(text.starts_with("Enter a query"));
        assert!(text.contains("  - sales tax nexus requirements\n"));
        assert_eq!(text.lines().count(), 1 + EXAMPLE_QUERIES.len());
    }

    #[test]
    fn test_no_results() {
        let filters = SearchFilters::new().with_state(State::TX);
        let text = outcome(&QueryMatcher::builtin().match_query("Form 1040", &filters));
        assert_eq!(
            text,
            "No results found for \"form 1040\".\nTry adjusting your filters or search terms.\n"
        );
    }

    #[test]
    fn test_corpus_results() {
        let text = outcome(&QueryMatcher::builtin().match_query("estate tax", &SearchFilters::new()));
        assert!(text.starts_with("3 results for \"estate tax\"\n\n1. "));
        assert!(!text.contains("sample results"));
        assert!(text.contains("\n3. "));
    }

    #[test]
    fn test_synthetic_results_are_flagged() {
        let text = outcome(&QueryMatcher::builtin().match_query("payroll withholding", &SearchFilters::new()));
        assert!(text.contains("sample results"));
        assert!(text.contains("1. Federal Tax Document - payroll withholding\n"));
        assert!(text.contains("   [Federal] Statute | income | 2024 | relevance 95%\n"));
        assert!(text.contains("   [CA] Publication | income | 2024 | relevance 90%\n"));
    }

    #[test]
    fn test_keys_summary() {
        let text = keys(CorpusIndex::builtin());
        assert!(text.starts_with("sales tax nexus (3)\n"));
        assert!(text.ends_with("17 keys, 40 entries (corpus 2024.1)\n"));
    }

    #[test]
    fn test_doc_type_marker() {
        let (options, selected) = doc_types::resolve(Some(Jurisdiction::Federal), Some(DocType::Irc));
        let text = doc_type_options(options, selected);
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().nth(1).unwrap().starts_with("* irc"));
        assert!(text.lines().next().unwrap().starts_with("  "));
    }
}
