//! Conjunctive result filters
//!
//! A missing field means "no constraint". Values collected from form
//! controls arrive as [`RawFilters`]; anything blank or unrecognised there
//! becomes unset instead of an error.

use serde::{Deserialize, Serialize};
use shared_types::{CorpusEntry, DocType, Jurisdiction, State, TaxType};
use tracing::debug;

/// Typed filter selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<Jurisdiction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<DocType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<TaxType>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jurisdiction(mut self, jurisdiction: Jurisdiction) -> Self {
        self.jurisdiction = Some(jurisdiction);
        self
    }

    pub fn with_state(mut self, state: State) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_doc_type(mut self, doc_type: DocType) -> Self {
        self.doc_type = Some(doc_type);
        self
    }

    pub fn with_tax_type(mut self, tax_type: TaxType) -> Self {
        self.tax_type = Some(tax_type);
        self
    }

    /// True when no field constrains anything
    pub fn is_empty(&self) -> bool {
        self.jurisdiction.is_none()
            && self.state.is_none()
            && self.doc_type.is_none()
            && self.tax_type.is_none()
    }

    /// Keep `entry` iff every set field equals the entry's value
    ///
    /// A state filter never matches a federal entry, whose state is unset.
    pub fn matches(&self, entry: &CorpusEntry) -> bool {
        if let Some(jurisdiction) = self.jurisdiction {
            if entry.jurisdiction != jurisdiction {
                return false;
            }
        }
        if let Some(state) = self.state {
            if entry.state != Some(state) {
                return false;
            }
        }
        if let Some(doc_type) = self.doc_type {
            if entry.doc_type != doc_type {
                return false;
            }
        }
        if let Some(tax_type) = self.tax_type {
            if entry.tax_type != tax_type {
                return false;
            }
        }
        true
    }

    /// Entries of `entries` that pass, in their original order
    pub fn apply<'a>(&self, entries: impl IntoIterator<Item = &'a CorpusEntry>) -> Vec<CorpusEntry> {
        entries
            .into_iter()
            .filter(|entry| self.matches(entry))
            .cloned()
            .collect()
    }
}

/// Untyped filter values as a form or command line hands them over
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFilters {
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub doc_type: Option<String>,
    #[serde(default)]
    pub tax_type: Option<String>,
}

impl RawFilters {
    /// Convert to typed filters; blank or unknown values become unset
    pub fn parse(&self) -> SearchFilters {
        SearchFilters {
            jurisdiction: parse_field("jurisdiction", &self.jurisdiction, Jurisdiction::parse),
            state: parse_field("state", &self.state, State::parse_code),
            doc_type: parse_field("docType", &self.doc_type, DocType::parse),
            tax_type: parse_field("taxType", &self.tax_type, TaxType::parse),
        }
    }
}

impl From<&RawFilters> for SearchFilters {
    fn from(raw: &RawFilters) -> Self {
        raw.parse()
    }
}

fn parse_field<T>(
    field: &'static str,
    value: &Option<String>,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let value = value.as_deref().map(str::trim).filter(|v| !v.is_empty())?;
    let parsed = parse(value);
    if parsed.is_none() {
        debug!(field, value, "Ignoring unrecognised filter value");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusIndex;
    use pretty_assertions::assert_eq;

    fn nexus_entries() -> &'static [CorpusEntry] {
        CorpusIndex::builtin().get("sales tax nexus").unwrap()
    }

    #[test]
    fn test_empty_filters_keep_everything() {
        let filters = SearchFilters::new();
        assert!(filters.is_empty());
        assert_eq!(filters.apply(nexus_entries()).len(), 3);
    }

    #[test]
    fn test_jurisdiction_filter() {
        let kept = SearchFilters::new()
            .with_jurisdiction(Jurisdiction::State)
            .apply(nexus_entries());
        let states: Vec<Option<State>> = kept.iter().map(|e| e.state).collect();
        assert_eq!(states, vec![Some(State::NY), Some(State::CA)]);
    }

    #[test]
    fn test_state_filter_excludes_federal() {
        let kept = SearchFilters::new().with_state(State::CA).apply(nexus_entries());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].citation, "CA Rev & Tax Code § 6203");
    }

    #[test]
    fn test_conjunction_is_exact() {
        let filters = SearchFilters::new()
            .with_jurisdiction(Jurisdiction::State)
            .with_doc_type(DocType::Publication);
        assert!(filters.apply(nexus_entries()).is_empty());

        let filters = SearchFilters::new()
            .with_tax_type(TaxType::SalesUse)
            .with_doc_type(DocType::Publication);
        let kept = filters.apply(nexus_entries());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].jurisdiction, Jurisdiction::Federal);
    }

    #[test]
    fn test_raw_filters_parse() {
        let raw = RawFilters {
            jurisdiction: Some("state".to_string()),
            state: Some("ny".to_string()),
            doc_type: Some("".to_string()),
            tax_type: Some("sales_use".to_string()),
        };
        assert_eq!(
            raw.parse(),
            SearchFilters {
                jurisdiction: Some(Jurisdiction::State),
                state: Some(State::NY),
                doc_type: None,
                tax_type: Some(TaxType::SalesUse),
            }
        );
    }

    #[test]
    fn test_malformed_raw_values_become_unset() {
        let raw = RawFilters {
            jurisdiction: Some("municipal".to_string()),
            state: Some("Atlantis".to_string()),
            doc_type: Some("memo".to_string()),
            tax_type: None,
        };
        assert!(SearchFilters::from(&raw).is_empty());
    }

    #[test]
    fn test_filters_wire_format() {
        let filters = SearchFilters::new()
            .with_jurisdiction(Jurisdiction::Federal)
            .with_doc_type(DocType::Irc);
        let json = serde_json::to_value(filters).unwrap();
        assert_eq!(json, serde_json::json!({ "jurisdiction": "federal", "docType": "irc" }));

        let back: SearchFilters = serde_json::from_value(json).unwrap();
        assert_eq!(back, filters);
    }
}
