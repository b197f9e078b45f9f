use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::jurisdiction::{Jurisdiction, State};

/// Returned when a string does not name a known vocabulary value
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseVocabularyError {
    #[error("unknown {kind}: {value:?}")]
    Unknown { kind: &'static str, value: String },
}

impl ParseVocabularyError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        ParseVocabularyError::Unknown {
            kind,
            value: value.to_string(),
        }
    }
}

/// Kind of tax document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    /// Internal Revenue Code section
    Irc,
    /// Code of Federal Regulations section
    Cfr,
    Publication,
    Form,
    Statute,
    Regulation,
    Bulletin,
    Ruling,
    Notice,
}

impl DocType {
    pub const ALL: [DocType; 9] = [
        DocType::Irc,
        DocType::Cfr,
        DocType::Publication,
        DocType::Form,
        DocType::Statute,
        DocType::Regulation,
        DocType::Bulletin,
        DocType::Ruling,
        DocType::Notice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Irc => "irc",
            DocType::Cfr => "cfr",
            DocType::Publication => "publication",
            DocType::Form => "form",
            DocType::Statute => "statute",
            DocType::Regulation => "regulation",
            DocType::Bulletin => "bulletin",
            DocType::Ruling => "ruling",
            DocType::Notice => "notice",
        }
    }

    /// Short badge label shown next to a result
    pub fn label(&self) -> &'static str {
        match self {
            DocType::Irc => "IRC",
            DocType::Cfr => "CFR",
            DocType::Publication => "Publication",
            DocType::Form => "Form",
            DocType::Statute => "Statute",
            DocType::Regulation => "Regulation",
            DocType::Bulletin => "Bulletin",
            DocType::Ruling => "Ruling",
            DocType::Notice => "Notice",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim();
        DocType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(needle))
    }
}

impl std::fmt::Display for DocType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseVocabularyError::unknown("document type", s))
    }
}

/// Tax the document is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxType {
    Income,
    SalesUse,
    Estate,
}

impl TaxType {
    pub const ALL: [TaxType; 3] = [TaxType::Income, TaxType::SalesUse, TaxType::Estate];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaxType::Income => "income",
            TaxType::SalesUse => "sales_use",
            TaxType::Estate => "estate",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim();
        TaxType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(needle))
    }
}

impl std::fmt::Display for TaxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxType {
    type Err = ParseVocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseVocabularyError::unknown("tax type", s))
    }
}

/// One authored document excerpt in the corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusEntry {
    pub jurisdiction: Jurisdiction,
    pub state: Option<State>,
    pub doc_type: DocType,
    pub tax_type: TaxType,
    pub title: String,
    pub text: String,
    /// Static relevance weight in [0, 1] assigned when the entry was authored
    pub score: f32,
    pub source_url: String,
    pub citation: String,
    pub year: String,
}

impl CorpusEntry {
    /// A state document names its state; a federal one never does.
    pub fn has_consistent_state(&self) -> bool {
        match self.jurisdiction {
            Jurisdiction::Federal => self.state.is_none(),
            Jurisdiction::State => self.state.is_some(),
        }
    }

    /// Badge text: "Federal" or the state code
    pub fn jurisdiction_label(&self) -> &'static str {
        match (self.jurisdiction, self.state) {
            (Jurisdiction::State, Some(state)) => state.code(),
            (Jurisdiction::State, None) => "State",
            (Jurisdiction::Federal, _) => "Federal",
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: as_str and parse agree for every document type
        #[test]
        fn doc_type_round_trips(idx in 0usize..DocType::ALL.len()) {
            let doc_type = DocType::ALL[idx];
            prop_assert_eq!(DocType::parse(doc_type.as_str()), Some(doc_type));
            prop_assert_eq!(
                serde_json::to_string(&doc_type).unwrap(),
                format!("\"{}\"", doc_type.as_str())
            );
        }

        /// Property: parsing never panics on arbitrary input
        #[test]
        fn parse_is_total(s in ".{0,24}") {
            let _ = DocType::parse(&s);
            let _ = TaxType::parse(&s);
            let _ = State::parse_code(&s);
            let _ = Jurisdiction::parse(&s);
        }
    }
}
