//! Placeholder results for queries the corpus does not cover
//!
//! Exactly [`SYNTHETIC_RESULT_COUNT`] entries are generated. Entry `i`:
//! - jurisdiction cycles over the pinned jurisdiction, else federal/state
//! - state (state entries only) cycles over the pinned state, else NY/CA/NJ
//! - doc type is the pinned type, else statute/publication/regulation by index
//! - tax type is the pinned type, else income
//! - score is 0.95 - 0.05 * i

use shared_types::{CorpusEntry, DocType, Jurisdiction, State, TaxType};

use super::filters::SearchFilters;

pub const SYNTHETIC_RESULT_COUNT: usize = 3;

const DEFAULT_STATES: [State; 3] = [State::NY, State::CA, State::NJ];
const DEFAULT_DOC_TYPES: [DocType; 3] = [DocType::Statute, DocType::Publication, DocType::Regulation];
const FEDERAL_PORTAL: &str = "https://www.irs.gov";
const FEDERAL_CODE: &str = "26 USC";
const FIRST_SECTION_NUMBER: usize = 1000;
const SYNTHETIC_YEAR: &str = "2024";

/// Generate placeholder entries for `query` (already normalized)
pub fn generate(query: &str, filters: &SearchFilters) -> Vec<CorpusEntry> {
    let jurisdictions: Vec<Jurisdiction> = match filters.jurisdiction {
        Some(jurisdiction) => vec![jurisdiction],
        None => Jurisdiction::ALL.to_vec(),
    };
    let states: Vec<State> = match filters.state {
        Some(state) => vec![state],
        None => DEFAULT_STATES.to_vec(),
    };

    (0..SYNTHETIC_RESULT_COUNT)
        .map(|i| {
            let jurisdiction = jurisdictions[i % jurisdictions.len()];
            let state = match jurisdiction {
                Jurisdiction::State => Some(states[i % states.len()]),
                Jurisdiction::Federal => None,
            };
            let (issuer, source_url, code) = match state {
                Some(state) => (state.code(), state.portal_url(), state.code()),
                None => ("Federal", FEDERAL_PORTAL.to_string(), FEDERAL_CODE),
            };

            CorpusEntry {
                jurisdiction,
                state,
                doc_type: filters
                    .doc_type
                    .unwrap_or(DEFAULT_DOC_TYPES[i % DEFAULT_DOC_TYPES.len()]),
                tax_type: filters.tax_type.unwrap_or(TaxType::Income),
                title: format!("{} Tax Document - {}", issuer, query),
                text: format!(
                    "This document contains relevant information about \"{}\". The content \
                     covers definitions, requirements, procedures and examples related to the \
                     search query. It is a sample result showing how a retrieved tax document \
                     is presented.",
                    query
                ),
                score: synthetic_score(i),
                source_url,
                citation: format!("{} § {}", code, FIRST_SECTION_NUMBER + i),
                year: SYNTHETIC_YEAR.to_string(),
            }
        })
        .collect()
}

/// 0.95, 0.90, 0.85, ... computed in hundredths to avoid drift
fn synthetic_score(index: usize) -> f32 {
    (95 - 5 * index as i32) as f32 / 100.0
}
