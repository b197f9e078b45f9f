//! Search view state
//!
//! The search form is modelled as plain data plus a reducer. Front ends feed
//! user input in as [`Action`]s and carry out the returned [`Effect`];
//! completed searches come back as [`Action::Loaded`].
//!
//! Every search the reducer starts gets a new request number. A result is
//! shown only if it carries the latest number, so when searches overlap the
//! last one started wins regardless of completion order.

use serde::{Deserialize, Serialize};
use shared_types::{DocType, Jurisdiction, State, TaxType};
use tracing::debug;

use crate::doc_types::{self, DocTypeOption};
use crate::search::{normalize_query, SearchFilters, SearchOutcome};

/// What the result area currently shows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "outcome", rename_all = "snake_case")]
pub enum ViewPhase {
    /// Example queries, no search run yet
    #[default]
    Placeholder,
    Loading,
    Showing(SearchOutcome),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchViewState {
    pub query: String,
    pub filters: SearchFilters,
    pub phase: ViewPhase,
    /// Number of the most recent search; results for older ones are dropped
    #[serde(default)]
    pub request: u64,
}

impl SearchViewState {
    /// Document-type choices for the selected jurisdiction
    pub fn doc_type_options(&self) -> &'static [DocTypeOption] {
        doc_types::options_for(self.filters.jurisdiction)
    }

    fn has_query(&self) -> bool {
        !normalize_query(&self.query).is_empty()
    }

    fn run_search(mut self) -> (Self, Effect) {
        self.request += 1;
        self.phase = ViewPhase::Loading;
        let effect = Effect::RunSearch {
            request: self.request,
            query: self.query.clone(),
            filters: self.filters,
        };
        (self, effect)
    }

    /// Back to the example queries; any pending search goes stale
    fn show_placeholder(mut self) -> (Self, Effect) {
        self.request += 1;
        self.phase = ViewPhase::Placeholder;
        (self, Effect::ShowPlaceholder)
    }

    /// Rerun the current query after a filter change
    fn refresh(self) -> (Self, Effect) {
        if self.has_query() {
            self.run_search()
        } else {
            (self, Effect::None)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetQuery(String),
    SetJurisdiction(Option<Jurisdiction>),
    SetState(Option<State>),
    SetDocType(Option<DocType>),
    SetTaxType(Option<TaxType>),
    ClearFilters,
    Submit,
    /// Result of the search started as `request`
    Loaded { request: u64, outcome: SearchOutcome },
}

/// Work the front end must do after a state change
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    ShowPlaceholder,
    RunSearch {
        request: u64,
        query: String,
        filters: SearchFilters,
    },
}

pub fn reduce(mut state: SearchViewState, action: Action) -> (SearchViewState, Effect) {
    match action {
        Action::SetQuery(query) => {
            state.query = query;
            (state, Effect::None)
        }
        Action::SetJurisdiction(jurisdiction) => {
            let (_, doc_type) = doc_types::resolve(jurisdiction, state.filters.doc_type);
            state.filters.jurisdiction = jurisdiction;
            state.filters.doc_type = doc_type;
            state.refresh()
        }
        Action::SetState(us_state) => {
            state.filters.state = us_state;
            state.refresh()
        }
        Action::SetDocType(Some(doc_type))
            if !doc_types::is_offered(state.doc_type_options(), doc_type) =>
        {
            debug!(
                doc_type = doc_type.as_str(),
                "Document type not offered for the selected jurisdiction"
            );
            (state, Effect::None)
        }
        Action::SetDocType(doc_type) => {
            state.filters.doc_type = doc_type;
            state.refresh()
        }
        Action::SetTaxType(tax_type) => {
            state.filters.tax_type = tax_type;
            state.refresh()
        }
        Action::ClearFilters => {
            state.filters = SearchFilters::default();
            if state.has_query() {
                state.run_search()
            } else {
                state.show_placeholder()
            }
        }
        Action::Submit => {
            if state.has_query() {
                state.run_search()
            } else {
                state.show_placeholder()
            }
        }
        Action::Loaded { request, outcome } => {
            if state.phase != ViewPhase::Loading || request != state.request {
                debug!(
                    request,
                    latest = state.request,
                    "Dropping stale search result"
                );
                return (state, Effect::None);
            }
            state.phase = match outcome {
                SearchOutcome::EmptyQuery => ViewPhase::Placeholder,
                outcome => ViewPhase::Showing(outcome),
            };
            (state, Effect::None)
        }
    }
}
