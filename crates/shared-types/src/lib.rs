//! Shared vocabulary for the tax document corpus
//!
//! Jurisdiction, state, document type and tax type enums plus the
//! [`CorpusEntry`] record every other crate passes around.

pub mod jurisdiction;
pub mod types;

pub use jurisdiction::{Jurisdiction, State};
pub use types::{CorpusEntry, DocType, ParseVocabularyError, TaxType};
