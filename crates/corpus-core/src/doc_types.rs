//! Document-type choices offered for each jurisdiction filter
//!
//! Federal-only types: IRC, CFR. State-only: statute, regulation, bulletin,
//! ruling. Publications and forms exist on both sides. Each list starts
//! with the "All Types" entry, which leaves the filter unset.

use serde::Serialize;
use shared_types::{DocType, Jurisdiction};

/// One entry of a document-type dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocTypeOption {
    /// `None` is "All Types"
    pub value: Option<DocType>,
    pub label: &'static str,
}

const fn option(value: DocType, label: &'static str) -> DocTypeOption {
    DocTypeOption {
        value: Some(value),
        label,
    }
}

const ALL_TYPES: DocTypeOption = DocTypeOption {
    value: None,
    label: "All Types",
};

/// Offered while no jurisdiction is selected
pub const ALL_OPTIONS: [DocTypeOption; 9] = [
    ALL_TYPES,
    option(DocType::Irc, "IRC (Internal Revenue Code)"),
    option(DocType::Cfr, "CFR (Code of Federal Regulations)"),
    option(DocType::Publication, "Publication"),
    option(DocType::Form, "Form & Instructions"),
    option(DocType::Statute, "State Statute"),
    option(DocType::Regulation, "State Regulation"),
    option(DocType::Bulletin, "Bulletin/Notice"),
    option(DocType::Ruling, "Ruling"),
];

pub const FEDERAL_OPTIONS: [DocTypeOption; 5] = [
    ALL_TYPES,
    option(DocType::Irc, "IRC (Internal Revenue Code)"),
    option(DocType::Cfr, "CFR (Code of Federal Regulations)"),
    option(DocType::Publication, "IRS Publication"),
    option(DocType::Form, "Form & Instructions"),
];

pub const STATE_OPTIONS: [DocTypeOption; 7] = [
    ALL_TYPES,
    option(DocType::Statute, "State Statute"),
    option(DocType::Regulation, "State Regulation"),
    option(DocType::Bulletin, "Bulletin/Notice"),
    option(DocType::Ruling, "Ruling"),
    option(DocType::Publication, "State Publication"),
    option(DocType::Form, "State Form & Instructions"),
];

/// Options for the selected jurisdiction (or none)
pub fn options_for(jurisdiction: Option<Jurisdiction>) -> &'static [DocTypeOption] {
    match jurisdiction {
        Some(Jurisdiction::Federal) => &FEDERAL_OPTIONS,
        Some(Jurisdiction::State) => &STATE_OPTIONS,
        None => &ALL_OPTIONS,
    }
}

pub fn is_offered(options: &[DocTypeOption], doc_type: DocType) -> bool {
    options.iter().any(|o| o.value == Some(doc_type))
}

/// Options after a jurisdiction change, plus the document type to keep
///
/// The previous type survives only if the new list still offers it.
pub fn resolve(
    jurisdiction: Option<Jurisdiction>,
    previous: Option<DocType>,
) -> (&'static [DocTypeOption], Option<DocType>) {
    let options = options_for(jurisdiction);
    let kept = previous.filter(|doc_type| is_offered(options, *doc_type));
    (options, kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(options: &[DocTypeOption]) -> Vec<Option<DocType>> {
        options.iter().map(|o| o.value).collect()
    }

    #[test]
    fn test_every_list_starts_with_all_types() {
        for jurisdiction in [None, Some(Jurisdiction::Federal), Some(Jurisdiction::State)] {
            let options = options_for(jurisdiction);
            assert_eq!(options[0].value, None);
            assert_eq!(options[0].label, "All Types");
        }
    }

    #[test]
    fn test_federal_list() {
        assert_eq!(
            values(options_for(Some(Jurisdiction::Federal))),
            vec![
                None,
                Some(DocType::Irc),
                Some(DocType::Cfr),
                Some(DocType::Publication),
                Some(DocType::Form),
            ]
        );
    }

    #[test]
    fn test_state_list() {
        assert_eq!(
            values(options_for(Some(Jurisdiction::State))),
            vec![
                None,
                Some(DocType::Statute),
                Some(DocType::Regulation),
                Some(DocType::Bulletin),
                Some(DocType::Ruling),
                Some(DocType::Publication),
                Some(DocType::Form),
            ]
        );
    }

    #[test]
    fn test_switch_keeps_shared_type() {
        let (options, kept) = resolve(Some(Jurisdiction::State), Some(DocType::Publication));
        assert_eq!(options.len(), 7);
        assert_eq!(kept, Some(DocType::Publication));
    }

    #[test]
    fn test_switch_resets_unavailable_type() {
        let (_, kept) = resolve(Some(Jurisdiction::State), Some(DocType::Irc));
        assert_eq!(kept, None);

        let (_, kept) = resolve(Some(Jurisdiction::Federal), Some(DocType::Statute));
        assert_eq!(kept, None);
    }

    #[test]
    fn test_all_list_has_no_notice() {
        let (_, kept) = resolve(None, Some(DocType::Notice));
        assert_eq!(kept, None);
        let (_, kept) = resolve(None, Some(DocType::Ruling));
        assert_eq!(kept, Some(DocType::Ruling));
    }

    #[test]
    fn test_unset_stays_unset() {
        let (options, kept) = resolve(Some(Jurisdiction::Federal), None);
        assert_eq!(options.len(), 5);
        assert_eq!(kept, None);
    }
}
