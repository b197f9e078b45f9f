//! Short terms that stand in for a full corpus key
//!
//! Checked after the containment and token-overlap rules, in table order.
//! The first alias found inside the normalized query wins.

/// `(alias, corpus key)` pairs
pub const ALIASES: &[(&str, &str)] = &[
    ("nexus", "sales tax nexus"),
    ("1040", "form 1040"),
    ("publication 17", "irs publication 17"),
    ("pub 17", "irs publication 17"),
    ("deduction", "new york tax deductions"),
    ("exemption", "california sales tax exemptions"),
    ("estate", "estate tax"),
    ("business", "business deductions"),
    ("charitable", "charitable contributions"),
    ("depreciation", "depreciation"),
    ("capital gain", "capital gains"),
    ("retirement", "retirement contributions"),
    ("home office", "home office deduction"),
    ("self employment", "self employment tax"),
    ("self-employed", "self employment tax"),
];

/// First alias contained in `query`, paired with its target key
///
/// Aliases whose key is rejected by `has_key` are skipped.
pub fn find_alias(
    query: &str,
    has_key: impl Fn(&str) -> bool,
) -> Option<(&'static str, &'static str)> {
    ALIASES
        .iter()
        .copied()
        .find(|&(alias, key)| query.contains(alias) && has_key(key))
}
