//! Name-keyword classification into coarse investor categories.

use crate::types::{Category, InvestorRecord};

/// Ordered (keywords, category) rules; the first rule with a matching
/// keyword decides the category.
pub const CATEGORY_RULES: &[(&[&str], Category)] = &[
    (
        &["family", "office", "investment co", "holdings", "trust"],
        Category::FamilyOffice,
    ),
    (
        &["venture", "ventures", "capital", "partners", "fund"],
        Category::VentureCapital,
    ),
    (
        &["equity", "private equity", "investment"],
        Category::PrivateEquity,
    ),
    (
        &["hedge", "offshore", "fund", "asset management"],
        Category::HedgeFund,
    ),
];

pub fn classify(name: &str) -> Category {
    let name_lower = name.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| name_lower.contains(kw)))
        .map(|(_, category)| *category)
        .unwrap_or(Category::OtherInstitutional)
}

/// Assigns a category to every record that does not already carry one.
pub fn classify_all(records: &mut [InvestorRecord]) {
    for record in records.iter_mut().filter(|r| r.category.is_none()) {
        record.category = Some(classify(&record.name));
    }
}
