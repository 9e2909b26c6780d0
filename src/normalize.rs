//! Best-effort derivation of location and sector-focus fields from free text.

use crate::constants::is_state_code;
use crate::types::{FocusFlags, InvestorRecord};
use once_cell::sync::Lazy;
use regex::Regex;

static STATE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Z]{2})\b").unwrap());

const AI_TERMS: &[&str] = &["ai", "ml", "machine learning", "artificial intelligence"];
const MUSIC_TERMS: &[&str] = &["music", "entertainment"];
const FINTECH_TERMS: &[&str] = &["fintech", "finance", "banking"];

/// First two-letter uppercase token in `address` that is a US state code.
pub fn extract_state(address: &str) -> Option<String> {
    STATE_TOKEN
        .captures_iter(address)
        .map(|caps| caps.get(1).map_or("", |m| m.as_str()))
        .find(|token| is_state_code(token))
        .map(str::to_string)
}

/// City heuristic: the first comma segment, or the second one when the
/// first looks like a street line (contains a digit).
pub fn extract_city(address: &str) -> Option<String> {
    if address.trim().is_empty() {
        return None;
    }

    let mut parts = address.split(',');
    let first = parts.next()?.trim();
    if first.chars().any(|c| c.is_ascii_digit()) {
        if let Some(second) = parts.next() {
            return Some(second.trim().to_string());
        }
    }
    Some(first.to_string())
}

pub fn derive_focus_flags(sectors: &str, investment_focus: &str) -> FocusFlags {
    let combined = format!("{sectors} {investment_focus}").to_lowercase();
    let mentions = |terms: &[&str]| terms.iter().any(|term| combined.contains(term));

    FocusFlags {
        has_ai_focus: mentions(AI_TERMS),
        has_music_focus: mentions(MUSIC_TERMS),
        has_fintech_focus: mentions(FINTECH_TERMS),
    }
}

/// Fills `state`, `city` and focus flags on a record wherever they are missing.
pub fn enrich(record: &mut InvestorRecord) {
    let address = record.address.as_deref().unwrap_or("");
    if record.state.is_none() {
        record.state = extract_state(address);
    }
    if record.city.is_none() {
        record.city = extract_city(address);
    }
    if record.focus.is_none() {
        record.focus = Some(derive_focus_flags(
            record.sectors.as_deref().unwrap_or(""),
            record.investment_focus.as_deref().unwrap_or(""),
        ));
    }
}
