/// Filing type codes understood by the registry browse endpoint
pub const ADVISER_REGISTRATION_CODE: &str = "ADV";
pub const INSTITUTIONAL_HOLDINGS_CODE: &str = "13F-HR";

/// Registry browse endpoint path, relative to the configured base URL
pub const BROWSE_PATH: &str = "/cgi-bin/browse-edgar";

/// Feed titles containing any of these are feed metadata, not filers
pub const FEED_BOILERPLATE_MARKERS: &[&str] = &["SEC", "EDGAR"];

/// Local and remote table name
pub const INVESTORS_TABLE: &str = "investors";

/// Remote upsert conflict column
pub const UPSERT_CONFLICT_COLUMN: &str = "identifier";

pub const STATE_CODES: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY",
];

pub fn is_state_code(token: &str) -> bool {
    STATE_CODES.contains(&token)
}
