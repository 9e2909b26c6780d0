use crate::constants::{ADVISER_REGISTRATION_CODE, INSTITUTIONAL_HOLDINGS_CODE};
use crate::error::IntelError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse investor category, derived from name keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Family Office")]
    FamilyOffice,
    #[serde(rename = "Venture Capital")]
    VentureCapital,
    #[serde(rename = "Private Equity")]
    PrivateEquity,
    #[serde(rename = "Hedge Fund")]
    HedgeFund,
    #[serde(rename = "Institutional Investor")]
    InstitutionalInvestor,
    #[serde(rename = "Other Institutional")]
    OtherInstitutional,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::FamilyOffice,
        Category::VentureCapital,
        Category::PrivateEquity,
        Category::HedgeFund,
        Category::InstitutionalInvestor,
        Category::OtherInstitutional,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::FamilyOffice => "Family Office",
            Category::VentureCapital => "Venture Capital",
            Category::PrivateEquity => "Private Equity",
            Category::HedgeFund => "Hedge Fund",
            Category::InstitutionalInvestor => "Institutional Investor",
            Category::OtherInstitutional => "Other Institutional",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = IntelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label() == trimmed)
            .ok_or_else(|| IntelError::InvalidInput(format!("unknown category '{trimmed}'")))
    }
}

/// Kind of regulatory disclosure used to select filers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilingType {
    /// Investment adviser registration
    AdviserRegistration,
    /// Institutional holdings report
    InstitutionalHoldings,
}

impl FilingType {
    pub fn code(&self) -> &'static str {
        match self {
            FilingType::AdviserRegistration => ADVISER_REGISTRATION_CODE,
            FilingType::InstitutionalHoldings => INSTITUTIONAL_HOLDINGS_CODE,
        }
    }
}

impl fmt::Display for FilingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Sector focus flags derived from free-text sector and focus fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusFlags {
    pub has_ai_focus: bool,
    pub has_music_focus: bool,
    pub has_fintech_focus: bool,
}

/// A single investment firm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestorRecord {
    pub identifier: Option<String>,
    pub name: String,
    pub category: Option<Category>,
    pub filing_type: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub aum_estimate: Option<String>,
    pub investment_focus: Option<String>,
    pub stage_preference: Option<String>,
    pub sectors: Option<String>,
    pub geography: Option<String>,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub notable_investments: Option<String>,
    pub decision_makers: Option<String>,
    pub source_url: Option<String>,
    /// `None` until the normalizer has run
    pub focus: Option<FocusFlags>,
    pub retrieved_at: DateTime<Utc>,
}

impl InvestorRecord {
    /// Minimal record as produced by acquisition; everything derived is empty.
    pub fn new(name: impl Into<String>, retrieved_at: DateTime<Utc>) -> Self {
        Self {
            identifier: None,
            name: name.into(),
            category: None,
            filing_type: None,
            address: None,
            city: None,
            state: None,
            aum_estimate: None,
            investment_focus: None,
            stage_preference: None,
            sectors: None,
            geography: None,
            website: None,
            contact_email: None,
            notable_investments: None,
            decision_makers: None,
            source_url: None,
            focus: None,
            retrieved_at,
        }
    }

    /// Identifier usable as a unique key; blank identifiers count as absent.
    pub fn key(&self) -> Option<&str> {
        self.identifier
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    pub fn has_ai_focus(&self) -> bool {
        self.focus.map(|f| f.has_ai_focus).unwrap_or(false)
    }

    pub fn has_music_focus(&self) -> bool {
        self.focus.map(|f| f.has_music_focus).unwrap_or(false)
    }

    pub fn has_fintech_focus(&self) -> bool {
        self.focus.map(|f| f.has_fintech_focus).unwrap_or(false)
    }
}
