//! Record sources: the filings registry and the offline sample batch.

pub mod edgar;
pub mod sample;

use crate::types::{FilingType, InvestorRecord};
use serde::Serialize;
use std::fmt;

/// Why a registry candidate did not become a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    MissingIdentifier,
    MissingName,
    RequestFailed(String),
    UnexpectedStatus(u16),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingIdentifier => f.write_str("feed entry has no identifier"),
            SkipReason::MissingName => f.write_str("feed entry has no name"),
            SkipReason::RequestFailed(err) => write!(f, "detail request failed: {err}"),
            SkipReason::UnexpectedStatus(status) => {
                write!(f, "detail request returned HTTP {status}")
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedItem {
    pub identifier: Option<String>,
    pub name: Option<String>,
    pub reason: SkipReason,
}

/// Result of processing one registry candidate
#[derive(Debug, Clone)]
pub enum ItemOutcome {
    Acquired(InvestorRecord),
    Skipped(SkippedItem),
}

/// Everything one acquisition phase produced, including what it dropped
#[derive(Debug, Clone)]
pub struct AcquisitionReport {
    pub filing_type: FilingType,
    pub candidates: usize,
    pub records: Vec<InvestorRecord>,
    pub skipped: Vec<SkippedItem>,
}

impl AcquisitionReport {
    pub fn new(filing_type: FilingType) -> Self {
        Self {
            filing_type,
            candidates: 0,
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: ItemOutcome) {
        self.candidates += 1;
        match outcome {
            ItemOutcome::Acquired(record) => self.records.push(record),
            ItemOutcome::Skipped(item) => self.skipped.push(item),
        }
    }
}
