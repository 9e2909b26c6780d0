use crate::error::{IntelError, Result};
use crate::types::{Category, FocusFlags, InvestorRecord};
use chrono::{DateTime, SecondsFormat, Utc};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Header row; must follow `TabularRow` field order.
pub const COLUMNS: [&str; 21] = [
    "identifier",
    "name",
    "category",
    "filing_type",
    "address",
    "city",
    "state",
    "aum_estimate",
    "investment_focus",
    "stage_preference",
    "sectors",
    "geography",
    "website",
    "contact_email",
    "notable_investments",
    "decision_makers",
    "source_url",
    "has_ai_focus",
    "has_music_focus",
    "has_fintech_focus",
    "retrieved_at",
];

#[derive(Debug, Serialize, Deserialize)]
struct TabularRow {
    identifier: Option<String>,
    name: String,
    category: Option<String>,
    filing_type: Option<String>,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    aum_estimate: Option<String>,
    investment_focus: Option<String>,
    stage_preference: Option<String>,
    sectors: Option<String>,
    geography: Option<String>,
    website: Option<String>,
    contact_email: Option<String>,
    notable_investments: Option<String>,
    decision_makers: Option<String>,
    source_url: Option<String>,
    has_ai_focus: Option<bool>,
    has_music_focus: Option<bool>,
    has_fintech_focus: Option<bool>,
    retrieved_at: Option<String>,
}

impl From<&InvestorRecord> for TabularRow {
    fn from(record: &InvestorRecord) -> Self {
        Self {
            identifier: record.identifier.clone(),
            name: record.name.clone(),
            category: record.category.map(|c| c.label().to_string()),
            filing_type: record.filing_type.clone(),
            address: record.address.clone(),
            city: record.city.clone(),
            state: record.state.clone(),
            aum_estimate: record.aum_estimate.clone(),
            investment_focus: record.investment_focus.clone(),
            stage_preference: record.stage_preference.clone(),
            sectors: record.sectors.clone(),
            geography: record.geography.clone(),
            website: record.website.clone(),
            contact_email: record.contact_email.clone(),
            notable_investments: record.notable_investments.clone(),
            decision_makers: record.decision_makers.clone(),
            source_url: record.source_url.clone(),
            has_ai_focus: record.focus.map(|f| f.has_ai_focus),
            has_music_focus: record.focus.map(|f| f.has_music_focus),
            has_fintech_focus: record.focus.map(|f| f.has_fintech_focus),
            retrieved_at: Some(
                record
                    .retrieved_at
                    .to_rfc3339_opts(SecondsFormat::Micros, true),
            ),
        }
    }
}

impl TabularRow {
    fn into_record(self, line: usize) -> Result<InvestorRecord> {
        let category = match non_empty(self.category) {
            Some(label) => Some(label.parse::<Category>().map_err(|_| {
                IntelError::InvalidInput(format!("row {line}: unknown category '{label}'"))
            })?),
            None => None,
        };

        let retrieved_at = match non_empty(self.retrieved_at) {
            Some(raw) => DateTime::parse_from_rfc3339(&raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| {
                    IntelError::InvalidInput(format!("row {line}: bad retrieved_at '{raw}': {e}"))
                })?,
            None => Utc::now(),
        };

        // Any recorded flag means the row was normalized; otherwise leave
        // the flags for the normalizer.
        let focus = match (self.has_ai_focus, self.has_music_focus, self.has_fintech_focus) {
            (None, None, None) => None,
            (ai, music, fintech) => Some(FocusFlags {
                has_ai_focus: ai.unwrap_or(false),
                has_music_focus: music.unwrap_or(false),
                has_fintech_focus: fintech.unwrap_or(false),
            }),
        };

        let name = self.name.trim();
        if name.is_empty() {
            return Err(IntelError::MissingField(format!("row {line}: name")));
        }

        let mut record = InvestorRecord::new(name, retrieved_at);
        record.identifier = non_empty(self.identifier);
        record.category = category;
        record.filing_type = non_empty(self.filing_type);
        record.address = non_empty(self.address);
        record.city = non_empty(self.city);
        record.state = non_empty(self.state);
        record.aum_estimate = non_empty(self.aum_estimate);
        record.investment_focus = non_empty(self.investment_focus);
        record.stage_preference = non_empty(self.stage_preference);
        record.sectors = non_empty(self.sectors);
        record.geography = non_empty(self.geography);
        record.website = non_empty(self.website);
        record.contact_email = non_empty(self.contact_email);
        record.notable_investments = non_empty(self.notable_investments);
        record.decision_makers = non_empty(self.decision_makers);
        record.source_url = non_empty(self.source_url);
        record.focus = focus;
        Ok(record)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Writes `records` as CSV with a header row, replacing any existing file.
pub fn write_tabular_file<P: AsRef<Path>>(records: &[InvestorRecord], path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    // Header written by hand so an empty batch still gets one
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(TabularRow::from(record))?;
    }
    writer.flush()?;

    info!("Wrote {} investors to {}", records.len(), path.display());
    Ok(())
}

/// Reads a CSV written by `write_tabular_file` (or any file with a subset
/// of its columns). Empty cells and missing columns come back absent.
pub fn read_tabular_file<P: AsRef<Path>>(path: P) -> Result<Vec<InvestorRecord>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<TabularRow>().enumerate() {
        // header is line 1
        let line = index + 2;
        let row = row.map_err(|e| IntelError::InvalidInput(format!("row {line}: {e}")))?;
        records.push(row.into_record(line)?);
    }

    debug!("Read {} investors from {}", records.len(), path.display());
    Ok(records)
}

/// Reads the CSV handed to a command-line entry point. Missing or
/// malformed input comes back as a console message ending in `usage`.
pub fn read_input_file(path: &Path, usage: &str) -> std::result::Result<Vec<InvestorRecord>, String> {
    if !path.exists() {
        return Err(format!("File not found: {}\n{usage}", path.display()));
    }
    read_tabular_file(path).map_err(|e| format!("Could not read {}: {e}\n{usage}", path.display()))
}
