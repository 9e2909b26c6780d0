use crate::app::ports::RemoteTablePort;
use crate::classify::classify;
use crate::constants::UPSERT_CONFLICT_COLUMN;
use crate::normalize::enrich;
use crate::types::InvestorRecord;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{error, info, instrument, warn};

pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Row shape of the remote `investors` table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteInvestorRow {
    pub identifier: Option<String>,
    pub name: String,
    pub category: Option<String>,
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
    pub has_ai_focus: bool,
    pub has_music_focus: bool,
    pub has_fintech_focus: bool,
}

impl RemoteInvestorRow {
    /// Derives any missing location, focus and category fields before
    /// mapping.
    pub fn from_record(record: &InvestorRecord) -> Self {
        let mut record = record.clone();
        enrich(&mut record);
        if record.category.is_none() {
            record.category = Some(classify(&record.name));
        }
        let focus = record.focus.unwrap_or_default();

        Self {
            identifier: record.key().map(str::to_string),
            name: record.name,
            category: record.category.map(|c| c.label().to_string()),
            filing_type: record.filing_type,
            address: record.address,
            city: record.city,
            state: record.state,
            aum_estimate: record.aum_estimate,
            investment_focus: record.investment_focus,
            stage_preference: record.stage_preference,
            sectors: record.sectors,
            geography: record.geography,
            website: record.website,
            contact_email: record.contact_email,
            notable_investments: record.notable_investments,
            decision_makers: record.decision_makers,
            source_url: record.source_url,
            has_ai_focus: focus.has_ai_focus,
            has_music_focus: focus.has_music_focus,
            has_fintech_focus: focus.has_fintech_focus,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub batches: usize,
    pub batches_failed: usize,
    pub rows_upserted: usize,
    pub rows_inserted: usize,
    pub failures: Vec<UploadFailure>,
}

impl UploadReport {
    pub fn rows_written(&self) -> usize {
        self.rows_upserted + self.rows_inserted
    }
}

/// Keeps one row per identifier: the last one, at the position of the
/// first. A single upsert call may not touch the same key twice.
fn collapse_identifiers(rows: impl Iterator<Item = RemoteInvestorRow>) -> Vec<RemoteInvestorRow> {
    let mut collapsed: Vec<RemoteInvestorRow> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for row in rows {
        match row.identifier.clone() {
            Some(id) => match positions.get(&id) {
                Some(&at) => collapsed[at] = row,
                None => {
                    positions.insert(id, collapsed.len());
                    collapsed.push(row);
                }
            },
            None => collapsed.push(row),
        }
    }
    collapsed
}

/// Upserts `records` in chunks keyed on identifier. A rejected chunk is
/// retried one row at a time so a single bad row only loses itself.
#[instrument(skip(table, records), fields(records = records.len()))]
pub async fn upsert_remote(
    table: &dyn RemoteTablePort,
    records: &[InvestorRecord],
    batch_size: usize,
) -> UploadReport {
    let rows = collapse_identifiers(records.iter().map(RemoteInvestorRow::from_record));
    let batch_size = batch_size.max(1);
    let total_batches = rows.len().div_ceil(batch_size);
    let mut report = UploadReport::default();

    for (index, batch) in rows.chunks(batch_size).enumerate() {
        report.batches += 1;
        match table.upsert(batch, UPSERT_CONFLICT_COLUMN).await {
            Ok(()) => {
                report.rows_upserted += batch.len();
                info!("Uploaded batch {}/{}", index + 1, total_batches);
            }
            Err(e) => {
                report.batches_failed += 1;
                warn!("Error uploading batch {}/{}: {}", index + 1, total_batches, e);
                for row in batch {
                    match table.insert(row).await {
                        Ok(()) => report.rows_inserted += 1,
                        Err(inner) => {
                            error!("Failed to insert {}: {}", row.name, inner);
                            report.failures.push(UploadFailure {
                                name: row.name.clone(),
                                error: inner.to_string(),
                            });
                        }
                    }
                }
            }
        }
    }

    info!(
        "Upload complete: {} rows written, {} failed",
        report.rows_written(),
        report.failures.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{IntelError, Result};
    use crate::types::Category;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    /// Rejects any upsert containing a poisoned name, and any insert of it.
    #[derive(Default)]
    struct FakeTable {
        poisoned: Option<String>,
        upserts: Mutex<Vec<(usize, String)>>,
        stored: Mutex<Vec<String>>,
    }

    impl FakeTable {
        fn poisoned(name: &str) -> Self {
            Self {
                poisoned: Some(name.to_string()),
                ..Self::default()
            }
        }

        fn is_poison(&self, row: &RemoteInvestorRow) -> bool {
            self.poisoned.as_deref() == Some(row.name.as_str())
        }
    }

    #[async_trait]
    impl RemoteTablePort for FakeTable {
        async fn upsert(&self, rows: &[RemoteInvestorRow], on_conflict: &str) -> Result<()> {
            self.upserts
                .lock()
                .unwrap()
                .push((rows.len(), on_conflict.to_string()));
            if rows.iter().any(|row| self.is_poison(row)) {
                return Err(IntelError::Api {
                    message: "violates check constraint".to_string(),
                });
            }
            let mut stored = self.stored.lock().unwrap();
            stored.extend(rows.iter().map(|r| r.name.clone()));
            Ok(())
        }

        async fn insert(&self, row: &RemoteInvestorRow) -> Result<()> {
            if self.is_poison(row) {
                return Err(IntelError::Api {
                    message: "violates check constraint".to_string(),
                });
            }
            self.stored.lock().unwrap().push(row.name.clone());
            Ok(())
        }
    }

    fn records(n: usize) -> Vec<InvestorRecord> {
        (0..n)
            .map(|i| {
                let mut record = InvestorRecord::new(format!("Fund {i}"), Utc::now());
                record.identifier = Some(format!("{i:010}"));
                record
            })
            .collect()
    }

    #[tokio::test]
    async fn test_upload_in_batches() {
        let table = FakeTable::default();
        let report = upsert_remote(&table, &records(250), DEFAULT_BATCH_SIZE).await;

        assert_eq!(report.batches, 3);
        assert_eq!(report.rows_upserted, 250);
        assert_eq!(report.batches_failed, 0);
        let upserts = table.upserts.lock().unwrap().clone();
        assert_eq!(
            upserts,
            vec![
                (100, "identifier".to_string()),
                (100, "identifier".to_string()),
                (50, "identifier".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_batch_falls_back_to_single_inserts() {
        let table = FakeTable::poisoned("Fund 3");
        let report = upsert_remote(&table, &records(5), 2).await;

        assert_eq!(report.batches, 3);
        assert_eq!(report.batches_failed, 1);
        assert_eq!(report.rows_upserted, 3);
        assert_eq!(report.rows_inserted, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].name, "Fund 3");
        assert!(report.failures[0].error.contains("check constraint"));

        let mut stored = table.stored.lock().unwrap().clone();
        stored.sort();
        assert_eq!(stored, vec!["Fund 0", "Fund 1", "Fund 2", "Fund 4"]);
    }

    #[tokio::test]
    async fn test_empty_upload_makes_no_calls() {
        let table = FakeTable::default();
        let report = upsert_remote(&table, &[], DEFAULT_BATCH_SIZE).await;

        assert_eq!(report, UploadReport::default());
        assert!(table.upserts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_row_derives_missing_fields() {
        let mut record = InvestorRecord::new("Sound Capital", Utc::now());
        record.identifier = Some("  ".to_string());
        record.category = Some(Category::VentureCapital);
        record.address = Some("1 Music Row, Nashville, TN 37203".to_string());
        record.sectors = Some("Music Tech".to_string());

        let row = RemoteInvestorRow::from_record(&record);
        assert_eq!(row.identifier, None);
        assert_eq!(row.category.as_deref(), Some("Venture Capital"));
        assert_eq!(row.state.as_deref(), Some("TN"));
        assert_eq!(row.city.as_deref(), Some("Nashville"));
        assert!(row.has_music_focus);
        assert!(!row.has_fintech_focus);
    }

    /// Keyed like the hosted table: a batch may not hit one key twice and
    /// a plain insert of an existing key is a duplicate.
    #[derive(Default)]
    struct KeyedTable {
        rows: Mutex<HashMap<String, String>>,
        upserts: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl RemoteTablePort for KeyedTable {
        async fn upsert(&self, rows: &[RemoteInvestorRow], _on_conflict: &str) -> Result<()> {
            self.upserts.lock().unwrap().push(rows.len());
            let mut seen = std::collections::HashSet::new();
            if rows
                .iter()
                .filter_map(|r| r.identifier.as_deref())
                .any(|id| !seen.insert(id))
            {
                return Err(IntelError::Api {
                    message: "ON CONFLICT DO UPDATE command cannot affect row a second time"
                        .to_string(),
                });
            }
            let mut stored = self.rows.lock().unwrap();
            for row in rows {
                if let Some(id) = &row.identifier {
                    stored.insert(id.clone(), row.name.clone());
                }
            }
            Ok(())
        }

        async fn insert(&self, row: &RemoteInvestorRow) -> Result<()> {
            let mut stored = self.rows.lock().unwrap();
            let id = row.identifier.clone().unwrap_or_default();
            if stored.contains_key(&id) {
                return Err(IntelError::Api {
                    message: "duplicate key".to_string(),
                });
            }
            stored.insert(id, row.name.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_repeated_identifier_uploads_later_record() {
        let table = KeyedTable::default();
        let mut old = InvestorRecord::new("Old Name", Utc::now());
        old.identifier = Some("42".to_string());
        let mut other = InvestorRecord::new("Other Fund", Utc::now());
        other.identifier = Some("7".to_string());
        let mut new = InvestorRecord::new("New Name", Utc::now());
        new.identifier = Some("42".to_string());

        let report = upsert_remote(&table, &[old, other, new], DEFAULT_BATCH_SIZE).await;

        assert_eq!(report.batches_failed, 0);
        assert!(report.failures.is_empty());
        assert_eq!(report.rows_upserted, 2);
        assert_eq!(*table.upserts.lock().unwrap(), vec![2]);
        let stored = table.rows.lock().unwrap();
        assert_eq!(stored.get("42").map(String::as_str), Some("New Name"));
        assert_eq!(stored.get("7").map(String::as_str), Some("Other Fund"));
    }

    #[test]
    fn test_collapse_keeps_first_position_and_unkeyed_rows() {
        let row = |id: Option<&str>, name: &str| {
            let mut record = InvestorRecord::new(name, Utc::now());
            record.identifier = id.map(str::to_string);
            RemoteInvestorRow::from_record(&record)
        };
        let collapsed = collapse_identifiers(
            vec![
                row(Some("1"), "First"),
                row(None, "Unkeyed A"),
                row(Some("2"), "Second"),
                row(Some("1"), "First Renamed"),
                row(None, "Unkeyed B"),
            ]
            .into_iter(),
        );

        let names: Vec<&str> = collapsed.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["First Renamed", "Unkeyed A", "Second", "Unkeyed B"]);
    }

    #[test]
    fn test_row_classifies_missing_category() {
        let unlabelled = InvestorRecord::new("Harbor Family Office", Utc::now());
        let row = RemoteInvestorRow::from_record(&unlabelled);
        assert_eq!(row.category.as_deref(), Some("Family Office"));

        let mut labelled = InvestorRecord::new("Harbor Family Office", Utc::now());
        labelled.category = Some(Category::HedgeFund);
        let row = RemoteInvestorRow::from_record(&labelled);
        assert_eq!(row.category.as_deref(), Some("Hedge Fund"));
    }
}
