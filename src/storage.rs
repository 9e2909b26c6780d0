use crate::classify::classify;
use crate::error::Result;
use crate::normalize::enrich;
use crate::types::{Category, FocusFlags, InvestorRecord};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, Row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, instrument};

pub const DEFAULT_QUERY_LIMIT: usize = 100;
const TOP_STATES: usize = 10;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS investors (
        id                  INTEGER PRIMARY KEY,
        identifier          TEXT UNIQUE,
        name                TEXT NOT NULL,
        category            TEXT,
        filing_type         TEXT,
        address             TEXT,
        city                TEXT,
        state               TEXT,
        aum_estimate        TEXT,
        investment_focus    TEXT,
        stage_preference    TEXT,
        sectors             TEXT,
        geography           TEXT,
        website             TEXT,
        contact_email       TEXT,
        notable_investments TEXT,
        decision_makers     TEXT,
        source_url          TEXT,
        has_ai_focus        INTEGER NOT NULL DEFAULT 0,
        has_music_focus     INTEGER NOT NULL DEFAULT 0,
        has_fintech_focus   INTEGER NOT NULL DEFAULT 0,
        retrieved_at        TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_investors_category ON investors(category);
    CREATE INDEX IF NOT EXISTS idx_investors_state ON investors(state);
    CREATE INDEX IF NOT EXISTS idx_investors_ai_focus ON investors(has_ai_focus);
"#;

// Rows sharing an identifier collapse onto the first row's position; the
// later row's fields win.
const UPSERT_SQL: &str = r#"
    INSERT INTO investors (
        identifier, name, category, filing_type, address, city, state,
        aum_estimate, investment_focus, stage_preference, sectors, geography,
        website, contact_email, notable_investments, decision_makers, source_url,
        has_ai_focus, has_music_focus, has_fintech_focus, retrieved_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21)
    ON CONFLICT(identifier) DO UPDATE SET
        name = excluded.name,
        category = excluded.category,
        filing_type = excluded.filing_type,
        address = excluded.address,
        city = excluded.city,
        state = excluded.state,
        aum_estimate = excluded.aum_estimate,
        investment_focus = excluded.investment_focus,
        stage_preference = excluded.stage_preference,
        sectors = excluded.sectors,
        geography = excluded.geography,
        website = excluded.website,
        contact_email = excluded.contact_email,
        notable_investments = excluded.notable_investments,
        decision_makers = excluded.decision_makers,
        source_url = excluded.source_url,
        has_ai_focus = excluded.has_ai_focus,
        has_music_focus = excluded.has_music_focus,
        has_fintech_focus = excluded.has_fintech_focus,
        retrieved_at = excluded.retrieved_at
"#;

/// What `Store::load` does with rows already in the table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// Every load is a full refresh: prior rows are dropped
    #[default]
    Replace,
    /// Rows are upserted by identifier; unrelated rows survive
    Merge,
}

/// Filters for `Store::query`. Unset filters match everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestorQuery {
    pub category: Option<String>,
    pub state: Option<String>,
    pub has_ai_focus: Option<bool>,
    pub has_music_focus: Option<bool>,
    pub has_fintech_focus: Option<bool>,
    /// Each keyword must appear verbatim (case-sensitive) in `sectors` or
    /// `investment_focus`
    pub sectors: Vec<String>,
    /// Case-insensitive substring over name, sectors and investment focus
    pub search: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

impl Default for InvestorQuery {
    fn default() -> Self {
        Self {
            category: None,
            state: None,
            has_ai_focus: None,
            has_music_focus: None,
            has_fintech_focus: None,
            sectors: Vec::new(),
            search: None,
            limit: DEFAULT_QUERY_LIMIT,
            offset: 0,
        }
    }
}

impl InvestorQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, label: impl Into<String>) -> Self {
        self.category = Some(label.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn ai_focus(mut self, flag: bool) -> Self {
        self.has_ai_focus = Some(flag);
        self
    }

    pub fn music_focus(mut self, flag: bool) -> Self {
        self.has_music_focus = Some(flag);
        self
    }

    pub fn fintech_focus(mut self, flag: bool) -> Self {
        self.has_fintech_focus = Some(flag);
        self
    }

    pub fn sector(mut self, keyword: impl Into<String>) -> Self {
        self.sectors.push(keyword.into());
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    fn to_sql(&self) -> (String, Vec<Value>) {
        let mut sql = String::from("SELECT * FROM investors WHERE 1=1");
        let mut args: Vec<Value> = Vec::new();

        if let Some(category) = &self.category {
            sql.push_str(" AND category = ?");
            args.push(Value::Text(category.clone()));
        }
        if let Some(state) = &self.state {
            sql.push_str(" AND state = ?");
            args.push(Value::Text(state.clone()));
        }
        for (column, flag) in [
            ("has_ai_focus", self.has_ai_focus),
            ("has_music_focus", self.has_music_focus),
            ("has_fintech_focus", self.has_fintech_focus),
        ] {
            if let Some(flag) = flag {
                sql.push_str(&format!(" AND {column} = ?"));
                args.push(Value::Integer(i64::from(flag)));
            }
        }
        // instr() is case-sensitive, unlike LIKE
        for keyword in &self.sectors {
            sql.push_str(
                " AND (instr(COALESCE(sectors, ''), ?) > 0 OR instr(COALESCE(investment_focus, ''), ?) > 0)",
            );
            args.push(Value::Text(keyword.clone()));
            args.push(Value::Text(keyword.clone()));
        }
        if let Some(search) = &self.search {
            sql.push_str(
                " AND (name LIKE ? ESCAPE '\\' OR sectors LIKE ? ESCAPE '\\' OR investment_focus LIKE ? ESCAPE '\\')",
            );
            let pattern = format!("%{}%", escape_like(search));
            for _ in 0..3 {
                args.push(Value::Text(pattern.clone()));
            }
        }

        sql.push_str(" ORDER BY id LIMIT ? OFFSET ?");
        args.push(Value::Integer(to_i64(self.limit)));
        args.push(Value::Integer(to_i64(self.offset)));
        (sql, args)
    }
}

fn escape_like(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Aggregate counts over the whole table, computed on demand
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub total: usize,
    pub by_category: BTreeMap<String, usize>,
    /// At most ten states, most frequent first
    pub top_states: Vec<(String, usize)>,
    pub ai_count: usize,
    pub music_count: usize,
    pub fintech_count: usize,
}

/// Local relational store of investor records.
///
/// The store owns its connection; it is released on `close` or drop.
pub struct Store {
    conn: Connection,
    policy: LoadPolicy,
}

impl Store {
    pub fn open<P: AsRef<Path>>(path: P, policy: LoadPolicy) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        info!("Opening investor store at {}", path.display());
        let conn = Connection::open(path)?;
        Self::init(conn, policy)
    }

    pub fn open_in_memory(policy: LoadPolicy) -> Result<Self> {
        Self::init(Connection::open_in_memory()?, policy)
    }

    fn init(conn: Connection, policy: LoadPolicy) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn, policy })
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    /// Writes a batch, deriving any missing location, focus and category
    /// fields first. The write is all-or-nothing.
    #[instrument(skip(self, records), fields(batch = records.len(), policy = ?self.policy))]
    pub fn load(&mut self, records: &[InvestorRecord]) -> Result<usize> {
        let prepared: Vec<InvestorRecord> = records
            .iter()
            .cloned()
            .map(|mut record| {
                enrich(&mut record);
                if record.category.is_none() {
                    record.category = Some(classify(&record.name));
                }
                record
            })
            .collect();

        let tx = self.conn.transaction()?;
        if self.policy == LoadPolicy::Replace {
            let removed = tx.execute("DELETE FROM investors", [])?;
            debug!("Cleared {} existing investors", removed);
        }
        {
            let mut stmt = tx.prepare(UPSERT_SQL)?;
            for record in &prepared {
                let focus = record.focus.unwrap_or_default();
                stmt.execute(params![
                    record.key(),
                    record.name,
                    record.category.map(|c| c.label()),
                    record.filing_type,
                    record.address,
                    record.city,
                    record.state,
                    record.aum_estimate,
                    record.investment_focus,
                    record.stage_preference,
                    record.sectors,
                    record.geography,
                    record.website,
                    record.contact_email,
                    record.notable_investments,
                    record.decision_makers,
                    record.source_url,
                    focus.has_ai_focus,
                    focus.has_music_focus,
                    focus.has_fintech_focus,
                    record
                        .retrieved_at
                        .to_rfc3339_opts(SecondsFormat::Micros, true),
                ])?;
            }
        }
        tx.commit()?;

        info!("Loaded {} investors into database", prepared.len());
        Ok(prepared.len())
    }

    pub fn query(&self, query: &InvestorQuery) -> Result<Vec<InvestorRecord>> {
        let (sql, args) = query.to_sql();
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(args.iter()), record_from_row)?;
        let records = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Every stored record in storage order.
    pub fn all(&self) -> Result<Vec<InvestorRecord>> {
        self.query(&InvestorQuery::new().limit(usize::MAX))
    }

    pub fn family_offices(&self) -> Result<Vec<InvestorRecord>> {
        self.query(&InvestorQuery::new().category(Category::FamilyOffice.label()))
    }

    pub fn vc_firms(&self) -> Result<Vec<InvestorRecord>> {
        self.query(&InvestorQuery::new().category(Category::VentureCapital.label()))
    }

    pub fn ai_investors(&self) -> Result<Vec<InvestorRecord>> {
        self.query(&InvestorQuery::new().ai_focus(true))
    }

    pub fn music_investors(&self) -> Result<Vec<InvestorRecord>> {
        self.query(&InvestorQuery::new().music_focus(true))
    }

    pub fn fintech_investors(&self) -> Result<Vec<InvestorRecord>> {
        self.query(&InvestorQuery::new().fintech_focus(true))
    }

    pub fn aggregate_stats(&self) -> Result<StoreStats> {
        let total: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM investors", [], |row| row.get(0))?;

        let mut by_category = BTreeMap::new();
        let mut stmt = self.conn.prepare(
            "SELECT category, COUNT(*) FROM investors WHERE category IS NOT NULL GROUP BY category",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;
        for row in rows {
            let (category, count) = row?;
            by_category.insert(category, count as usize);
        }

        let mut stmt = self.conn.prepare(
            "SELECT state, COUNT(*) AS n FROM investors WHERE state IS NOT NULL
             GROUP BY state ORDER BY n DESC, state ASC LIMIT ?1",
        )?;
        let top_states = stmt
            .query_map(params![TOP_STATES as i64], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let (ai, music, fintech): (i64, i64, i64) = self.conn.query_row(
            "SELECT COALESCE(SUM(has_ai_focus), 0), COALESCE(SUM(has_music_focus), 0),
                    COALESCE(SUM(has_fintech_focus), 0) FROM investors",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        Ok(StoreStats {
            total: total as usize,
            by_category,
            top_states,
            ai_count: ai as usize,
            music_count: music as usize,
            fintech_count: fintech as usize,
        })
    }

    /// Releases the connection, surfacing any error from closing it.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e.into())
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<InvestorRecord> {
    let retrieved_raw: String = row.get("retrieved_at")?;
    let retrieved_at = DateTime::parse_from_rfc3339(&retrieved_raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?;
    let category: Option<String> = row.get("category")?;

    Ok(InvestorRecord {
        identifier: row.get("identifier")?,
        name: row.get("name")?,
        category: category.and_then(|label| label.parse().ok()),
        filing_type: row.get("filing_type")?,
        address: row.get("address")?,
        city: row.get("city")?,
        state: row.get("state")?,
        aum_estimate: row.get("aum_estimate")?,
        investment_focus: row.get("investment_focus")?,
        stage_preference: row.get("stage_preference")?,
        sectors: row.get("sectors")?,
        geography: row.get("geography")?,
        website: row.get("website")?,
        contact_email: row.get("contact_email")?,
        notable_investments: row.get("notable_investments")?,
        decision_makers: row.get("decision_makers")?,
        source_url: row.get("source_url")?,
        focus: Some(FocusFlags {
            has_ai_focus: row.get("has_ai_focus")?,
            has_music_focus: row.get("has_music_focus")?,
            has_fintech_focus: row.get("has_fintech_focus")?,
        }),
        retrieved_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::sample::generate_sample_batch;

    fn firm(id: &str, name: &str, category: Category, sectors: &str) -> InvestorRecord {
        let mut record = InvestorRecord::new(name, Utc::now());
        record.identifier = Some(id.to_string());
        record.category = Some(category);
        record.sectors = Some(sectors.to_string());
        record.address = Some("2800 Sand Hill Road, Menlo Park, CA 94025".to_string());
        record
    }

    fn four_and_four() -> Vec<InvestorRecord> {
        let mut batch = Vec::new();
        for i in 0..4 {
            batch.push(firm(&format!("fo-{i}"), &format!("Family {i}"), Category::FamilyOffice, "Fintech"));
            batch.push(firm(&format!("vc-{i}"), &format!("Venture {i}"), Category::VentureCapital, "AI/ML"));
        }
        batch
    }

    #[test]
    fn test_load_derives_missing_fields() {
        let mut store = Store::open_in_memory(LoadPolicy::Replace).unwrap();
        let mut record = InvestorRecord::new("Walton Family Holdings", Utc::now());
        record.identifier = Some("1".to_string());
        record.address = Some("10 Rockefeller Plaza, New York, NY 10020".to_string());
        record.sectors = Some("Music, Live Events".to_string());

        assert_eq!(store.load(&[record]).unwrap(), 1);

        let stored = &store.all().unwrap()[0];
        assert_eq!(stored.state.as_deref(), Some("NY"));
        assert_eq!(stored.city.as_deref(), Some("New York"));
        assert_eq!(stored.category, Some(Category::FamilyOffice));
        assert!(stored.has_music_focus());
        assert!(!stored.has_ai_focus());
    }

    #[test]
    fn test_duplicate_identifier_keeps_later_record() {
        let mut store = Store::open_in_memory(LoadPolicy::Replace).unwrap();
        let first = firm("dup", "First Name", Category::VentureCapital, "SaaS");
        let second = firm("dup", "Second Name", Category::PrivateEquity, "Fintech");

        store.load(&[first, second]).unwrap();

        let rows = store.all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Second Name");
        assert_eq!(rows[0].category, Some(Category::PrivateEquity));
        assert!(rows[0].has_fintech_focus());
    }

    #[test]
    fn test_reload_is_idempotent() {
        let mut store = Store::open_in_memory(LoadPolicy::Replace).unwrap();
        let batch = generate_sample_batch();

        store.load(&batch).unwrap();
        let first = (store.all().unwrap(), store.aggregate_stats().unwrap());
        store.load(&batch).unwrap();
        let second = (store.all().unwrap(), store.aggregate_stats().unwrap());

        assert_eq!(first, second);
    }

    #[test]
    fn test_replace_policy_drops_unrelated_rows() {
        let mut store = Store::open_in_memory(LoadPolicy::Replace).unwrap();
        store.load(&[firm("a", "Alpha", Category::HedgeFund, "")]).unwrap();
        store.load(&[firm("b", "Beta", Category::HedgeFund, "")]).unwrap();

        let names: Vec<String> = store.all().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Beta"]);
    }

    #[test]
    fn test_merge_policy_keeps_unrelated_rows() {
        let mut store = Store::open_in_memory(LoadPolicy::Merge).unwrap();
        store.load(&[firm("a", "Alpha", Category::HedgeFund, "")]).unwrap();
        store
            .load(&[
                firm("b", "Beta", Category::HedgeFund, ""),
                firm("a", "Alpha Renamed", Category::HedgeFund, ""),
            ])
            .unwrap();

        let names: Vec<String> = store.all().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Alpha Renamed", "Beta"]);
    }

    #[test]
    fn test_records_without_identifier_are_all_kept() {
        let mut store = Store::open_in_memory(LoadPolicy::Replace).unwrap();
        let mut a = firm("", "No Id One", Category::HedgeFund, "");
        a.identifier = None;
        let b = firm("  ", "No Id Two", Category::HedgeFund, "");

        store.load(&[a, b]).unwrap();
        assert_eq!(store.aggregate_stats().unwrap().total, 2);
    }

    #[test]
    fn test_failed_load_leaves_table_untouched() {
        let mut store = Store::open_in_memory(LoadPolicy::Replace).unwrap();
        store.load(&four_and_four()).unwrap();
        store
            .conn
            .execute_batch(
                "CREATE TRIGGER reject_poison BEFORE INSERT ON investors
                 WHEN NEW.name = 'Poison' BEGIN SELECT RAISE(ABORT, 'poison row'); END;",
            )
            .unwrap();

        let batch = vec![
            firm("x", "Fine", Category::HedgeFund, ""),
            firm("y", "Poison", Category::HedgeFund, ""),
        ];
        assert!(store.load(&batch).is_err());

        let stats = store.aggregate_stats().unwrap();
        assert_eq!(stats.total, 8);
        assert_eq!(stats.by_category.get("Hedge Fund"), None);
    }

    #[test]
    fn test_query_category_with_limit() {
        let mut store = Store::open_in_memory(LoadPolicy::Replace).unwrap();
        store.load(&four_and_four()).unwrap();

        let rows = store
            .query(&InvestorQuery::new().category("Family Office").limit(3))
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.category == Some(Category::FamilyOffice)));
    }

    #[test]
    fn test_query_offset_pages_in_storage_order() {
        let mut store = Store::open_in_memory(LoadPolicy::Replace).unwrap();
        store.load(&four_and_four()).unwrap();

        let page = store
            .query(&InvestorQuery::new().category("Venture Capital").limit(2).offset(2))
            .unwrap();
        let names: Vec<&str> = page.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Venture 2", "Venture 3"]);
    }

    #[test]
    fn test_unknown_category_yields_no_rows() {
        let mut store = Store::open_in_memory(LoadPolicy::Replace).unwrap();
        store.load(&four_and_four()).unwrap();

        let rows = store.query(&InvestorQuery::new().category("Sovereign Wealth")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_sector_keywords_are_case_sensitive_and_combined() {
        let mut store = Store::open_in_memory(LoadPolicy::Replace).unwrap();
        let mut both = firm("1", "Both", Category::VentureCapital, "AI/ML, Fintech");
        both.investment_focus = Some("Seed".to_string());
        let only_ai = firm("2", "Only AI", Category::VentureCapital, "AI/ML");
        store.load(&[both, only_ai]).unwrap();

        let ai = store.query(&InvestorQuery::new().sector("AI")).unwrap();
        assert_eq!(ai.len(), 2);

        let combined = store
            .query(&InvestorQuery::new().sector("AI").sector("Fintech"))
            .unwrap();
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].name, "Both");

        let focus = store.query(&InvestorQuery::new().sector("Seed")).unwrap();
        assert_eq!(focus.len(), 1);

        let lowercase = store.query(&InvestorQuery::new().sector("fintech")).unwrap();
        assert!(lowercase.is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut store = Store::open_in_memory(LoadPolicy::Replace).unwrap();
        store.load(&generate_sample_batch()).unwrap();

        let rows = store.query(&InvestorQuery::new().search("sequoia")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Sequoia Capital");

        let literal = store.query(&InvestorQuery::new().search("100%")).unwrap();
        assert!(literal.is_empty());
    }

    #[test]
    fn test_shortcuts_and_flag_filters() {
        let mut store = Store::open_in_memory(LoadPolicy::Replace).unwrap();
        store.load(&four_and_four()).unwrap();

        assert_eq!(store.family_offices().unwrap().len(), 4);
        assert_eq!(store.vc_firms().unwrap().len(), 4);
        assert_eq!(store.ai_investors().unwrap().len(), 4);
        assert_eq!(store.fintech_investors().unwrap().len(), 4);
        assert!(store.music_investors().unwrap().is_empty());

        let not_ai = store
            .query(&InvestorQuery::new().ai_focus(false).state("CA"))
            .unwrap();
        assert!(not_ai.iter().all(|r| r.category == Some(Category::FamilyOffice)));
        assert_eq!(not_ai.len(), 4);
    }

    #[test]
    fn test_aggregate_stats() {
        let mut store = Store::open_in_memory(LoadPolicy::Replace).unwrap();
        let mut batch = four_and_four();
        let mut ny = firm("ny", "Hudson Hedge", Category::HedgeFund, "Music");
        ny.address = Some("New York, NY".to_string());
        batch.push(ny);
        store.load(&batch).unwrap();

        let stats = store.aggregate_stats().unwrap();
        assert_eq!(stats.total, 9);
        assert_eq!(stats.by_category.get("Family Office"), Some(&4));
        assert_eq!(stats.by_category.get("Venture Capital"), Some(&4));
        assert_eq!(stats.by_category.get("Hedge Fund"), Some(&1));
        assert_eq!(
            stats.top_states,
            vec![("CA".to_string(), 8), ("NY".to_string(), 1)]
        );
        assert_eq!(stats.ai_count, 4);
        assert_eq!(stats.music_count, 1);
        assert_eq!(stats.fintech_count, 4);
    }

    #[test]
    fn test_open_on_disk_and_close() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("intel.db");

        let mut store = Store::open(&path, LoadPolicy::Replace).unwrap();
        store.load(&generate_sample_batch()).unwrap();
        store.close().unwrap();

        let reopened = Store::open(&path, LoadPolicy::Replace).unwrap();
        assert_eq!(reopened.aggregate_stats().unwrap().total, 12);
    }
}
