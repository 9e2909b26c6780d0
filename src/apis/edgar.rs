use crate::apis::{AcquisitionReport, ItemOutcome, SkipReason, SkippedItem};
use crate::app::ports::{HttpClientPort, HttpGetRequest};
use crate::config::RegistryConfig;
use crate::constants::{BROWSE_PATH, FEED_BOILERPLATE_MARKERS};
use crate::error::{IntelError, Result};
use crate::types::{FilingType, InvestorRecord};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

static ENTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<entry\b[^>]*>(.*?)</entry>").unwrap());
static CIK: Lazy<Regex> = Lazy::new(|| Regex::new(r"<cik>\s*(\d+)\s*</cik>").unwrap());
static TITLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<title[^>]*>(.+?)</title>").unwrap());
static MAILER: Lazy<Selector> = Lazy::new(|| Selector::parse("div.mailer").unwrap());

/// One filer as listed in the registry feed, before any detail lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedCandidate {
    pub identifier: Option<String>,
    pub name: Option<String>,
}

/// Extracts one candidate per feed entry, dropping entries whose title is
/// feed metadata rather than a filer name.
pub fn parse_feed(content: &str) -> Vec<FeedCandidate> {
    ENTRY
        .captures_iter(content)
        .filter_map(|caps| {
            let body = caps.get(1)?.as_str();
            let identifier = CIK.captures(body).map(|c| c[1].to_string());
            let name = TITLE
                .captures(body)
                .map(|c| decode_entities(c[1].trim()))
                .filter(|n| !n.is_empty());

            if let Some(n) = &name {
                if is_feed_boilerplate(n) {
                    debug!("Dropping feed metadata entry: {}", n);
                    return None;
                }
            }
            Some(FeedCandidate { identifier, name })
        })
        .collect()
}

fn is_feed_boilerplate(title: &str) -> bool {
    FEED_BOILERPLATE_MARKERS.iter().any(|m| title.contains(m))
}

fn decode_entities(text: &str) -> String {
    Html::parse_fragment(text)
        .root_element()
        .text()
        .collect::<String>()
}

/// Free-text address from the first `div.mailer` block of a detail page.
pub fn parse_mailer_address(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let mailer = document.select(&MAILER).next()?;
    let text = mailer.text().collect::<Vec<_>>().join(" ");
    let address = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!address.is_empty()).then_some(address)
}

/// Queries the filings registry for filers of a given document type.
pub struct EdgarAcquirer {
    http: Arc<dyn HttpClientPort>,
    config: RegistryConfig,
}

impl EdgarAcquirer {
    pub fn new(http: Arc<dyn HttpClientPort>, config: RegistryConfig) -> Self {
        Self { http, config }
    }

    fn browse_url(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), BROWSE_PATH)
    }

    fn source_url(&self, identifier: &str, filing_type: FilingType) -> String {
        format!(
            "{}?action=getcompany&CIK={}&type={}",
            self.browse_url(),
            identifier,
            filing_type.code()
        )
    }

    /// Fetches the filer feed, then one detail page per candidate.
    ///
    /// Only a failure of the feed request is returned as an error; every
    /// per-candidate failure is recorded in the report and processing
    /// continues.
    #[instrument(skip(self))]
    pub async fn acquire_by_filing_type(
        &self,
        filing_type: FilingType,
        region_filter: Option<&str>,
        limit: usize,
    ) -> Result<AcquisitionReport> {
        info!("Searching registry for {} filers", filing_type);

        let mut request = HttpGetRequest::new(
            self.browse_url(),
            Duration::from_secs(self.config.feed_timeout_seconds),
        )
        .param("action", "getcompany")
        .param("type", filing_type.code())
        .param("count", limit.to_string())
        .param("output", "atom");
        if let Some(region) = region_filter {
            request = request.param("State", region.trim().to_uppercase());
        }

        let response = self.http.get(&request).await?;
        if !response.is_success() {
            return Err(IntelError::Api {
                message: format!("registry feed returned HTTP {}", response.status),
            });
        }

        let candidates: Vec<FeedCandidate> =
            parse_feed(&response.body).into_iter().take(limit).collect();
        info!("Found {} potential {} filers", candidates.len(), filing_type);

        let mut report = AcquisitionReport::new(filing_type);
        let delay_every = self.config.delay_every.max(1);
        let total = candidates.len();

        for (i, candidate) in candidates.into_iter().enumerate() {
            if i % delay_every == 0 {
                info!("Processing {}/{}", i + 1, total);
                tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;
            }

            let outcome = self.lookup(candidate, filing_type, Utc::now()).await;
            if let ItemOutcome::Skipped(item) = &outcome {
                warn!(
                    identifier = item.identifier.as_deref().unwrap_or(""),
                    "Skipping {}: {}",
                    item.name.as_deref().unwrap_or("<unnamed>"),
                    item.reason
                );
            }
            report.record(outcome);
        }

        info!(
            acquired = report.records.len(),
            skipped = report.skipped.len(),
            "Finished {} acquisition",
            filing_type
        );
        Ok(report)
    }

    async fn lookup(
        &self,
        candidate: FeedCandidate,
        filing_type: FilingType,
        retrieved_at: DateTime<Utc>,
    ) -> ItemOutcome {
        let skip = |reason: SkipReason| {
            ItemOutcome::Skipped(SkippedItem {
                identifier: candidate.identifier.clone(),
                name: candidate.name.clone(),
                reason,
            })
        };

        let Some(identifier) = candidate.identifier.as_deref() else {
            return skip(SkipReason::MissingIdentifier);
        };
        let Some(name) = candidate.name.as_deref() else {
            return skip(SkipReason::MissingName);
        };

        let request = HttpGetRequest::new(
            self.browse_url(),
            Duration::from_secs(self.config.detail_timeout_seconds),
        )
        .param("action", "getcompany")
        .param("CIK", identifier)
        .param("type", filing_type.code())
        .param("dateb", "")
        .param("owner", "exclude")
        .param("count", "1");

        let response = match self.http.get(&request).await {
            Ok(r) => r,
            Err(e) => return skip(SkipReason::RequestFailed(e.to_string())),
        };
        if response.status != 200 {
            return skip(SkipReason::UnexpectedStatus(response.status));
        }

        let mut record = InvestorRecord::new(name.trim(), retrieved_at);
        record.identifier = Some(identifier.to_string());
        record.filing_type = Some(filing_type.code().to_string());
        record.address = parse_mailer_address(&response.body);
        record.source_url = Some(self.source_url(identifier, filing_type));
        ItemOutcome::Acquired(record)
    }
}
