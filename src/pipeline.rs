use crate::apis::edgar::EdgarAcquirer;
use crate::apis::AcquisitionReport;
use crate::classify::classify_all;
use crate::error::Result;
use crate::export::write_tabular_file;
use crate::normalize::enrich;
use crate::types::{FilingType, InvestorRecord};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{error, info, instrument};

/// Filing kinds acquired by a full run, in phase order
pub const PHASES: [FilingType; 2] = [
    FilingType::AdviserRegistration,
    FilingType::InstitutionalHoldings,
];

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub region_filter: Option<String>,
    pub limit: usize,
    pub output_path: PathBuf,
}

/// A phase that produced nothing because its feed request failed
#[derive(Debug, Clone)]
pub struct PhaseError {
    pub filing_type: FilingType,
    pub message: String,
}

/// Result of a complete acquisition run
#[derive(Debug)]
pub struct PipelineResult {
    pub reports: Vec<AcquisitionReport>,
    pub phase_errors: Vec<PhaseError>,
    pub records: Vec<InvestorRecord>,
    pub output_file: PathBuf,
}

impl PipelineResult {
    pub fn skipped(&self) -> usize {
        self.reports.iter().map(|r| r.skipped.len()).sum()
    }

    pub fn counts_by_category(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            let label = record
                .category
                .map(|c| c.label().to_string())
                .unwrap_or_default();
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }
}

pub struct Pipeline {
    acquirer: EdgarAcquirer,
}

impl Pipeline {
    pub fn new(acquirer: EdgarAcquirer) -> Self {
        Self { acquirer }
    }

    /// Acquires every phase, labels and normalizes the records, and writes
    /// them to the CSV at `options.output_path`.
    ///
    /// A phase whose feed fails is logged and skipped; the run continues
    /// with the remaining phases. Only a failed CSV write is an error.
    #[instrument(skip(self, options), fields(limit = options.limit))]
    pub async fn run(&self, options: &PipelineOptions) -> Result<PipelineResult> {
        let mut reports = Vec::new();
        let mut phase_errors = Vec::new();
        let mut records = Vec::new();

        for filing_type in PHASES {
            match self
                .acquirer
                .acquire_by_filing_type(filing_type, options.region_filter.as_deref(), options.limit)
                .await
            {
                Ok(report) => {
                    records.extend(report.records.iter().cloned());
                    reports.push(report);
                }
                Err(e) => {
                    error!("Error searching {} filers: {}", filing_type, e);
                    phase_errors.push(PhaseError {
                        filing_type,
                        message: e.to_string(),
                    });
                }
            }
        }

        info!("Classifying {} investors", records.len());
        classify_all(&mut records);
        records.iter_mut().for_each(enrich);

        write_tabular_file(&records, &options.output_path)?;

        Ok(PipelineResult {
            reports,
            phase_errors,
            records,
            output_file: options.output_path.clone(),
        })
    }
}
