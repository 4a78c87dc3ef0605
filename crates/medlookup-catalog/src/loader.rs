//! Startup enrichment of the curated dataset
//!
//! Records are processed strictly one at a time with fixed pauses between
//! them. The pacing keeps startup under the external API's rate limit, so
//! lookups must not be issued concurrently here.

use crate::config::{CatalogConfig, EnrichmentMissPolicy};
use medlookup_domain::{merge_records, LabelSource, MedicationRecord, Source};
use medlookup_store::{load_curated_csv, CuratedStore};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Counts from one enrichment pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentReport {
    /// Curated records considered
    pub total: usize,
    /// Records merged with external data
    pub enriched: usize,
    /// Records kept without external data
    pub curated_only: usize,
    /// Records removed after both lookups missed
    pub dropped: usize,
}

impl EnrichmentReport {
    /// Records that made it into the enriched set
    pub fn kept(&self) -> usize {
        self.enriched + self.curated_only
    }
}

/// Joins each curated record with its external counterpart
pub struct HybridLoader {
    source: Arc<dyn LabelSource>,
    config: CatalogConfig,
}

impl HybridLoader {
    /// Create a new loader
    pub fn new(source: Arc<dyn LabelSource>, config: CatalogConfig) -> Self {
        Self { source, config }
    }

    /// Enrich `curated` in order, returning the kept records
    pub async fn enrich(
        &self,
        curated: Vec<MedicationRecord>,
    ) -> (Vec<MedicationRecord>, EnrichmentReport) {
        let mut report = EnrichmentReport {
            total: curated.len(),
            ..EnrichmentReport::default()
        };
        let mut enriched = Vec::with_capacity(curated.len());

        info!("Enriching {} curated medications from external source", report.total);

        for (position, record) in curated.into_iter().enumerate() {
            if position > 0 {
                pause(self.config.pacing_delay()).await;
            }

            let external = self.lookup_with_retry(&record.generic_name).await;
            match external {
                Some(external) => {
                    if let Some(merged) = merge_records(Some(external), Some(record)) {
                        debug!("Loaded {} from external source (merged with curated)", merged.id);
                        report.enriched += 1;
                        enriched.push(merged);
                    }
                }
                None => match self.config.on_enrichment_miss {
                    EnrichmentMissPolicy::Retain => {
                        debug!("Loaded {} from curated data only", record.id);
                        report.curated_only += 1;
                        enriched.push(record.with_source(Source::Curated));
                    }
                    EnrichmentMissPolicy::Drop => {
                        warn!(
                            "Dropping curated medication {} ({}): no external data after retry",
                            record.id, record.generic_name
                        );
                        report.dropped += 1;
                    }
                },
            }
        }

        info!(
            "Loaded {}/{} medications ({} enriched, {} curated only, {} dropped)",
            report.kept(),
            report.total,
            report.enriched,
            report.curated_only,
            report.dropped
        );

        (enriched, report)
    }

    /// Read the curated CSV, enrich it, and install the result in `store`
    ///
    /// An unreadable source leaves the store empty rather than failing.
    pub async fn load_into(&self, store: &CuratedStore, csv_path: &Path) -> EnrichmentReport {
        let curated = read_or_empty(csv_path);
        let (records, report) = self.enrich(curated).await;
        store.set_medications(records);
        report
    }

    async fn lookup_with_retry(&self, generic_name: &str) -> Option<MedicationRecord> {
        if let Some(record) = self.source.fetch_one(generic_name).await {
            return Some(record);
        }

        debug!("Retrying {}...", generic_name);
        pause(self.config.retry_delay()).await;
        self.source.fetch_one(generic_name).await
    }
}

/// Install the curated CSV as-is, tagged curated, without any external calls
pub fn load_curated_only(store: &CuratedStore, csv_path: &Path) -> EnrichmentReport {
    let records: Vec<_> = read_or_empty(csv_path)
        .into_iter()
        .map(|record| record.with_source(Source::Curated))
        .collect();

    let report = EnrichmentReport {
        total: records.len(),
        curated_only: records.len(),
        ..EnrichmentReport::default()
    };
    info!("Loaded {} curated medications without enrichment", report.total);
    store.set_medications(records);
    report
}

fn read_or_empty(csv_path: &Path) -> Vec<MedicationRecord> {
    load_curated_csv(csv_path).unwrap_or_else(|e| {
        warn!(
            "Error loading curated medications from {}: {}",
            csv_path.display(),
            e
        );
        Vec::new()
    })
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
