//! Request-time search over curated and external records
//!
//! Result order is fixed: curated substring matches, then curated records
//! reached only through an exact external name match, then external-only
//! results. Within each group the source order is kept.

use crate::config::CatalogConfig;
use medlookup_domain::{merge_records, LabelSource, MedicationRecord, Source};
use medlookup_store::CuratedStore;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Combines curated substring matches with live external search results
pub struct SearchOrchestrator {
    store: Arc<CuratedStore>,
    source: Arc<dyn LabelSource>,
    config: CatalogConfig,
}

impl SearchOrchestrator {
    /// Create a new orchestrator over `store` and `source`
    pub fn new(
        store: Arc<CuratedStore>,
        source: Arc<dyn LabelSource>,
        config: CatalogConfig,
    ) -> Self {
        Self {
            store,
            source,
            config,
        }
    }

    /// Search curated and external records for `query`
    ///
    /// Queries shorter than the configured minimum return an empty list
    /// without contacting the external source.
    pub async fn search(&self, query: &str) -> Vec<MedicationRecord> {
        let query = query.trim();
        if query.chars().count() < self.config.min_query_len {
            return Vec::new();
        }

        let mut results: Vec<MedicationRecord> = self
            .store
            .search_substring(query)
            .into_iter()
            .map(|record| record.with_source(Source::Curated))
            .collect();
        let substring_matches = results.len();
        let mut included: HashSet<String> =
            results.iter().map(|record| record.id.clone()).collect();

        let external = self.source.fetch_many(query, self.config.search_limit).await;
        let external_count = external.len();

        // Curated records keyed by lowercased generic name and by id
        let mut by_name: HashMap<String, MedicationRecord> = HashMap::new();
        for record in self.store.get_all() {
            by_name
                .entry(record.generic_name.to_lowercase())
                .or_insert_with(|| record.clone());
            by_name.entry(record.id.clone()).or_insert(record);
        }

        let mut name_matches = Vec::new();
        let mut external_only = Vec::new();
        for record in external {
            match by_name.get(&record.generic_name.to_lowercase()) {
                Some(curated) => {
                    // Already represented, or merged in once with curated data winning
                    if included.insert(curated.id.clone()) {
                        if let Some(merged) = merge_records(Some(record), Some(curated.clone())) {
                            name_matches.push(merged);
                        }
                    }
                }
                None => external_only.push(record.with_source(Source::External)),
            }
        }

        results.extend(name_matches);
        results.extend(
            external_only
                .into_iter()
                .filter(|record| included.insert(record.id.clone())),
        );

        debug!(
            "Search '{}': {} curated matches, {} external results, {} returned",
            query,
            substring_matches,
            external_count,
            results.len()
        );

        results
    }
}
