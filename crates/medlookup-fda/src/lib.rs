//! Medlookup openFDA Layer
//!
//! External drug-label lookups per the `LabelSource` trait from `medlookup-domain`.
//!
//! # Architecture
//!
//! This crate turns openFDA label JSON into [`MedicationRecord`]s. Raw label
//! sections pass through the field extractor (markup stripped, trimmed,
//! truncated) and empty sections get patient-facing fallback text.
//!
//! # Sources
//!
//! - `FdaClient`: HTTP client for the public openFDA API
//! - `MockLabelSource`: Deterministic in-memory source for testing
//!
//! # Examples
//!
//! ```
//! use medlookup_fda::MockLabelSource;
//! use medlookup_domain::LabelSource;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let source = MockLabelSource::new();
//! assert_eq!(source.fetch_one("Ibuprofen").await, None);
//! assert_eq!(source.fetch_one_calls(), 1);
//! # }
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod extract;
pub mod label;
pub mod query;

use async_trait::async_trait;
use medlookup_domain::{LabelSource, MedicationRecord};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use client::FdaClient;
pub use extract::{extract_or, extract_text, MAX_FIELD_CHARS};
pub use label::dedup_by_id;

/// Searches shorter than this many characters never reach the network
pub const MIN_SEARCH_CHARS: usize = 2;

/// Errors that can occur while talking to openFDA
#[derive(Error, Debug)]
pub enum FdaError {
    /// Network or transport error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Non-success HTTP status other than "no matches"
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// Body was not the expected label JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client could not be constructed
    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Default)]
struct MockState {
    records: HashMap<String, MedicationRecord>,
    misses: HashMap<String, usize>,
    search_results: HashMap<String, Vec<MedicationRecord>>,
    fetch_one_calls: usize,
    fetch_many_calls: usize,
}

/// Mock label source for deterministic testing
///
/// Returns pre-configured records without making any network calls. Names
/// and queries are matched case-insensitively. Unknown names miss. Like
/// [`FdaClient`], searches under [`MIN_SEARCH_CHARS`] return nothing.
///
/// # Examples
///
/// ```
/// use medlookup_fda::MockLabelSource;
///
/// let source = MockLabelSource::new();
/// source.miss_times("Ibuprofen", 1);
/// assert_eq!(source.fetch_one_calls(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockLabelSource {
    state: Arc<Mutex<MockState>>,
}

impl MockLabelSource {
    /// Create an empty source where every lookup misses
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `record` for single lookups of `generic_name`
    pub fn add_record(&self, generic_name: &str, record: MedicationRecord) {
        self.state
            .lock()
            .unwrap()
            .records
            .insert(generic_name.to_lowercase(), record);
    }

    /// Make the next `times` single lookups of `generic_name` miss
    pub fn miss_times(&self, generic_name: &str, times: usize) {
        self.state
            .lock()
            .unwrap()
            .misses
            .insert(generic_name.to_lowercase(), times);
    }

    /// Serve `records` for searches of `query`
    pub fn add_search_results(&self, query: &str, records: Vec<MedicationRecord>) {
        self.state
            .lock()
            .unwrap()
            .search_results
            .insert(query.to_lowercase(), records);
    }

    /// Number of single lookups performed
    pub fn fetch_one_calls(&self) -> usize {
        self.state.lock().unwrap().fetch_one_calls
    }

    /// Number of searches performed
    pub fn fetch_many_calls(&self) -> usize {
        self.state.lock().unwrap().fetch_many_calls
    }

    /// Reset both call counters
    pub fn reset_call_counts(&self) {
        let mut state = self.state.lock().unwrap();
        state.fetch_one_calls = 0;
        state.fetch_many_calls = 0;
    }
}

#[async_trait]
impl LabelSource for MockLabelSource {
    async fn fetch_one(&self, generic_name: &str) -> Option<MedicationRecord> {
        let mut state = self.state.lock().unwrap();
        state.fetch_one_calls += 1;

        let key = generic_name.to_lowercase();
        if let Some(remaining) = state.misses.get_mut(&key) {
            if *remaining > 0 {
                *remaining -= 1;
                return None;
            }
        }
        state.records.get(&key).cloned()
    }

    async fn fetch_many(&self, query: &str, limit: usize) -> Vec<MedicationRecord> {
        let mut state = self.state.lock().unwrap();
        state.fetch_many_calls += 1;

        if query.trim().chars().count() < MIN_SEARCH_CHARS {
            return Vec::new();
        }

        let records = state
            .search_results
            .get(&query.to_lowercase())
            .cloned()
            .unwrap_or_default();
        let mut deduped = dedup_by_id(records);
        deduped.truncate(limit);
        deduped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medlookup_domain::medication_id;

    fn record(name: &str) -> MedicationRecord {
        MedicationRecord {
            id: medication_id(name),
            generic_name: name.to_string(),
            brand_names: String::new(),
            primary_use: "use".to_string(),
            how_to_take: "take".to_string(),
            warnings: "warn".to_string(),
            side_effects: "effects".to_string(),
            source: None,
        }
    }

    #[tokio::test]
    async fn test_mock_lookup_is_case_insensitive() {
        let source = MockLabelSource::new();
        source.add_record("Aspirin", record("Aspirin"));

        assert_eq!(source.fetch_one("ASPIRIN").await, Some(record("Aspirin")));
        assert_eq!(source.fetch_one("Ibuprofen").await, None);
        assert_eq!(source.fetch_one_calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_scripted_misses() {
        let source = MockLabelSource::new();
        source.add_record("Aspirin", record("Aspirin"));
        source.miss_times("Aspirin", 1);

        assert_eq!(source.fetch_one("Aspirin").await, None);
        assert!(source.fetch_one("Aspirin").await.is_some());
        assert_eq!(source.fetch_one_calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_search_dedups_and_limits() {
        let source = MockLabelSource::new();
        source.add_search_results(
            "asp",
            vec![record("Aspirin"), record("Aspirin"), record("Aspartame"), record("Asparaginase")],
        );

        let results = source.fetch_many("ASP", 2).await;
        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["aspirin", "aspartame"]);
        assert_eq!(source.fetch_many_calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_search_rejects_short_queries() {
        let source = MockLabelSource::new();
        source.add_search_results("a", vec![record("Aspirin")]);
        source.add_search_results(" ", vec![record("Aspirin")]);

        assert!(source.fetch_many("a", 20).await.is_empty());
        assert!(source.fetch_many(" ", 20).await.is_empty());
        assert_eq!(source.fetch_many_calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_clone_shares_state() {
        let source1 = MockLabelSource::new();
        let source2 = source1.clone();

        source1.fetch_one("x").await;
        assert_eq!(source2.fetch_one_calls(), 1);

        source2.reset_call_counts();
        assert_eq!(source1.fetch_one_calls(), 0);
    }
}
