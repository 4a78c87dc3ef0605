//! Medlookup Storage Layer
//!
//! In-memory curated medication store and the CSV loader that feeds it.
//!
//! # Architecture
//!
//! - The curated dataset is read once from CSV at startup
//! - The enriched set is installed with a single atomic replace
//! - Steady-state traffic only reads; readers share an immutable snapshot
//!
//! # Examples
//!
//! ```
//! use medlookup_store::CuratedStore;
//!
//! let store = CuratedStore::new();
//! assert!(store.is_empty());
//! assert!(store.get_by_id("ibuprofen-200mg").is_none());
//! ```

#![warn(missing_docs)]

pub mod csv_source;

use medlookup_domain::MedicationRecord;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

pub use csv_source::{load_curated_csv, read_curated_csv};

/// Errors that can occur while loading curated data
#[derive(Error, Debug)]
pub enum StoreError {
    /// Curated file could not be opened or read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Curated file is not valid CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Immutable view of the store contents
#[derive(Debug, Default)]
struct Snapshot {
    records: Vec<MedicationRecord>,
    index: HashMap<String, usize>,
}

impl Snapshot {
    fn build(records: Vec<MedicationRecord>) -> Self {
        let mut snapshot = Snapshot::default();
        for record in records {
            // A repeated id keeps its first position and takes the later value
            match snapshot.index.get(&record.id) {
                Some(&pos) => snapshot.records[pos] = record,
                None => {
                    snapshot
                        .index
                        .insert(record.id.clone(), snapshot.records.len());
                    snapshot.records.push(record);
                }
            }
        }
        snapshot
    }
}

/// Keyed collection of curated (enriched) medication records
///
/// Constructed explicitly by the composition root; each test can build its own.
#[derive(Debug, Default)]
pub struct CuratedStore {
    current: RwLock<Arc<Snapshot>>,
}

impl CuratedStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `records`
    pub fn with_medications(records: Vec<MedicationRecord>) -> Self {
        let store = Self::new();
        store.set_medications(records);
        store
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Atomically replace the entire collection
    pub fn set_medications(&self, records: Vec<MedicationRecord>) {
        let snapshot = Arc::new(Snapshot::build(records));
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    /// All records in insertion order
    pub fn get_all(&self) -> Vec<MedicationRecord> {
        self.snapshot().records.clone()
    }

    /// Record with the given id
    pub fn get_by_id(&self, id: &str) -> Option<MedicationRecord> {
        let snapshot = self.snapshot();
        snapshot
            .index
            .get(id)
            .map(|&pos| snapshot.records[pos].clone())
    }

    /// Case-insensitive substring match on generic or brand names
    ///
    /// No ranking; results keep insertion order.
    pub fn search_substring(&self, query: &str) -> Vec<MedicationRecord> {
        let lower_query = query.to_lowercase();
        self.snapshot()
            .records
            .iter()
            .filter(|record| record.matches_lowercase(&lower_query))
            .cloned()
            .collect()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.snapshot().records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
