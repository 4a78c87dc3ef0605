//! Integration tests for medlookup-store
//!
//! These tests load curated CSV files from disk into a fresh store.

use medlookup_store::{load_curated_csv, CuratedStore, StoreError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_file_into_store() {
    let file = write_csv(
        "id,genericName,brandNames,primaryUse,howToTake,warnings,sideEffects\n\
         metformin-500mg,Metformin,Glucophage,Type 2 diabetes,With meals,Lactic acidosis,Nausea\n\
         atorvastatin,Atorvastatin,Lipitor,High cholesterol,Once daily,Muscle pain,Headache\n",
    );

    let records = load_curated_csv(file.path()).unwrap();
    let store = CuratedStore::new();
    store.set_medications(records);

    assert_eq!(store.len(), 2);
    assert_eq!(
        store.get_by_id("metformin-500mg").unwrap().brand_names,
        "Glucophage"
    );

    let matches = store.search_substring("glucophage");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].generic_name, "Metformin");
}

#[test]
fn test_missing_file_is_io_error() {
    let result = load_curated_csv("/nonexistent/medications.csv");
    assert!(matches!(result, Err(StoreError::Io(_))));
}

#[test]
fn test_invalid_utf8_is_csv_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"id,genericName\n\xff\xfe,bad\n").unwrap();
    file.flush().unwrap();

    let result = load_curated_csv(file.path());
    assert!(matches!(result, Err(StoreError::Csv(_))));
}

#[test]
fn test_separate_stores_are_isolated() {
    let first = CuratedStore::new();
    let second = CuratedStore::new();

    let file = write_csv("id,genericName\naspirin,Aspirin\n");
    first.set_medications(load_curated_csv(file.path()).unwrap());

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}
