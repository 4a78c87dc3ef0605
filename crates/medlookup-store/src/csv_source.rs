//! Curated CSV loading
//!
//! Columns are positional: `id, genericName, brandNames, primaryUse,
//! howToTake, warnings, sideEffects`. The first row is a header.

use crate::StoreError;
use csv::{ReaderBuilder, StringRecord, Trim};
use medlookup_domain::MedicationRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Load curated records from a CSV file, in file order
pub fn load_curated_csv<P: AsRef<Path>>(path: P) -> Result<Vec<MedicationRecord>, StoreError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let records = read_curated_csv(file)?;
    info!(
        "Loaded {} curated medications from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Read curated records from any CSV source
///
/// Missing trailing columns become empty strings. Rows without an id are skipped.
pub fn read_curated_csv<R: Read>(reader: R) -> Result<Vec<MedicationRecord>, StoreError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row?;
        match to_record(&row) {
            Some(record) => records.push(record),
            // Header is line 1
            None => warn!("Skipping curated row {} with empty id", line + 2),
        }
    }
    Ok(records)
}

fn to_record(row: &StringRecord) -> Option<MedicationRecord> {
    let field = |i: usize| row.get(i).unwrap_or_default().to_string();

    let id = field(0);
    if id.is_empty() {
        return None;
    }

    Some(MedicationRecord {
        id,
        generic_name: field(1),
        brand_names: field(2),
        primary_use: field(3),
        how_to_take: field(4),
        warnings: field(5),
        side_effects: field(6),
        source: None,
    })
}
