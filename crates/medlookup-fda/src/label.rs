//! openFDA drug label payloads and their mapping to records

use crate::extract::extract_or;
use medlookup_domain::{medication_id, MedicationRecord};
use serde::Deserialize;
use std::collections::HashSet;

/// Fallback shown when a label has no indications section
pub const FALLBACK_PRIMARY_USE: &str = "Consult healthcare provider for usage information";
/// Fallback shown when a label has no dosage section
pub const FALLBACK_HOW_TO_TAKE: &str = "Follow your doctor's instructions";
/// Fallback shown when a label has no warnings section
pub const FALLBACK_WARNINGS: &str = "Consult your healthcare provider for warnings";
/// Fallback shown when a label has no adverse reactions section
pub const FALLBACK_SIDE_EFFECTS: &str =
    "Consult your healthcare provider for side effect information";

/// Brand names kept per record
pub const MAX_BRAND_NAMES: usize = 3;

/// Top-level response body of `drug/label.json`
#[derive(Debug, Default, Deserialize)]
pub struct LabelResponse {
    /// Matching labels; absent when nothing matched
    #[serde(default)]
    pub results: Vec<DrugLabel>,
}

/// Harmonized product identifiers
#[derive(Debug, Default, Deserialize)]
pub struct OpenFda {
    /// Generic names
    pub generic_name: Option<Vec<String>>,
    /// Brand names
    pub brand_name: Option<Vec<String>>,
}

/// The label sections this service reads
#[derive(Debug, Default, Deserialize)]
pub struct DrugLabel {
    /// Product identifiers
    #[serde(default)]
    pub openfda: OpenFda,
    /// Indications and usage
    pub indications_and_usage: Option<Vec<String>>,
    /// Dosage and administration
    pub dosage_and_administration: Option<Vec<String>>,
    /// Warnings
    pub warnings: Option<Vec<String>>,
    /// Adverse reactions
    pub adverse_reactions: Option<Vec<String>>,
}

impl DrugLabel {
    fn first_generic_name(&self) -> Option<&str> {
        first_non_empty(self.openfda.generic_name.as_deref())
    }

    fn first_brand_name(&self) -> Option<&str> {
        first_non_empty(self.openfda.brand_name.as_deref())
    }

    fn brand_names(&self) -> String {
        self.openfda
            .brand_name
            .as_deref()
            .unwrap_or_default()
            .iter()
            .take(MAX_BRAND_NAMES)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Map the label of an exact-name lookup
    ///
    /// The id derives from the requested name so it lines up with the
    /// caller's key; the label's own generic name is preferred for display.
    pub fn to_lookup_record(&self, requested_name: &str) -> MedicationRecord {
        let generic_name = self.first_generic_name().unwrap_or(requested_name);
        self.build(medication_id(requested_name), generic_name.to_string())
    }

    /// Map a label returned by a prefix search
    ///
    /// Labels with neither a generic nor a brand name are unusable and map to `None`.
    pub fn to_search_record(&self) -> Option<MedicationRecord> {
        let generic_name = self
            .first_generic_name()
            .or_else(|| self.first_brand_name())?
            .to_string();
        Some(self.build(medication_id(&generic_name), generic_name))
    }

    fn build(&self, id: String, generic_name: String) -> MedicationRecord {
        MedicationRecord {
            id,
            generic_name,
            brand_names: self.brand_names(),
            primary_use: extract_or(self.indications_and_usage.as_deref(), FALLBACK_PRIMARY_USE),
            how_to_take: extract_or(
                self.dosage_and_administration.as_deref(),
                FALLBACK_HOW_TO_TAKE,
            ),
            warnings: extract_or(self.warnings.as_deref(), FALLBACK_WARNINGS),
            side_effects: extract_or(self.adverse_reactions.as_deref(), FALLBACK_SIDE_EFFECTS),
            source: None,
        }
    }
}

fn first_non_empty(values: Option<&[String]>) -> Option<&str> {
    values
        .and_then(|v| v.first())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

/// Drop records whose id was already seen, keeping first occurrences in order
pub fn dedup_by_id(records: Vec<MedicationRecord>) -> Vec<MedicationRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect()
}
