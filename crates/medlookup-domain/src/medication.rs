//! Medication module - the record every layer exchanges

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a record's field values came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Clinically reviewed dataset
    Curated,
    /// Live third-party drug-label API
    External,
}

impl Source {
    /// Get the tag as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Curated => "curated",
            Source::External => "external",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the identifier for an externally sourced record
///
/// Lowercases the name and replaces each run of whitespace with a single hyphen.
///
/// # Examples
///
/// ```
/// use medlookup_domain::medication_id;
///
/// assert_eq!(medication_id("Acetylsalicylic  Acid"), "acetylsalicylic-acid");
/// ```
pub fn medication_id(generic_name: &str) -> String {
    let mut id = String::with_capacity(generic_name.len());
    let mut in_whitespace = false;
    for c in generic_name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                id.push('-');
            }
            in_whitespace = true;
        } else {
            id.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }
    id
}

/// Patient-facing facts about one medication
///
/// Serialized with camelCase keys; `source` is omitted while unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRecord {
    /// Stable identifier
    ///
    /// Taken verbatim from the curated dataset, or derived from the generic
    /// name via [`medication_id`] for external records.
    pub id: String,

    /// Generic (non-proprietary) name
    pub generic_name: String,

    /// Up to three brand names, comma-joined
    pub brand_names: String,

    /// What the medication treats
    pub primary_use: String,

    /// Dosage and administration guidance
    pub how_to_take: String,

    /// Warnings
    pub warnings: String,

    /// Adverse reactions
    pub side_effects: String,

    /// Provenance tag; absent for pre-merge records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

impl MedicationRecord {
    /// Return the record tagged with the given source
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    /// Case-insensitive substring match on generic or brand names
    ///
    /// `lower_query` must already be lowercase.
    pub fn matches_lowercase(&self, lower_query: &str) -> bool {
        self.generic_name.to_lowercase().contains(lower_query)
            || self.brand_names.to_lowercase().contains(lower_query)
    }
}
