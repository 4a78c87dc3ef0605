//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::MedicationRecord;
use async_trait::async_trait;

/// Trait for fetching records from an external drug-label service
///
/// Implemented by the infrastructure layer (medlookup-fda).
///
/// Both operations fail closed: transport or decode failures are reported
/// as "no data" and never surface to the caller. Returned records carry no
/// source tag.
#[async_trait]
pub trait LabelSource: Send + Sync {
    /// Look up a single record by exact generic name
    async fn fetch_one(&self, generic_name: &str) -> Option<MedicationRecord>;

    /// Prefix search over generic and brand names, capped at `limit`
    ///
    /// Results never contain two records with the same id.
    async fn fetch_many(&self, query: &str, limit: usize) -> Vec<MedicationRecord>;
}
