//! Medlookup Domain Layer
//!
//! This crate contains the core domain model for Medlookup. It defines the
//! medication record shared by every other layer, the merge rule that
//! reconciles curated and external data, and the trait interface behind
//! which the external drug-label service lives.
//!
//! ## Key Concepts
//!
//! - **Curated record**: a manually reviewed entry, authoritative on every field
//! - **External record**: an entry built live from a third-party drug-label API
//! - **Merge precedence**: curated values win; external data only fills empty brand names
//!
//! ## Architecture
//!
//! - Pure business logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod medication;
pub mod merge;
pub mod traits;

// Re-exports for convenience
pub use medication::{medication_id, MedicationRecord, Source};
pub use merge::merge_records;
pub use traits::LabelSource;
