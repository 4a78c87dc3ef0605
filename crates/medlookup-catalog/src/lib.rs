//! Medlookup Catalog
//!
//! Reconciles the curated medication dataset with the external drug-label
//! source, at startup and per search request.
//!
//! # Overview
//!
//! ```text
//! startup:  CSV → HybridLoader ⇄ LabelSource → CuratedStore
//! request:  query → SearchOrchestrator → CuratedStore + LabelSource → results
//! ```
//!
//! # Key Features
//!
//! - **Hybrid Loading**: one lookup per curated record, one retry on a miss, paced
//! - **Merge Precedence**: curated values always win; external data fills brand names
//! - **Search**: curated matches first, external-only results after, no duplicates
//!
//! # Example Usage
//!
//! ```no_run
//! use medlookup_catalog::{CatalogConfig, HybridLoader, SearchOrchestrator};
//! use medlookup_fda::FdaClient;
//! use medlookup_store::CuratedStore;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = Arc::new(FdaClient::default_endpoint(None)?);
//! let store = Arc::new(CuratedStore::new());
//! let config = CatalogConfig::default();
//!
//! let loader = HybridLoader::new(source.clone(), config.clone());
//! let report = loader.load_into(&store, Path::new("data/medications.csv")).await;
//! println!("Loaded {}/{} medications", report.kept(), report.total);
//!
//! let search = SearchOrchestrator::new(store, source, config);
//! let results = search.search("ibu").await;
//! println!("Found {} medications", results.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod loader;
mod search;


pub use config::{CatalogConfig, EnrichmentMissPolicy, MIN_QUERY_LEN_FLOOR};
pub use loader::{load_curated_only, EnrichmentReport, HybridLoader};
pub use search::SearchOrchestrator;
