//! openFDA Client Implementation
//!
//! Talks to the openFDA `drug/label.json` endpoint.
//!
//! # Features
//!
//! - Exact-name single lookup and prefix search
//! - Optional API key for higher rate limits
//! - Request timeout
//! - Fails closed behind [`LabelSource`]: errors are logged, never returned
//!
//! # Examples
//!
//! ```no_run
//! use medlookup_fda::FdaClient;
//!
//! let client = FdaClient::default_endpoint(None).unwrap();
//! ```

use crate::label::{dedup_by_id, LabelResponse};
use crate::query::{lookup_query, search_query};
use crate::{FdaError, MIN_SEARCH_CHARS};
use async_trait::async_trait;
use medlookup_domain::{LabelSource, MedicationRecord};
use std::time::Duration;
use tracing::{debug, warn};

/// Default openFDA drug label endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.fda.gov/drug/label.json";

/// Default timeout for openFDA requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the openFDA drug label API
#[derive(Debug, Clone)]
pub struct FdaClient {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl FdaClient {
    /// Create a new client
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Full label endpoint URL
    /// - `api_key`: Optional openFDA key; empty keys are ignored
    /// - `timeout`: Per-request timeout
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, FdaError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FdaError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            api_key: api_key.filter(|key| !key.is_empty()),
            client,
        })
    }

    /// Create a client for the public openFDA endpoint with the default timeout
    pub fn default_endpoint(api_key: Option<String>) -> Result<Self, FdaError> {
        Self::new(
            DEFAULT_ENDPOINT,
            api_key,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// The endpoint this client queries
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Look up one label by exact generic name
    ///
    /// Returns `Ok(None)` when openFDA has no match.
    pub async fn lookup(&self, generic_name: &str) -> Result<Option<MedicationRecord>, FdaError> {
        let response = self.query_labels(&lookup_query(generic_name), 1).await?;
        Ok(response
            .results
            .first()
            .map(|label| label.to_lookup_record(generic_name)))
    }

    /// Prefix search over generic and brand names
    ///
    /// Results are deduplicated by id, first occurrence kept.
    pub async fn search(&self, term: &str, limit: usize) -> Result<Vec<MedicationRecord>, FdaError> {
        let response = self.query_labels(&search_query(term), limit).await?;
        let records = response
            .results
            .iter()
            .filter_map(|label| label.to_search_record())
            .collect();
        Ok(dedup_by_id(records))
    }

    async fn query_labels(&self, search: &str, limit: usize) -> Result<LabelResponse, FdaError> {
        let limit = limit.to_string();
        let mut params = vec![("search", search), ("limit", limit.as_str())];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.as_str()));
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| FdaError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        // openFDA answers 404 when a search has no matches
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(LabelResponse::default());
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FdaError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<LabelResponse>()
            .await
            .map_err(|e| FdaError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl LabelSource for FdaClient {
    async fn fetch_one(&self, generic_name: &str) -> Option<MedicationRecord> {
        match self.lookup(generic_name).await {
            Ok(Some(record)) => Some(record),
            Ok(None) => {
                debug!("No FDA data found for {}", generic_name);
                None
            }
            Err(e) => {
                warn!("FDA lookup failed for {}: {}", generic_name, e);
                None
            }
        }
    }

    async fn fetch_many(&self, query: &str, limit: usize) -> Vec<MedicationRecord> {
        if query.trim().chars().count() < MIN_SEARCH_CHARS {
            return Vec::new();
        }

        match self.search(query, limit).await {
            Ok(records) => {
                debug!("FDA search '{}' returned {} records", query, records.len());
                records
            }
            Err(e) => {
                warn!("FDA search failed for '{}': {}", query, e);
                Vec::new()
            }
        }
    }
}
