//! Configuration for enrichment and search

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Smallest accepted `min_query_len`; single characters never search
pub const MIN_QUERY_LEN_FLOOR: usize = 2;

/// What to do with a curated record when both external lookups miss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentMissPolicy {
    /// Remove the record from the enriched set
    #[default]
    Drop,
    /// Keep the curated data as-is, tagged curated
    Retain,
}

/// Configuration for the hybrid loader and search orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Wait before the single retry of a missed lookup (milliseconds)
    pub retry_delay_ms: u64,

    /// Wait between curated records during enrichment (milliseconds)
    pub pacing_delay_ms: u64,

    /// Maximum external results per search
    pub search_limit: usize,

    /// Queries shorter than this (in characters) return nothing; at least 2
    pub min_query_len: usize,

    /// Handling of curated records the external API never returns
    pub on_enrichment_miss: EnrichmentMissPolicy,
}

impl CatalogConfig {
    /// Retry delay as a Duration
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Pacing delay as a Duration
    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.search_limit == 0 {
            return Err("search_limit must be greater than 0".to_string());
        }
        if self.min_query_len < MIN_QUERY_LEN_FLOOR {
            return Err(format!(
                "min_query_len must be at least {}",
                MIN_QUERY_LEN_FLOOR
            ));
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    /// openFDA-friendly pacing
    fn default() -> Self {
        Self {
            retry_delay_ms: 500,
            pacing_delay_ms: 150,
            search_limit: 20,
            min_query_len: 2,
            on_enrichment_miss: EnrichmentMissPolicy::Drop,
        }
    }
}

impl CatalogConfig {
    /// No delays; for tests and local sources without rate limits
    pub fn immediate() -> Self {
        Self {
            retry_delay_ms: 0,
            pacing_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CatalogConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.retry_delay(), Duration::from_millis(500));
        assert_eq!(config.pacing_delay(), Duration::from_millis(150));
        assert_eq!(config.on_enrichment_miss, EnrichmentMissPolicy::Drop);
    }

    #[test]
    fn test_immediate_config_is_valid() {
        let config = CatalogConfig::immediate();
        assert!(config.validate().is_ok());
        assert_eq!(config.pacing_delay(), Duration::ZERO);
        assert_eq!(config.search_limit, 20);
    }

    #[test]
    fn test_invalid_search_limit() {
        let mut config = CatalogConfig::default();
        config.search_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_single_character_min_query_len_rejected() {
        for min_query_len in [0, 1] {
            let config = CatalogConfig {
                min_query_len,
                ..CatalogConfig::default()
            };
            assert!(config.validate().is_err());
        }

        let config = CatalogConfig {
            min_query_len: 3,
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = CatalogConfig::from_toml(
            r#"
            pacing_delay_ms = 0
            on_enrichment_miss = "retain"
            "#,
        )
        .unwrap();
        assert_eq!(config.pacing_delay_ms, 0);
        assert_eq!(config.retry_delay_ms, 500);
        assert_eq!(config.on_enrichment_miss, EnrichmentMissPolicy::Retain);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        assert!(CatalogConfig::from_toml(r#"on_enrichment_miss = "maybe""#).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CatalogConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = CatalogConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.search_limit, parsed.search_limit);
        assert_eq!(config.retry_delay_ms, parsed.retry_delay_ms);
        assert_eq!(config.on_enrichment_miss, parsed.on_enrichment_miss);
    }
}
