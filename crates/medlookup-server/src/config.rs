//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files including bind address, curated dataset
//! location, openFDA access, and catalog pacing. Every field has a default.

use medlookup_catalog::CatalogConfig;
use medlookup_fda::client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A field holds an unusable value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 5000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Curated medications CSV
    #[serde(default = "default_curated_csv")]
    pub curated_csv: PathBuf,

    /// openFDA access
    #[serde(default)]
    pub fda: FdaConfig,

    /// Enrichment and search tuning
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// openFDA client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FdaConfig {
    /// Drug label endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key; `OPENFDA_API_KEY` takes precedence
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FdaConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FdaConfig {
    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    5000
}

fn default_curated_csv() -> PathBuf {
    PathBuf::from("data/medications.csv")
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            curated_csv: default_curated_csv(),
            fda: FdaConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fda.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("fda.endpoint must not be empty".to_string()));
        }
        if self.fda.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "fda.timeout_secs must be greater than 0".to_string(),
            ));
        }
        self.catalog
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("catalog: {}", e)))
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        if self.bind_address.contains(':') {
            format!("[{}]:{}", self.bind_address, self.bind_port)
        } else {
            format!("{}:{}", self.bind_address, self.bind_port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medlookup_catalog::EnrichmentMissPolicy;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.bind_port, 5000);
        assert_eq!(config.curated_csv, PathBuf::from("data/medications.csv"));
        assert_eq!(config.fda.endpoint, DEFAULT_ENDPOINT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
    }

    #[test]
    fn test_bind_addr_ipv6() {
        let config = ServerConfig {
            bind_address: "::1".to_string(),
            ..ServerConfig::default()
        };
        assert_eq!(config.bind_addr(), "[::1]:5000");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ServerConfig::from_toml("").unwrap();
        assert_eq!(config.bind_port, 5000);
        assert_eq!(config.catalog.search_limit, 20);
        assert_eq!(config.fda.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            bind_address = "0.0.0.0"
            bind_port = 9000
            curated_csv = "/srv/medlookup/medications.csv"

            [fda]
            endpoint = "http://localhost:8089/drug/label.json"
            api_key = "abc123"
            timeout_secs = 10

            [catalog]
            pacing_delay_ms = 250
            search_limit = 10
            on_enrichment_miss = "retain"
        "#;

        let config = ServerConfig::from_toml(toml).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(
            config.curated_csv,
            PathBuf::from("/srv/medlookup/medications.csv")
        );
        assert_eq!(config.fda.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.fda.timeout_secs, 10);
        assert_eq!(config.catalog.pacing_delay_ms, 250);
        assert_eq!(config.catalog.retry_delay_ms, 500);
        assert_eq!(config.catalog.search_limit, 10);
        assert_eq!(config.catalog.on_enrichment_miss, EnrichmentMissPolicy::Retain);
    }

    #[test]
    fn test_shipped_config_parses() {
        let config = ServerConfig::from_toml(include_str!("../../../config/medlookup.toml")).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert!(config.fda.api_key.is_none());
        assert_eq!(config.catalog.on_enrichment_miss, EnrichmentMissPolicy::Drop);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = ServerConfig::from_toml("[fda]\ntimeout_secs = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_search_limit_rejected() {
        let result = ServerConfig::from_toml("[catalog]\nsearch_limit = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_single_character_queries_cannot_be_enabled() {
        let result = ServerConfig::from_toml("[catalog]\nmin_query_len = 1\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let result = ServerConfig::from_toml("bind_port = \"not a number\"");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }
}
