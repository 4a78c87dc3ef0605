//! Medlookup Server CLI
//!
//! Starts the HTTP server for medication lookup and search.

use anyhow::Context;
use clap::Parser;
use medlookup_server::{config::ServerConfig, start_server, StartupOptions};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Medlookup - medication lookup backed by curated data and openFDA.
#[derive(Debug, Parser)]
#[command(name = "medlookup-server")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind address (e.g., 0.0.0.0:8080)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Override the curated medications CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// openFDA API key
    #[arg(long, env = "OPENFDA_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Serve curated data without openFDA enrichment at startup
    #[arg(long)]
    skip_enrichment: bool,
}

impl Cli {
    /// Command-line values and `OPENFDA_API_KEY` take precedence over the config file
    fn apply_overrides(&self, config: &mut ServerConfig) {
        if let Some(addr) = self.bind {
            config.bind_address = addr.ip().to_string();
            config.bind_port = addr.port();
        }
        if let Some(csv) = &self.csv {
            config.curated_csv = csv.clone();
        }
        if let Some(key) = self.api_key.as_ref().filter(|key| !key.is_empty()) {
            config.fda.api_key = Some(key.clone());
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            warn!("No config file specified, using defaults");
            ServerConfig::default()
        }
    };

    cli.apply_overrides(&mut config);

    let options = StartupOptions {
        skip_enrichment: cli.skip_enrichment,
    };

    start_server(config, options).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn config_with_key(key: &str) -> ServerConfig {
        let mut config = ServerConfig::default();
        config.fda.api_key = Some(key.to_string());
        config
    }

    #[test]
    fn test_api_key_overrides_config_file() {
        let cli = Cli::try_parse_from(["medlookup-server", "--api-key", "from-cli"]).unwrap();
        let mut config = config_with_key("from-file");

        cli.apply_overrides(&mut config);
        assert_eq!(config.fda.api_key.as_deref(), Some("from-cli"));
    }

    #[test]
    fn test_empty_api_key_keeps_config_file_value() {
        let cli = Cli::try_parse_from(["medlookup-server", "--api-key", ""]).unwrap();
        let mut config = config_with_key("from-file");

        cli.apply_overrides(&mut config);
        assert_eq!(config.fda.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_api_key_reads_environment() {
        let cli = Cli::command();
        let arg = cli
            .get_arguments()
            .find(|arg| arg.get_id() == "api_key")
            .unwrap();
        assert_eq!(arg.get_env(), Some(std::ffi::OsStr::new("OPENFDA_API_KEY")));
    }

    #[test]
    fn test_bind_and_csv_overrides() {
        let cli = Cli::try_parse_from([
            "medlookup-server",
            "--api-key",
            "",
            "--bind",
            "0.0.0.0:8080",
            "--csv",
            "/srv/medications.csv",
            "--skip-enrichment",
        ])
        .unwrap();
        let mut config = ServerConfig::default();

        cli.apply_overrides(&mut config);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.curated_csv, PathBuf::from("/srv/medications.csv"));
        assert!(cli.skip_enrichment);
    }
}
