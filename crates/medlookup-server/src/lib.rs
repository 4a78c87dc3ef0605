//! Medlookup Server
//!
//! Composition root and HTTP surface. Loads the curated dataset, enriches it
//! from openFDA, then serves lookups and merged search results.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use medlookup_catalog::{load_curated_only, EnrichmentReport, HybridLoader, SearchOrchestrator};
use medlookup_domain::LabelSource;
use medlookup_fda::{FdaClient, FdaError};
use medlookup_store::CuratedStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// openFDA client could not be built
    #[error("openFDA client error: {0}")]
    Fda(#[from] FdaError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Startup switches that are not part of the config file
#[derive(Debug, Clone, Copy, Default)]
pub struct StartupOptions {
    /// Serve curated data without contacting openFDA at startup
    pub skip_enrichment: bool,
}

/// Load the curated dataset and assemble the application state
///
/// Enrichment runs to completion before this returns, so no search traffic
/// can observe a partially loaded store.
pub async fn build_state(
    config: &ServerConfig,
    source: Arc<dyn LabelSource>,
    options: StartupOptions,
) -> (AppState, EnrichmentReport) {
    let store = Arc::new(CuratedStore::new());

    let report = if options.skip_enrichment {
        load_curated_only(&store, &config.curated_csv)
    } else {
        HybridLoader::new(source.clone(), config.catalog.clone())
            .load_into(&store, &config.curated_csv)
            .await
    };

    let search = Arc::new(SearchOrchestrator::new(
        store.clone(),
        source,
        config.catalog.clone(),
    ));

    (AppState { store, search }, report)
}

/// Start the HTTP server
///
/// Builds the openFDA client, loads and enriches the curated dataset, and
/// starts the axum server.
pub async fn start_server(config: ServerConfig, options: StartupOptions) -> Result<(), ServerError> {
    config.validate()?;

    info!("Starting Medlookup server");
    info!("Bind address: {}", config.bind_addr());
    info!("Curated dataset: {}", config.curated_csv.display());
    info!("openFDA endpoint: {}", config.fda.endpoint);

    let client = FdaClient::new(
        config.fda.endpoint.clone(),
        config.fda.api_key.clone(),
        config.fda.timeout(),
    )?;

    let (state, report) = build_state(&config, Arc::new(client), options).await;
    info!(
        "Serving {} curated medications ({} dropped during enrichment)",
        report.kept(),
        report.dropped
    );

    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
