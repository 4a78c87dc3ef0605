//! HTTP request handlers for the medication API.
//!
//! Implements listing, lookup by id, search, and health check endpoints using axum.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router as AxumRouter,
};
use medlookup_catalog::SearchOrchestrator;
use medlookup_domain::MedicationRecord;
use medlookup_store::CuratedStore;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Enriched curated records
    pub store: Arc<CuratedStore>,
    /// Request-time search over curated and external records
    pub search: Arc<SearchOrchestrator>,
}

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// User query; missing behaves as empty
    #[serde(default)]
    pub q: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Curated records being served
    pub curated_count: usize,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Requested medication does not exist
    NotFound,
    /// Unexpected internal fault; details are logged, not returned
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Medication not found"),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let body = Json(ErrorResponse {
            error: message.to_string(),
        });
        (status, body).into_response()
    }
}

/// GET /api/medications - All enriched curated records
async fn list_medications(State(state): State<AppState>) -> Json<Vec<MedicationRecord>> {
    Json(state.store.get_all())
}

/// GET /api/medications/:id - One curated record
async fn get_medication(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MedicationRecord>, AppError> {
    state
        .store
        .get_by_id(&id)
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// GET /api/medications/search?q= - Curated matches, then external-only results
async fn search_medications(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<MedicationRecord>> {
    let query = params.q.unwrap_or_default();
    Json(state.search.search(&query).await)
}

/// GET /health - Liveness and dataset size
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        curated_count: state.store.len(),
    })
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Request handler panicked: {}", detail);
    AppError::Internal.into_response()
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/api/medications", get(list_medications))
        .route("/api/medications/search", get(search_medications))
        .route("/api/medications/:id", get(get_medication))
        .route("/health", get(health_check))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
