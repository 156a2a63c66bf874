//! Metrics HTTP Routes
//!
//! CRUD endpoints for per-API hit counters plus the three scalar counter
//! lookups. Missing records render as a JSON `null` body with HTTP 200; the
//! wire shape matches the stored record (camelCase).

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::metrics::MetricsService;
use crate::store::MetricsRecord;

// ==================
// Shared State
// ==================

/// Metrics state shared across handlers
pub struct MetricsState {
    pub service: MetricsService,
}

impl MetricsState {
    pub fn new(service: MetricsService) -> Self {
        Self { service }
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

// ==================
// Metrics Routes
// ==================

/// Create metrics routes
pub fn metrics_routes(state: Arc<MetricsState>) -> Router {
    Router::new()
        .route(
            "/metrics",
            get(list_metrics_handler).post(update_metrics_handler),
        )
        .route("/metrics/:api_name", get(get_metrics_handler))
        .route("/metrics/:api_name/total-hits", get(total_hits_handler))
        .route(
            "/metrics/:api_name/successful-hits",
            get(successful_hits_handler),
        )
        .route("/metrics/:api_name/failed-hits", get(failed_hits_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn list_metrics_handler(
    State(state): State<Arc<MetricsState>>,
) -> Json<Vec<MetricsRecord>> {
    Json(state.service.get_all_metrics())
}

async fn get_metrics_handler(
    State(state): State<Arc<MetricsState>>,
    Path(api_name): Path<String>,
) -> Json<Option<MetricsRecord>> {
    Json(state.service.get_metrics_by_api_name(&api_name))
}

async fn update_metrics_handler(
    State(state): State<Arc<MetricsState>>,
    Json(record): Json<MetricsRecord>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state.service.update_metrics(record).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
                code: 500,
            }),
        )
    })?;

    Ok(StatusCode::OK)
}

async fn total_hits_handler(
    State(state): State<Arc<MetricsState>>,
    Path(api_name): Path<String>,
) -> Json<Option<i64>> {
    Json(state.service.get_total_hits(&api_name))
}

async fn successful_hits_handler(
    State(state): State<Arc<MetricsState>>,
    Path(api_name): Path<String>,
) -> Json<Option<i64>> {
    Json(state.service.get_successful_hits(&api_name))
}

async fn failed_hits_handler(
    State(state): State<Arc<MetricsState>>,
    Path(api_name): Path<String>,
) -> Json<Option<i64>> {
    Json(state.service.get_failed_hits(&api_name))
}
