//! HTTP surface.
//!
//! - `GET /api/wellness?countries=&metrics=&refresh=`  filtered dataset
//! - `GET /api/wellness/catalog`                       categories, units, derived metrics
//! - `GET /health`                                     liveness and cache state

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use wellness_cache::CacheStats;
use wellness_contracts::{
    catalog::{MetricCategory, MetricUnit},
    dataset::AnnotatedMergedData,
    error::WellnessError,
    query::WellnessQuery,
};
use wellness_core::{
    derive::{DerivedMetric, DERIVED_METRICS},
    traits::MetricCatalog,
};

use crate::app::App;

pub type AppState = Arc<App>;

// Request / response types

#[derive(Debug, Default, Deserialize)]
pub struct WellnessParams {
    pub countries: Option<String>,
    pub metrics: Option<String>,
    pub refresh: Option<String>,
}

impl WellnessParams {
    fn to_query(&self) -> WellnessQuery {
        WellnessQuery::from_params(
            self.countries.as_deref(),
            self.metrics.as_deref(),
            self.refresh.as_deref(),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub categories: Vec<MetricCategory>,
    pub units: Vec<MetricUnit>,
    pub derived: Vec<DerivedMetric>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub cached: bool,
    pub fetched_at: Option<DateTime<Utc>>,
    pub cache: CacheStats,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal_error(e: WellnessError) -> ApiError {
    error!(kind = e.kind(), error = %e, "wellness request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.kind().to_string(),
            message: e.to_string(),
        }),
    )
}

/// GET /api/wellness
async fn get_wellness(
    State(app): State<AppState>,
    Query(params): Query<WellnessParams>,
) -> Result<Json<AnnotatedMergedData>, ApiError> {
    app.service
        .get_wellness_data(&params.to_query())
        .await
        .map(Json)
        .map_err(internal_error)
}

/// GET /api/wellness/catalog
async fn get_catalog(State(app): State<AppState>) -> Json<CatalogResponse> {
    Json(catalog(&app))
}

/// GET /health
async fn health(State(app): State<AppState>) -> Json<HealthResponse> {
    let entry = app.cache.peek();
    Json(HealthResponse {
        status: "ok",
        cached: entry.is_some(),
        fetched_at: entry.map(|e| e.fetched_at),
        cache: app.cache.stats(),
    })
}

pub fn catalog(app: &App) -> CatalogResponse {
    CatalogResponse {
        categories: app.taxonomy.categories().to_vec(),
        units: app.taxonomy.units().to_vec(),
        derived: DERIVED_METRICS.to_vec(),
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/wellness", get(get_wellness))
        .route("/api/wellness/catalog", get(get_catalog))
        .route("/health", get(health))
        .with_state(state)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
