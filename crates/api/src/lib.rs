//! EV Battery Intelligence API Server
//!
//! JSON API behind the battery health, charging abuse and driving stress
//! dashboard pages.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

mod error;
mod observability;
mod routes;
mod settings;

pub use error::{ApiError, ErrorBody};
pub use observability::{init_logging, init_metrics, record_prediction};
pub use settings::{LogFormat, LoggingSettings, ServerSettings, Settings, SettingsError};

use inference_engine::InferenceEngine;

/// Application state shared across handlers. Read-only after startup.
pub struct AppState {
    /// Loaded models
    pub engine: InferenceEngine,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus handle, when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state
    pub fn new(engine: InferenceEngine, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            engine,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics,
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    /// Backing format of each loaded model, keyed by role
    pub models: BTreeMap<String, String>,
    pub charging_features: usize,
    pub driving_classes: Vec<String>,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/about", get(routes::about::get_about))
        .route("/api/v1/bhi/inputs", get(routes::bhi::get_inputs))
        .route("/api/v1/bhi", post(routes::bhi::predict))
        .route("/api/v1/charging/inputs", get(routes::charging::get_inputs))
        .route("/api/v1/charging", post(routes::charging::predict))
        .route("/api/v1/driving/inputs", get(routes::driving::get_inputs))
        .route("/api/v1/driving", post(routes::driving::predict))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let models = state
        .engine
        .model_kinds()
        .into_iter()
        .map(|(role, kind)| (role.to_string(), kind.to_string()))
        .collect();

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        models,
        charging_features: state.engine.charging_schema().len(),
        driving_classes: state.engine.driving_classes().to_vec(),
    })
}

/// Prometheus scrape endpoint
async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics disabled".to_string()),
    }
}

/// Load the models and serve until shutdown.
///
/// Expects logging to be initialized already.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let engine = InferenceEngine::load(&settings.models)?;
    let metrics = if settings.server.metrics_enabled {
        init_metrics()
    } else {
        None
    };

    let state = Arc::new(AppState::new(engine, metrics));
    let app = create_router(state);

    info!("Starting API server on {}", settings.server.addr);

    let listener = tokio::net::TcpListener::bind(&settings.server.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
