use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use regionpulse_common::{ErrorResponse, MetricsRequest, MetricsResponse, StatusResponse};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

pub mod config;
pub mod dataset;
pub mod metrics;

use config::STATUS_MESSAGE;
use dataset::{Dataset, DatasetSource};
use metrics::compute_region_metrics;

/// Shared, read-only request state. Cloning only bumps the dataset's refcount.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: SocketAddr,
    pub dataset: DatasetSource,
}

/// RegionPulse Server
pub struct Server {
    config: ServerConfig,
}

impl Server {
    /// Create a new server with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Get the server's configured address
    pub fn address(&self) -> SocketAddr {
        self.config.address
    }

    /// Create the application router with the given state
    pub fn create_router(state: AppState) -> Router {
        Router::new()
            .route("/", get(handle_status))
            .route("/api/latency", post(handle_latency))
            .layer(cors_layer())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Load the dataset, then serve, signalling `ready_tx` with the bound address once
    /// accepting connections
    pub async fn run(self, ready_tx: tokio::sync::oneshot::Sender<SocketAddr>) -> Result<(), Box<dyn std::error::Error>> {
        let dataset = Dataset::load(&self.config.dataset);
        let state = AppState::new(Arc::new(dataset));
        let app = Self::create_router(state);
        let listener = tokio::net::TcpListener::bind(self.config.address).await?;
        let local_addr = listener.local_addr()?;
        info!(addr = %local_addr, "listening");
        ready_tx.send(local_addr).ok();
        axum::serve(listener, app).await?;
        Ok(())
    }
}

/// Any origin; GET, POST and preflight; no credentials.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: message.into() })).into_response()
}

/// Handler for GET /: liveness message.
pub async fn handle_status() -> Json<StatusResponse> {
    Json(StatusResponse { message: STATUS_MESSAGE.to_string() })
}

/// Handler for POST /api/latency: per-region metrics for the requested regions.
///
/// Body rejections keep axum's status (400 syntax, 415 content type, 422 shape)
/// but are rendered as an [`ErrorResponse`].
pub async fn handle_latency(
    State(state): State<AppState>,
    payload: Result<Json<MetricsRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return error_response(rejection.status(), rejection.body_text()),
    };

    if !request.threshold_ms.is_finite() {
        return error_response(StatusCode::UNPROCESSABLE_ENTITY, "threshold_ms must be a finite number");
    }

    let metrics = compute_region_metrics(&state.dataset, &request.regions, request.threshold_ms);
    debug!(
        requested = request.regions.len(),
        returned = metrics.len(),
        threshold_ms = request.threshold_ms,
        "computed region metrics"
    );
    (StatusCode::OK, Json(MetricsResponse { metrics })).into_response()
}
