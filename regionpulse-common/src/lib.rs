use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for RegionPulse client operations
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegionPulseError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP {0}: {1}")]
    HttpError(u16, String),

    #[error("Threshold must be a finite number, got {0}")]
    InvalidThreshold(f64),

    #[error("Invalid response body: {0}")]
    InvalidResponse(String),
}

/// One telemetry record: a single service's latency and uptime in a region on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub region: String,
    pub service: String,
    pub latency_ms: f64,
    pub uptime_pct: f64,
    /// Date key in `YYYYMMDD` form.
    pub timestamp: u64,
}

/// Body of `POST /api/latency`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRequest {
    pub regions: Vec<String>,
    pub threshold_ms: f64,
}

/// Summary statistics for one requested region. All floats are rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionMetrics {
    pub region: String,
    pub avg_latency: f64,
    pub p95_latency: f64,
    pub avg_uptime: f64,
    /// Samples with latency strictly above the threshold.
    pub breaches: u64,
}

/// Response envelope for `POST /api/latency`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResponse {
    pub metrics: Vec<RegionMetrics>,
}

/// Response body for `GET /`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
}

/// JSON error envelope returned by the server for all error responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Result type for RegionPulse client operations
pub type Result<T> = std::result::Result<T, RegionPulseError>;
