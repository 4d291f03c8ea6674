/// Quantile reported as `p95_latency`.
pub const P95_QUANTILE: f64 = 0.95;

/// Decimal places every reported statistic is rounded to.
pub const DECIMAL_PLACES: i32 = 2;

/// Address the binary listens on when `--listen` is not given.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";

/// Body of `GET /`.
pub const STATUS_MESSAGE: &str = "Latency endpoint is running. POST to /api/latency";
