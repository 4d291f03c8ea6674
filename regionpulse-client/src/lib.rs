use regionpulse_common::{
    ErrorResponse, MetricsRequest, MetricsResponse, RegionMetrics, RegionPulseError, Result, StatusResponse,
};

/// RegionPulse client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server origin, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
}

/// RegionPulse Client
pub struct Client {
    pub config: ClientConfig,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Self {
        Self { config, http_client: reqwest::Client::new() }
    }

    /// Build the URL for `path` against the configured base URL.
    pub fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    /// Fetch per-region metrics. Regions unknown to the server are absent from the result.
    pub async fn latency(&self, regions: &[String], threshold_ms: f64) -> Result<Vec<RegionMetrics>> {
        if !threshold_ms.is_finite() {
            return Err(RegionPulseError::InvalidThreshold(threshold_ms));
        }

        let body = MetricsRequest { regions: regions.to_vec(), threshold_ms };
        let response = self
            .http_client
            .post(self.build_url("/api/latency"))
            .json(&body)
            .send()
            .await
            .map_err(|e| RegionPulseError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(parse_error_response(status, response).await);
        }

        let parsed = response
            .json::<MetricsResponse>()
            .await
            .map_err(|e| RegionPulseError::InvalidResponse(e.to_string()))?;
        Ok(parsed.metrics)
    }

    /// Fetch the server's liveness message from `GET /`.
    pub async fn status(&self) -> Result<String> {
        let response = self
            .http_client
            .get(self.build_url("/"))
            .send()
            .await
            .map_err(|e| RegionPulseError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(parse_error_response(status, response).await);
        }

        response
            .json::<StatusResponse>()
            .await
            .map(|r| r.message)
            .map_err(|e| RegionPulseError::InvalidResponse(e.to_string()))
    }
}

async fn parse_error_response(status: reqwest::StatusCode, response: reqwest::Response) -> RegionPulseError {
    let error_msg = response
        .json::<ErrorResponse>()
        .await
        .map(|r| r.error)
        .unwrap_or_else(|_| format!("Server returned status: {}", status));

    RegionPulseError::HttpError(status.as_u16(), error_msg)
}
