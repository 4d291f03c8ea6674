use regionpulse_common::RegionPulseError;

#[test]
fn test_network_error() {
    let err = RegionPulseError::NetworkError("connection refused".to_string());
    assert_eq!(err.to_string(), "Network error: connection refused");
}

#[test]
fn test_http_error() {
    let err = RegionPulseError::HttpError(422, "missing field `threshold_ms`".to_string());
    assert_eq!(err.to_string(), "HTTP 422: missing field `threshold_ms`");
}

#[test]
fn test_invalid_threshold() {
    let err = RegionPulseError::InvalidThreshold(f64::INFINITY);
    assert_eq!(err.to_string(), "Threshold must be a finite number, got inf");
}

#[test]
fn test_invalid_response() {
    let err = RegionPulseError::InvalidResponse("expected value at line 1".to_string());
    assert_eq!(err.to_string(), "Invalid response body: expected value at line 1");
}

#[test]
fn test_error_equality() {
    let a = RegionPulseError::HttpError(400, "bad".to_string());
    let b = RegionPulseError::HttpError(400, "bad".to_string());
    let c = RegionPulseError::HttpError(500, "bad".to_string());
    assert_eq!(a, b);
    assert_ne!(a, c);
}
