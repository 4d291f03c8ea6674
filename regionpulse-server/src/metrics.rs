//! Per-region latency and uptime statistics over a [`Dataset`].
//!
//! Region matching is case-sensitive. Every statistic is rounded to
//! [`DECIMAL_PLACES`] from its exact binary value, ties to even.

use regionpulse_common::RegionMetrics;

use crate::config::{DECIMAL_PLACES, P95_QUANTILE};
use crate::dataset::Dataset;

/// Compute one [`RegionMetrics`] per entry of `regions`, in request order.
///
/// Regions with no matching sample are omitted. A region listed twice is
/// reported twice. `threshold_ms` is compared strictly: a latency equal to
/// the threshold is not a breach.
pub fn compute_region_metrics(dataset: &Dataset, regions: &[String], threshold_ms: f64) -> Vec<RegionMetrics> {
    regions
        .iter()
        .filter_map(|region| region_metrics(dataset, region, threshold_ms))
        .collect()
}

fn region_metrics(dataset: &Dataset, region: &str, threshold_ms: f64) -> Option<RegionMetrics> {
    let matched: Vec<_> = dataset.samples().iter().filter(|s| s.region == region).collect();
    if matched.is_empty() {
        return None;
    }

    let mut latencies: Vec<f64> = matched.iter().map(|s| s.latency_ms).collect();
    let uptimes: Vec<f64> = matched.iter().map(|s| s.uptime_pct).collect();
    let breaches = latencies.iter().filter(|&&l| l > threshold_ms).count() as u64;

    let avg_latency = mean(&latencies)?;
    let avg_uptime = mean(&uptimes)?;
    latencies.sort_by(f64::total_cmp);
    let p95_latency = percentile(&latencies, P95_QUANTILE)?;

    Some(RegionMetrics {
        region: region.to_string(),
        avg_latency: round_to(avg_latency, DECIMAL_PLACES),
        p95_latency: round_to(p95_latency, DECIMAL_PLACES),
        avg_uptime: round_to(avg_uptime, DECIMAL_PLACES),
        breaches,
    })
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Quantile `q` (in `[0, 1]`) of an ascending-sorted slice, linearly
/// interpolated between the two nearest zero-based ranks.
///
/// With `rank = q * (n - 1)`, returns `sorted[lo] * (1 - frac) + sorted[hi] * frac`
/// where `lo = floor(rank)`, `hi = ceil(rank)` and `frac = rank - lo`.
/// Returns `None` for an empty slice.
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = rank - lo as f64;
    Some(sorted[lo] * (1.0 - frac) + sorted[hi] * frac)
}

/// Round to `places` decimal places.
///
/// Decides on the exact stored value, so `0.015` (stored just below the
/// half) rounds down. Exact ties go to the even digit.
pub fn round_to(value: f64, places: i32) -> f64 {
    let places = places.max(0) as usize;
    format!("{:.*}", places, value).parse().unwrap_or(value)
}
