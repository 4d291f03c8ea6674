//! Static telemetry dataset, loaded once at startup.
//!
//! Loading is lenient per record: a sample that does not deserialize or
//! fails [`validate_sample`] is skipped with a `warn` event and never reaches
//! the aggregator. Skipped records silently shrink the population that
//! statistics are computed over, so the loaded and skipped counts are
//! logged after every load.

use std::io::Read;
use std::path::{Path, PathBuf};

use regionpulse_common::TelemetrySample;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

/// Built-in telemetry served when no dataset file is configured.
const EMBEDDED_TELEMETRY: &str = include_str!("../data/telemetry.json");

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetSource {
    Embedded,
    Json(PathBuf),
    Csv(PathBuf),
}

impl DatasetSource {
    /// `Csv` for a `.csv` extension (any case), `Json` for anything else.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv {
            DatasetSource::Csv(path)
        } else {
            DatasetSource::Json(path)
        }
    }
}

/// Failure to load a dataset as a whole.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid CSV dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON dataset must be an array of samples")]
    NotAnArray,
}

/// Why a single deserialized sample was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidSample {
    #[error("latency_ms must be finite and non-negative, got {0}")]
    Latency(f64),

    #[error("uptime_pct must be within [0, 100], got {0}")]
    Uptime(f64),
}

/// Check the numeric invariants the aggregator relies on.
pub fn validate_sample(sample: &TelemetrySample) -> Result<(), InvalidSample> {
    if !(sample.latency_ms.is_finite() && sample.latency_ms >= 0.0) {
        return Err(InvalidSample::Latency(sample.latency_ms));
    }
    if !(0.0..=100.0).contains(&sample.uptime_pct) {
        return Err(InvalidSample::Uptime(sample.uptime_pct));
    }
    Ok(())
}

/// Immutable collection of telemetry samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    samples: Vec<TelemetrySample>,
}

impl Dataset {
    /// Wrap already-validated samples. Order is preserved but carries no meaning.
    pub fn new(samples: Vec<TelemetrySample>) -> Self {
        Self { samples }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[TelemetrySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Load `source`, degrading to an empty dataset if it is missing or unreadable.
    pub fn load(source: &DatasetSource) -> Self {
        match Self::try_load(source) {
            Ok(dataset) => dataset,
            Err(e) => {
                warn!(error = %e, "dataset unavailable; serving an empty dataset");
                Self::empty()
            }
        }
    }

    /// Load `source`, failing only when the source as a whole cannot be read.
    pub fn try_load(source: &DatasetSource) -> Result<Self, DatasetError> {
        match source {
            DatasetSource::Embedded => Self::from_json_str(EMBEDDED_TELEMETRY),
            DatasetSource::Json(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
                Self::from_json_str(&text)
            }
            DatasetSource::Csv(path) => {
                let file = std::fs::File::open(path).map_err(|e| io_error(path, e))?;
                Self::from_csv_reader(file)
            }
        }
    }

    /// Parse a JSON array of sample objects, skipping malformed entries.
    pub fn from_json_str(text: &str) -> Result<Self, DatasetError> {
        let Value::Array(records) = serde_json::from_str::<Value>(text)? else {
            return Err(DatasetError::NotAnArray);
        };

        let mut builder = Builder::default();
        for (record, value) in records.into_iter().enumerate() {
            match serde_json::from_value::<TelemetrySample>(value) {
                Ok(sample) => builder.push(record, sample),
                Err(e) => builder.skip(record, &e),
            }
        }
        Ok(builder.finish("json"))
    }

    /// Parse CSV with a `region,service,latency_ms,uptime_pct,timestamp` header,
    /// skipping malformed rows.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        reader.headers()?;

        let mut builder = Builder::default();
        for (record, row) in reader.deserialize::<TelemetrySample>().enumerate() {
            match row {
                Ok(sample) => builder.push(record, sample),
                Err(e) => builder.skip(record, &e),
            }
        }
        Ok(builder.finish("csv"))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> DatasetError {
    DatasetError::Io { path: path.to_path_buf(), source }
}

#[derive(Default)]
struct Builder {
    samples: Vec<TelemetrySample>,
    skipped: usize,
}

impl Builder {
    fn push(&mut self, record: usize, sample: TelemetrySample) {
        match validate_sample(&sample) {
            Ok(()) => self.samples.push(sample),
            Err(e) => self.skip(record, &e),
        }
    }

    fn skip(&mut self, record: usize, reason: &dyn std::fmt::Display) {
        warn!(record, reason = %reason, "skipping malformed telemetry sample");
        self.skipped += 1;
    }

    fn finish(self, format: &'static str) -> Dataset {
        info!(format, samples = self.samples.len(), skipped = self.skipped, "dataset loaded");
        Dataset::new(self.samples)
    }
}
