use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Architecture, Scenario};
use crate::store::ResultStore;

const BYTES_PER_MB: f64 = 1_048_576.0;

// ---------------------------------------------------------------------------
// Safe nested lookup
// ---------------------------------------------------------------------------

/// Walk `path` through nested JSON objects.
pub fn value_at<'a>(document: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = document;
    for key in path {
        current = current.get(key)?;
    }
    Some(current)
}

/// Numeric value at `path`, or zero.
///
/// Any missing intermediate key, non-numeric leaf, or non-finite/negative
/// number yields 0.0, so extracted fields are always finite and
/// non-negative. This is the one lookup primitive every field extraction
/// goes through.
pub fn numeric_at(document: &Value, path: &[&str]) -> f64 {
    match value_at(document, path).and_then(Value::as_f64) {
        Some(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

fn has_numeric(document: &Value, path: &[&str]) -> bool {
    value_at(document, path).and_then(Value::as_f64).is_some()
}

// ---------------------------------------------------------------------------
// Polarity
// ---------------------------------------------------------------------------

/// Whether a lower or a higher value is the better outcome for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    LowerIsBetter,
    HigherIsBetter,
}

// ---------------------------------------------------------------------------
// Metric
// ---------------------------------------------------------------------------

/// The fixed set of extracted performance metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    MeanResponseMs,
    MedianResponseMs,
    P95ResponseMs,
    P99ResponseMs,
    MaxResponseMs,
    MinResponseMs,
    RequestsPerSecond,
    TotalRequests,
    SuccessfulRequests,
    FailedRequests,
    ErrorRatePct,
    SuccessRatePct,
    DataReceivedMb,
}

impl Metric {
    pub const ALL: [Metric; 13] = [
        Metric::MeanResponseMs,
        Metric::MedianResponseMs,
        Metric::P95ResponseMs,
        Metric::P99ResponseMs,
        Metric::MaxResponseMs,
        Metric::MinResponseMs,
        Metric::RequestsPerSecond,
        Metric::TotalRequests,
        Metric::SuccessfulRequests,
        Metric::FailedRequests,
        Metric::ErrorRatePct,
        Metric::SuccessRatePct,
        Metric::DataReceivedMb,
    ];

    /// Project this metric's value out of a record.
    pub fn value(&self, record: &MetricRecord) -> f64 {
        match self {
            Metric::MeanResponseMs => record.mean_response_ms,
            Metric::MedianResponseMs => record.median_response_ms,
            Metric::P95ResponseMs => record.p95_response_ms,
            Metric::P99ResponseMs => record.p99_response_ms,
            Metric::MaxResponseMs => record.max_response_ms,
            Metric::MinResponseMs => record.min_response_ms,
            Metric::RequestsPerSecond => record.requests_per_second,
            Metric::TotalRequests => record.total_requests,
            Metric::SuccessfulRequests => record.successful_requests,
            Metric::FailedRequests => record.failed_requests,
            Metric::ErrorRatePct => record.error_rate_pct,
            Metric::SuccessRatePct => record.success_rate_pct,
            Metric::DataReceivedMb => record.data_received_mb,
        }
    }

    /// Per-metric polarity. Raw counts and data volume have no better/worse
    /// direction and are never classified.
    pub fn polarity(&self) -> Option<Polarity> {
        match self {
            Metric::MeanResponseMs
            | Metric::MedianResponseMs
            | Metric::P95ResponseMs
            | Metric::P99ResponseMs
            | Metric::MaxResponseMs
            | Metric::MinResponseMs
            | Metric::ErrorRatePct => Some(Polarity::LowerIsBetter),
            Metric::RequestsPerSecond | Metric::SuccessRatePct => Some(Polarity::HigherIsBetter),
            Metric::TotalRequests
            | Metric::SuccessfulRequests
            | Metric::FailedRequests
            | Metric::DataReceivedMb => None,
        }
    }

    /// Human-facing label for report tables.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::MeanResponseMs => "Mean Response Time",
            Metric::MedianResponseMs => "Median Response Time",
            Metric::P95ResponseMs => "P95 Response Time",
            Metric::P99ResponseMs => "P99 Response Time",
            Metric::MaxResponseMs => "Max Response Time",
            Metric::MinResponseMs => "Min Response Time",
            Metric::RequestsPerSecond => "Throughput",
            Metric::TotalRequests => "Total Requests",
            Metric::SuccessfulRequests => "Successful Requests",
            Metric::FailedRequests => "Failed Requests",
            Metric::ErrorRatePct => "Error Rate",
            Metric::SuccessRatePct => "Success Rate",
            Metric::DataReceivedMb => "Data Received",
        }
    }

    /// Display unit, empty for bare counts.
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::MeanResponseMs
            | Metric::MedianResponseMs
            | Metric::P95ResponseMs
            | Metric::P99ResponseMs
            | Metric::MaxResponseMs
            | Metric::MinResponseMs => "ms",
            Metric::RequestsPerSecond => "req/s",
            Metric::TotalRequests | Metric::SuccessfulRequests | Metric::FailedRequests => "",
            Metric::ErrorRatePct | Metric::SuccessRatePct => "%",
            Metric::DataReceivedMb => "MB",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// RateSource
// ---------------------------------------------------------------------------

/// Which of the two independent error/success-rate sources wins when a
/// document carries both.
///
/// k6 documents may expose a fractional `errors` rate metric, explicit
/// success/failure check counters, or both. The extractor uses exactly one
/// of them per document — the two are never combined or averaged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RateSource {
    /// Explicit `successful_requests` / `failed_requests` counters win.
    #[default]
    PreferCounts,
    /// The fractional `errors` rate metric wins.
    PreferErrorsMetric,
}

// ---------------------------------------------------------------------------
// MetricRecord
// ---------------------------------------------------------------------------

/// Flat record of extracted performance metrics for one
/// (architecture, scenario) coordinate. Never mutated after extraction.
///
/// Every field is finite and non-negative; metrics absent from the source
/// document read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub mean_response_ms: f64,
    pub median_response_ms: f64,
    pub p95_response_ms: f64,
    pub p99_response_ms: f64,
    pub max_response_ms: f64,
    pub min_response_ms: f64,
    pub requests_per_second: f64,
    pub total_requests: f64,
    pub successful_requests: f64,
    pub failed_requests: f64,
    pub error_rate_pct: f64,
    pub success_rate_pct: f64,
    pub data_received_mb: f64,
}

impl MetricRecord {
    /// Extract a record with the default rate-source priority.
    pub fn from_document(document: &Value) -> Self {
        Self::from_document_with(document, RateSource::default())
    }

    /// Extract a record from one raw result document.
    ///
    /// Total over any structurally valid document: every lookup defaults to
    /// zero on a missing path. Data received is converted bytes → MB
    /// exactly; rounding is left to the renderers.
    pub fn from_document_with(document: &Value, rate_source: RateSource) -> Self {
        let (error_rate_pct, success_rate_pct) = derive_rates(document, rate_source);

        Self {
            mean_response_ms: numeric_at(
                document,
                &["metrics", "http_req_duration", "values", "avg"],
            ),
            median_response_ms: numeric_at(
                document,
                &["metrics", "http_req_duration", "values", "med"],
            ),
            p95_response_ms: numeric_at(
                document,
                &["metrics", "http_req_duration", "values", "p(95)"],
            ),
            p99_response_ms: numeric_at(
                document,
                &["metrics", "http_req_duration", "values", "p(99)"],
            ),
            max_response_ms: numeric_at(
                document,
                &["metrics", "http_req_duration", "values", "max"],
            ),
            min_response_ms: numeric_at(
                document,
                &["metrics", "http_req_duration", "values", "min"],
            ),
            requests_per_second: numeric_at(document, &["metrics", "http_reqs", "values", "rate"]),
            total_requests: numeric_at(document, &["metrics", "http_reqs", "values", "count"]),
            successful_requests: numeric_at(
                document,
                &["metrics", "successful_requests", "values", "count"],
            ),
            failed_requests: numeric_at(
                document,
                &["metrics", "failed_requests", "values", "count"],
            ),
            error_rate_pct,
            success_rate_pct,
            data_received_mb: numeric_at(document, &["metrics", "data_received", "values", "count"])
                / BYTES_PER_MB,
        }
    }
}

/// Derive the (error %, success %) pair from whichever rate source the
/// document supplies. Zeros when neither source is present.
fn derive_rates(document: &Value, rate_source: RateSource) -> (f64, f64) {
    const FRACTION: [&str; 4] = ["metrics", "errors", "values", "rate"];
    const SUCCESS_COUNT: [&str; 4] = ["metrics", "successful_requests", "values", "count"];
    const FAILED_COUNT: [&str; 4] = ["metrics", "failed_requests", "values", "count"];

    let has_fraction = has_numeric(document, &FRACTION);
    let has_counts =
        has_numeric(document, &SUCCESS_COUNT) || has_numeric(document, &FAILED_COUNT);

    let from_counts = |document: &Value| {
        let successful = numeric_at(document, &SUCCESS_COUNT);
        let failed = numeric_at(document, &FAILED_COUNT);
        let total = successful + failed;
        if total > 0.0 {
            (failed / total * 100.0, successful / total * 100.0)
        } else {
            (0.0, 0.0)
        }
    };
    let from_fraction = |document: &Value| {
        // The fraction is a ratio in [0, 1]; clamp so a malformed value
        // cannot push the derived success rate negative.
        let fraction = numeric_at(document, &FRACTION).min(1.0);
        (fraction * 100.0, (1.0 - fraction) * 100.0)
    };

    match rate_source {
        RateSource::PreferCounts => {
            if has_counts {
                from_counts(document)
            } else if has_fraction {
                from_fraction(document)
            } else {
                (0.0, 0.0)
            }
        }
        RateSource::PreferErrorsMetric => {
            if has_fraction {
                from_fraction(document)
            } else if has_counts {
                from_counts(document)
            } else {
                (0.0, 0.0)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// MetricSet
// ---------------------------------------------------------------------------

/// Extracted records for every populated (architecture, scenario)
/// coordinate of a [`ResultStore`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    records: BTreeMap<Architecture, BTreeMap<Scenario, MetricRecord>>,
}

impl MetricSet {
    /// Extract every stored document with the default rate-source priority.
    pub fn from_store(store: &ResultStore) -> Self {
        Self::from_store_with(store, RateSource::default())
    }

    pub fn from_store_with(store: &ResultStore, rate_source: RateSource) -> Self {
        let mut records: BTreeMap<Architecture, BTreeMap<Scenario, MetricRecord>> =
            BTreeMap::new();
        for architecture in store.architectures() {
            let by_scenario = records.entry(architecture).or_default();
            for (scenario, document) in store.documents(architecture) {
                by_scenario.insert(
                    scenario.clone(),
                    MetricRecord::from_document_with(document, rate_source),
                );
            }
        }
        Self { records }
    }

    pub fn get(&self, architecture: Architecture, scenario: &Scenario) -> Option<&MetricRecord> {
        self.records.get(&architecture)?.get(scenario)
    }

    /// All (scenario, record) pairs for one architecture, in ordinal order.
    pub fn records(
        &self,
        architecture: Architecture,
    ) -> impl Iterator<Item = (&Scenario, &MetricRecord)> {
        self.records
            .get(&architecture)
            .into_iter()
            .flat_map(|by_scenario| by_scenario.iter())
    }

    /// Scenarios populated for one architecture, in ordinal order.
    pub fn scenarios(&self, architecture: Architecture) -> Vec<&Scenario> {
        self.records
            .get(&architecture)
            .map(|by_scenario| by_scenario.keys().collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.values().all(|by_scenario| by_scenario.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
