use serde::{Deserialize, Serialize};

use crate::metrics::{Metric, MetricRecord, MetricSet, Polarity};
use crate::model::{Architecture, Scenario};

// ---------------------------------------------------------------------------
// Percentage delta
// ---------------------------------------------------------------------------

/// Signed percentage difference of `candidate` relative to `baseline`:
/// `(candidate − baseline) / baseline × 100`.
///
/// Defined as 0 when the baseline is not strictly positive. The zero floor
/// (rather than an infinity or NaN sentinel) keeps every downstream
/// consumer numeric-safe.
pub fn percent_delta(baseline: f64, candidate: f64) -> f64 {
    if baseline > 0.0 {
        (candidate - baseline) / baseline * 100.0
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// Outcome of weighing a candidate value against a baseline under a
/// metric's polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The candidate value is the better one.
    Better,
    /// The candidate value is the worse one.
    Worse,
    /// The values are equal; neither side wins.
    Equal,
}

/// Classify `candidate` against `baseline`. Pure in (polarity, a, b).
pub fn classify(polarity: Polarity, baseline: f64, candidate: f64) -> Verdict {
    if candidate == baseline {
        return Verdict::Equal;
    }
    let improved = match polarity {
        Polarity::LowerIsBetter => candidate < baseline,
        Polarity::HigherIsBetter => candidate > baseline,
    };
    if improved {
        Verdict::Better
    } else {
        Verdict::Worse
    }
}

// ---------------------------------------------------------------------------
// MetricComparison
// ---------------------------------------------------------------------------

/// One metric compared across the two architectures. Created on demand,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricComparison {
    pub metric: Metric,
    pub baseline: f64,
    pub candidate: f64,
    /// `(candidate − baseline) / baseline × 100`, floored to 0 on a zero
    /// baseline.
    pub delta_pct: f64,
    /// Absent for metrics with no polarity (raw counts, data volume).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
}

/// Compare two records metric by metric, in the fixed metric order.
pub fn compare_records(baseline: &MetricRecord, candidate: &MetricRecord) -> Vec<MetricComparison> {
    Metric::ALL
        .iter()
        .map(|&metric| {
            let a = metric.value(baseline);
            let b = metric.value(candidate);
            MetricComparison {
                metric,
                baseline: a,
                candidate: b,
                delta_pct: percent_delta(a, b),
                verdict: metric.polarity().map(|polarity| classify(polarity, a, b)),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Cross-scenario average
// ---------------------------------------------------------------------------

/// Unweighted arithmetic mean of every field across `records`.
///
/// An all-zero record on empty input; the identity on a singleton. Each
/// scenario counts the same regardless of its request volume.
pub fn average_records<'a, I>(records: I) -> MetricRecord
where
    I: IntoIterator<Item = &'a MetricRecord>,
{
    let mut sum = MetricRecord::default();
    let mut count = 0usize;

    for record in records {
        count += 1;
        sum.mean_response_ms += record.mean_response_ms;
        sum.median_response_ms += record.median_response_ms;
        sum.p95_response_ms += record.p95_response_ms;
        sum.p99_response_ms += record.p99_response_ms;
        sum.max_response_ms += record.max_response_ms;
        sum.min_response_ms += record.min_response_ms;
        sum.requests_per_second += record.requests_per_second;
        sum.total_requests += record.total_requests;
        sum.successful_requests += record.successful_requests;
        sum.failed_requests += record.failed_requests;
        sum.error_rate_pct += record.error_rate_pct;
        sum.success_rate_pct += record.success_rate_pct;
        sum.data_received_mb += record.data_received_mb;
    }

    if count == 0 {
        return sum;
    }

    let n = count as f64;
    sum.mean_response_ms /= n;
    sum.median_response_ms /= n;
    sum.p95_response_ms /= n;
    sum.p99_response_ms /= n;
    sum.max_response_ms /= n;
    sum.min_response_ms /= n;
    sum.requests_per_second /= n;
    sum.total_requests /= n;
    sum.successful_requests /= n;
    sum.failed_requests /= n;
    sum.error_rate_pct /= n;
    sum.success_rate_pct /= n;
    sum.data_received_mb /= n;
    sum
}

// ---------------------------------------------------------------------------
// ScenarioComparison
// ---------------------------------------------------------------------------

/// The two architectures compared for one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub scenario: Scenario,
    pub baseline: MetricRecord,
    pub candidate: MetricRecord,
    pub metrics: Vec<MetricComparison>,
}

// ---------------------------------------------------------------------------
// ArchitectureComparison
// ---------------------------------------------------------------------------

/// Full comparison of two architectures: per-scenario comparisons over the
/// intersection of populated coordinates, plus cross-scenario averages
/// computed per side over that side's own populated scenarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchitectureComparison {
    pub baseline: Architecture,
    pub candidate: Architecture,
    /// One entry per scenario populated on *both* sides, in ordinal order.
    /// A scenario with data on only one side is omitted, never fabricated.
    pub scenarios: Vec<ScenarioComparison>,
    pub baseline_average: MetricRecord,
    pub candidate_average: MetricRecord,
    /// The two averages compared metric by metric.
    pub average_metrics: Vec<MetricComparison>,
}

/// Compare `candidate` against `baseline` over everything `set` holds.
///
/// Total over any subset of populated coordinates, including none at all —
/// an empty set produces an empty comparison surface with all-zero
/// averages.
pub fn compare_architectures(
    set: &MetricSet,
    baseline: Architecture,
    candidate: Architecture,
) -> ArchitectureComparison {
    let mut scenarios = Vec::new();
    for (scenario, baseline_record) in set.records(baseline) {
        let Some(candidate_record) = set.get(candidate, scenario) else {
            continue;
        };
        scenarios.push(ScenarioComparison {
            scenario: scenario.clone(),
            baseline: baseline_record.clone(),
            candidate: candidate_record.clone(),
            metrics: compare_records(baseline_record, candidate_record),
        });
    }

    let baseline_average = average_records(set.records(baseline).map(|(_, record)| record));
    let candidate_average = average_records(set.records(candidate).map(|(_, record)| record));
    let average_metrics = compare_records(&baseline_average, &candidate_average);

    ArchitectureComparison {
        baseline,
        candidate,
        scenarios,
        baseline_average,
        candidate_average,
        average_metrics,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinate;
    use crate::store::ResultStore;
    use serde_json::json;

    fn record_with_mean(mean_ms: f64) -> MetricRecord {
        MetricRecord {
            mean_response_ms: mean_ms,
            ..MetricRecord::default()
        }
    }

    // -----------------------------------------------------------------------
    // percent_delta
    // -----------------------------------------------------------------------

    #[test]
    fn percent_delta_matches_formula_for_positive_baseline() {
        assert!((percent_delta(100.0, 150.0) - 50.0).abs() < 1e-9);
        assert!((percent_delta(200.0, 100.0) - (-50.0)).abs() < 1e-9);
        assert!((percent_delta(80.0, 80.0)).abs() < 1e-9);
    }

    #[test]
    fn percent_delta_zero_baseline_is_floored_to_zero() {
        assert_eq!(percent_delta(0.0, 0.0), 0.0);
        assert_eq!(percent_delta(0.0, 123.4), 0.0);
    }

    // -----------------------------------------------------------------------
    // classify
    // -----------------------------------------------------------------------

    #[test]
    fn classify_lower_is_better_both_directions() {
        assert_eq!(
            classify(Polarity::LowerIsBetter, 100.0, 80.0),
            Verdict::Better
        );
        assert_eq!(
            classify(Polarity::LowerIsBetter, 100.0, 150.0),
            Verdict::Worse
        );
    }

    #[test]
    fn classify_higher_is_better_both_directions() {
        assert_eq!(
            classify(Polarity::HigherIsBetter, 20.0, 30.0),
            Verdict::Better
        );
        assert_eq!(
            classify(Polarity::HigherIsBetter, 20.0, 10.0),
            Verdict::Worse
        );
    }

    #[test]
    fn classify_tie_is_equal_under_either_polarity() {
        assert_eq!(classify(Polarity::LowerIsBetter, 50.0, 50.0), Verdict::Equal);
        assert_eq!(classify(Polarity::HigherIsBetter, 50.0, 50.0), Verdict::Equal);
    }

    // -----------------------------------------------------------------------
    // compare_records
    // -----------------------------------------------------------------------

    #[test]
    fn compare_records_produces_one_entry_per_metric() {
        let comparisons = compare_records(&MetricRecord::default(), &MetricRecord::default());
        assert_eq!(comparisons.len(), Metric::ALL.len());
    }

    #[test]
    fn compare_records_unclassified_metrics_have_no_verdict() {
        let a = MetricRecord {
            total_requests: 100.0,
            ..MetricRecord::default()
        };
        let b = MetricRecord {
            total_requests: 200.0,
            ..MetricRecord::default()
        };
        let comparisons = compare_records(&a, &b);
        let total = comparisons
            .iter()
            .find(|c| c.metric == Metric::TotalRequests)
            .expect("total requests entry");
        assert!((total.delta_pct - 100.0).abs() < 1e-9);
        assert_eq!(total.verdict, None);
    }

    // -----------------------------------------------------------------------
    // average_records
    // -----------------------------------------------------------------------

    #[test]
    fn average_of_no_records_is_all_zeros() {
        let avg = average_records(std::iter::empty());
        assert_eq!(avg, MetricRecord::default());
    }

    #[test]
    fn average_of_one_record_is_that_record() {
        let record = MetricRecord {
            mean_response_ms: 123.0,
            requests_per_second: 45.0,
            error_rate_pct: 1.5,
            ..MetricRecord::default()
        };
        let avg = average_records([&record]);
        assert_eq!(avg, record);
    }

    #[test]
    fn average_is_the_unweighted_mean() {
        let light = MetricRecord {
            mean_response_ms: 100.0,
            total_requests: 10.0,
            ..MetricRecord::default()
        };
        let heavy = MetricRecord {
            mean_response_ms: 300.0,
            total_requests: 1000.0,
            ..MetricRecord::default()
        };
        let avg = average_records([&light, &heavy]);
        // Each scenario counts the same, whatever its request volume.
        assert!((avg.mean_response_ms - 200.0).abs() < 1e-9);
        assert!((avg.total_requests - 505.0).abs() < 1e-9);
    }

    // -----------------------------------------------------------------------
    // compare_architectures
    // -----------------------------------------------------------------------

    fn set_from(pairs: Vec<(Architecture, &str, MetricRecord)>) -> MetricSet {
        // Build through a store so the test exercises the same path the
        // pipeline uses; documents carry the mean so extraction reproduces
        // the records.
        let mut store = ResultStore::new();
        for (architecture, scenario, record) in &pairs {
            let doc = json!({
                "metrics": {
                    "http_req_duration": { "values": { "avg": record.mean_response_ms } }
                }
            });
            store.insert(
                Coordinate::new(*architecture, Scenario::new(*scenario)),
                doc,
            );
        }
        MetricSet::from_store(&store)
    }

    #[test]
    fn end_to_end_medium_load_delta_and_verdict() {
        let set = set_from(vec![
            (Architecture::Monolith, "medium_load", record_with_mean(100.0)),
            (
                Architecture::Microservices,
                "medium_load",
                record_with_mean(150.0),
            ),
        ]);
        let cmp = compare_architectures(
            &set,
            Architecture::Monolith,
            Architecture::Microservices,
        );

        assert_eq!(cmp.scenarios.len(), 1);
        let scenario = &cmp.scenarios[0];
        assert_eq!(scenario.scenario.label(), "medium_load");

        let mean = scenario
            .metrics
            .iter()
            .find(|c| c.metric == Metric::MeanResponseMs)
            .expect("mean response entry");
        assert!((mean.delta_pct - 50.0).abs() < 1e-9);
        assert_eq!(mean.verdict, Some(Verdict::Worse));
    }

    #[test]
    fn missing_counterpart_scenario_is_omitted() {
        let set = set_from(vec![
            (Architecture::Monolith, "light_load", record_with_mean(50.0)),
            (Architecture::Monolith, "heavy_load", record_with_mean(200.0)),
            (
                Architecture::Microservices,
                "light_load",
                record_with_mean(80.0),
            ),
        ]);
        let cmp = compare_architectures(
            &set,
            Architecture::Monolith,
            Architecture::Microservices,
        );

        // heavy_load has no microservices side, so no comparison for it.
        assert_eq!(cmp.scenarios.len(), 1);
        assert_eq!(cmp.scenarios[0].scenario.label(), "light_load");

        // Averages run over each side's own populated scenarios.
        assert!((cmp.baseline_average.mean_response_ms - 125.0).abs() < 1e-9);
        assert!((cmp.candidate_average.mean_response_ms - 80.0).abs() < 1e-9);
    }

    #[test]
    fn empty_set_produces_empty_surface() {
        let set = MetricSet::default();
        let cmp = compare_architectures(
            &set,
            Architecture::Monolith,
            Architecture::Microservices,
        );
        assert!(cmp.scenarios.is_empty());
        assert_eq!(cmp.baseline_average, MetricRecord::default());
        assert_eq!(cmp.candidate_average, MetricRecord::default());
        // Zero-baseline deltas floor to 0 and every tie classifies Equal.
        for entry in &cmp.average_metrics {
            assert_eq!(entry.delta_pct, 0.0);
            if entry.verdict.is_some() {
                assert_eq!(entry.verdict, Some(Verdict::Equal));
            }
        }
    }

    #[test]
    fn scenario_comparisons_are_in_ordinal_order() {
        let set = set_from(vec![
            (Architecture::Monolith, "heavy_load", record_with_mean(300.0)),
            (Architecture::Monolith, "light_load", record_with_mean(100.0)),
            (
                Architecture::Microservices,
                "heavy_load",
                record_with_mean(400.0),
            ),
            (
                Architecture::Microservices,
                "light_load",
                record_with_mean(120.0),
            ),
        ]);
        let cmp = compare_architectures(
            &set,
            Architecture::Monolith,
            Architecture::Microservices,
        );
        let labels: Vec<&str> = cmp
            .scenarios
            .iter()
            .map(|s| s.scenario.label())
            .collect();
        assert_eq!(labels, vec!["light_load", "heavy_load"]);
    }
}
