//! Plain-text rendering of a comparison for terminal output.

use chrono::SecondsFormat;

use crate::compare::{MetricComparison, Verdict};
use crate::report::ReportBundle;

/// Render the full comparison as console text.
///
/// Purely mechanical: one section per compared scenario plus a
/// cross-scenario averages section, all driven by the comparison output.
pub fn render_console(bundle: &ReportBundle) -> String {
    let cmp = &bundle.comparison;
    let rule = "=".repeat(78);
    let thin_rule = "-".repeat(78);

    let mut out = String::new();
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!(
        " Load Test Comparison — {} vs {}\n",
        cmp.baseline.display_name(),
        cmp.candidate.display_name()
    ));
    out.push_str(&format!(
        " Report {}  generated {}\n",
        bundle.report_id.hyphenated(),
        bundle
            .generated_at
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    out.push_str(&format!("{rule}\n"));

    if cmp.scenarios.is_empty() {
        out.push_str("\nNo scenario is populated for both architectures; nothing to compare.\n");
    }

    for scenario in &cmp.scenarios {
        out.push_str(&format!(
            "\n[{}]\n{thin_rule}\n",
            scenario.scenario.display_name().to_uppercase()
        ));
        out.push_str(&header_row(
            cmp.baseline.display_name(),
            cmp.candidate.display_name(),
        ));
        for entry in &scenario.metrics {
            out.push_str(&metric_row(entry));
        }
    }

    out.push_str(&format!("\n[CROSS-SCENARIO AVERAGES]\n{thin_rule}\n"));
    out.push_str(&header_row(
        cmp.baseline.display_name(),
        cmp.candidate.display_name(),
    ));
    for entry in &cmp.average_metrics {
        out.push_str(&metric_row(entry));
    }
    out.push_str(&format!("{rule}\n"));

    out
}

fn header_row(baseline: &str, candidate: &str) -> String {
    format!(
        "  {:<28} {:>14} {:>14} {:>9}\n",
        "Metric", baseline, candidate, "Delta"
    )
}

fn metric_row(entry: &MetricComparison) -> String {
    let unit = entry.metric.unit();
    let label = if unit.is_empty() {
        entry.metric.label().to_string()
    } else {
        format!("{} ({})", entry.metric.label(), unit)
    };
    let verdict = match entry.verdict {
        Some(Verdict::Better) => "  better",
        Some(Verdict::Worse) => "  worse",
        Some(Verdict::Equal) => "  same",
        None => "",
    };
    format!(
        "  {:<28} {:>14.2} {:>14.2} {:>+8.1}%{}\n",
        label, entry.baseline, entry.candidate, entry.delta_pct, verdict
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
