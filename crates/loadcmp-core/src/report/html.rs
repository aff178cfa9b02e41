//! Standalone HTML report with inline CSS and embedded SVG charts.
//!
//! No external assets — the returned string can be saved as a `.html` file
//! and opened directly in a browser.

use chrono::SecondsFormat;

use crate::compare::{MetricComparison, Verdict};
use crate::report::charts;
use crate::report::ReportBundle;

/// Render the full comparison report as a standalone HTML document.
pub fn render_html(bundle: &ReportBundle) -> String {
    let cmp = &bundle.comparison;
    let generated = bundle
        .generated_at
        .to_rfc3339_opts(SecondsFormat::Secs, true);

    let baseline_name = cmp.baseline.display_name();
    let candidate_name = cmp.candidate.display_name();

    let scenario_sections: String = if cmp.scenarios.is_empty() {
        "<p class=\"empty\">No scenario is populated for both architectures; \
         there is nothing to compare.</p>"
            .to_string()
    } else {
        cmp.scenarios
            .iter()
            .map(|scenario| {
                format!(
                    "<h2>{title}</h2>\n{table}",
                    title = html_escape(&scenario.scenario.display_name()),
                    table = metric_table(&scenario.metrics, baseline_name, candidate_name),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let averages_table = metric_table(&cmp.average_metrics, baseline_name, candidate_name);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Load Test Comparison — {baseline} vs {candidate}</title>
<style>
  *, *::before, *::after {{ box-sizing: border-box; }}
  body {{
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    margin: 0; padding: 2rem;
    background: #0f172a; color: #e2e8f0;
    line-height: 1.5;
  }}
  h1 {{ font-size: 1.75rem; font-weight: 700; color: #f1f5f9; margin: 0 0 0.25rem; }}
  h2 {{ font-size: 1.125rem; font-weight: 600; color: #94a3b8;
        text-transform: uppercase; letter-spacing: 0.05em;
        margin: 2rem 0 0.75rem; border-bottom: 1px solid #1e293b; padding-bottom: 0.5rem; }}
  .meta {{ color: #64748b; font-size: 0.875rem; margin-bottom: 2rem; }}
  .meta span {{ margin-right: 1.5rem; }}
  .report-id {{ font-family: monospace; font-size: 0.8rem; color: #475569; }}
  .charts {{ display: flex; flex-wrap: wrap; gap: 1.5rem; margin-bottom: 1rem; }}
  .charts svg {{ border-radius: 0.5rem; border: 1px solid #334155; }}
  table {{
    width: 100%; border-collapse: collapse; font-size: 0.875rem;
    background: #1e293b; border-radius: 0.5rem; overflow: hidden;
    margin-bottom: 2rem;
  }}
  thead {{ background: #0f172a; }}
  th, td {{ padding: 0.625rem 1rem; text-align: left; border-top: 1px solid #334155; }}
  th {{ font-weight: 600; color: #94a3b8; text-transform: uppercase; font-size: 0.75rem; }}
  td {{ color: #cbd5e1; }}
  td.metric {{ color: #94a3b8; font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.04em; }}
  .better {{ color: #34d399; }}
  .worse {{ color: #f87171; }}
  .equal, .neutral {{ color: #94a3b8; }}
  .empty {{ color: #64748b; }}
  .note {{ color: #64748b; font-size: 0.8125rem; margin-top: -1.5rem; margin-bottom: 2rem; }}
  footer {{
    margin-top: 3rem; padding-top: 1rem; border-top: 1px solid #1e293b;
    color: #475569; font-size: 0.8125rem;
  }}
</style>
</head>
<body>
<h1>Load Test Comparison — {baseline} vs {candidate}</h1>
<div class="meta">
  <span>Generated: {generated}</span>
  <span>Baseline: {baseline}</span>
  <span class="report-id">Report ID: {report_id}</span>
</div>

<h2>Charts</h2>
<div class="charts">
{response_chart}
{throughput_chart}
</div>

{scenario_sections}

<h2>Cross-Scenario Averages</h2>
{averages_table}
<p class="note">Averages are unweighted arithmetic means over each
architecture's populated scenarios; request volume does not weight them.</p>

<footer>Generated by loadcmp &bull; {generated}</footer>
</body>
</html>
"#,
        baseline = baseline_name,
        candidate = candidate_name,
        generated = generated,
        report_id = bundle.report_id.hyphenated(),
        response_chart = charts::response_time_chart(bundle),
        throughput_chart = charts::throughput_chart(bundle),
        scenario_sections = scenario_sections,
        averages_table = averages_table,
    )
}

// ---------------------------------------------------------------------------
// Table rendering
// ---------------------------------------------------------------------------

fn metric_table(entries: &[MetricComparison], baseline: &str, candidate: &str) -> String {
    let rows: String = entries
        .iter()
        .map(|entry| {
            let unit = entry.metric.unit();
            format!(
                "    <tr><td class=\"metric\">{label}</td><td>{a}</td><td>{b}</td>\
                 <td class=\"{class}\">{delta:+.1}%</td></tr>",
                label = html_escape(entry.metric.label()),
                a = format_cell(entry.baseline, unit),
                b = format_cell(entry.candidate, unit),
                class = verdict_class(entry.verdict),
                delta = entry.delta_pct,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<table>\n  <thead>\n    <tr><th>Metric</th><th>{baseline}</th><th>{candidate}</th>\
         <th>Delta</th></tr>\n  </thead>\n  <tbody>\n{rows}\n  </tbody>\n</table>"
    )
}

fn format_cell(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        format!("{value:.2}")
    } else {
        format!("{value:.2} {unit}")
    }
}

fn verdict_class(verdict: Option<Verdict>) -> &'static str {
    match verdict {
        Some(Verdict::Better) => "better",
        Some(Verdict::Worse) => "worse",
        Some(Verdict::Equal) => "equal",
        None => "neutral",
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare_architectures;
    use crate::metrics::MetricSet;
    use crate::model::{Architecture, Coordinate, Scenario};
    use crate::store::ResultStore;
    use serde_json::json;

    fn sample_bundle() -> ReportBundle {
        let mut store = ResultStore::new();
        for (arch, avg) in [
            (Architecture::Monolith, 100.0),
            (Architecture::Microservices, 150.0),
        ] {
            store.insert(
                Coordinate::new(arch, Scenario::new("medium_load")),
                json!({
                    "metrics": { "http_req_duration": { "values": { "avg": avg } } }
                }),
            );
        }
        let set = MetricSet::from_store(&store);
        let comparison = compare_architectures(
            &set,
            Architecture::Monolith,
            Architecture::Microservices,
        );
        ReportBundle::new(set, comparison)
    }

    #[test]
    fn html_is_a_standalone_document() {
        let html = render_html(&sample_bundle());
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
    }

    #[test]
    fn html_contains_scenario_section_and_charts() {
        let html = render_html(&sample_bundle());
        assert!(html.contains("Medium Load (20 users)"));
        assert!(html.contains("<svg"));
        assert!(html.contains("Cross-Scenario Averages"));
    }

    #[test]
    fn html_marks_worse_delta_cells() {
        let html = render_html(&sample_bundle());
        assert!(html.contains("class=\"worse\">+50.0%"));
    }

    #[test]
    fn html_empty_surface_shows_placeholder() {
        let set = MetricSet::default();
        let comparison = compare_architectures(
            &set,
            Architecture::Monolith,
            Architecture::Microservices,
        );
        let bundle = ReportBundle::new(set, comparison);
        let html = render_html(&bundle);
        assert!(html.contains("nothing to compare"));
    }

    #[test]
    fn html_escape_handles_special_chars() {
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("<svg>"), "&lt;svg&gt;");
        assert_eq!(html_escape("say \"hi\""), "say &quot;hi&quot;");
    }

    #[test]
    fn scenario_labels_are_escaped() {
        let mut store = ResultStore::new();
        for arch in Architecture::ALL {
            store.insert(
                Coordinate::new(arch, Scenario::new("load<1>")),
                json!({ "metrics": {} }),
            );
        }
        let set = MetricSet::from_store(&store);
        let comparison = compare_architectures(
            &set,
            Architecture::Monolith,
            Architecture::Microservices,
        );
        let bundle = ReportBundle::new(set, comparison);
        let html = render_html(&bundle);
        assert!(html.contains("Load&lt;1&gt;"));
        assert!(!html.contains("<h2>Load<1></h2>"));
    }
}
