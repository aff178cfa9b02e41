//! Hand-written SVG line charts, one series per architecture.
//!
//! The charts plot a metric against the scenario user-load convention, so
//! only scenarios with a known user load appear on the axis. The output is
//! standalone SVG — saved as a `.svg` file it opens directly in a browser,
//! and it embeds as-is into the HTML report.

use crate::metrics::Metric;
use crate::model::Architecture;
use crate::report::ReportBundle;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 440.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 160.0;
const MARGIN_TOP: f64 = 56.0;
const MARGIN_BOTTOM: f64 = 64.0;

const PLOT_WIDTH: f64 = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
const PLOT_HEIGHT: f64 = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

const BACKGROUND: &str = "#1e293b";
const GRID: &str = "#334155";
const TEXT: &str = "#e2e8f0";
const MUTED: &str = "#94a3b8";

fn series_color(architecture: Architecture) -> &'static str {
    match architecture {
        Architecture::Monolith => "#3498db",
        Architecture::Microservices => "#e74c3c",
    }
}

// ---------------------------------------------------------------------------
// Chart entry points
// ---------------------------------------------------------------------------

/// Mean response time vs user load.
pub fn response_time_chart(bundle: &ReportBundle) -> String {
    metric_line_chart(
        bundle,
        Metric::MeanResponseMs,
        "Average Response Time vs User Load",
        "Response time (ms)",
    )
}

/// Throughput vs user load.
pub fn throughput_chart(bundle: &ReportBundle) -> String {
    metric_line_chart(
        bundle,
        Metric::RequestsPerSecond,
        "Throughput vs User Load",
        "Requests per second",
    )
}

// ---------------------------------------------------------------------------
// Line chart rendering
// ---------------------------------------------------------------------------

struct Series {
    name: &'static str,
    color: &'static str,
    /// (user load, metric value) pairs, in ascending user-load order.
    points: Vec<(f64, f64)>,
}

fn collect_series(bundle: &ReportBundle, metric: Metric) -> Vec<Series> {
    Architecture::ALL
        .iter()
        .map(|&architecture| {
            let points = bundle
                .metrics
                .records(architecture)
                .filter_map(|(scenario, record)| {
                    scenario
                        .user_load()
                        .map(|load| (f64::from(load), metric.value(record)))
                })
                .collect();
            Series {
                name: architecture.display_name(),
                color: series_color(architecture),
                points,
            }
        })
        .collect()
}

/// Render one metric as a standalone SVG line chart.
pub fn metric_line_chart(
    bundle: &ReportBundle,
    metric: Metric,
    title: &str,
    y_label: &str,
) -> String {
    let series = collect_series(bundle, metric);

    let mut loads: Vec<f64> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|&(load, _)| load))
        .collect();
    loads.sort_by(|a, b| a.total_cmp(b));
    loads.dedup();

    let max_value = series
        .iter()
        .flat_map(|s| s.points.iter().map(|&(_, value)| value))
        .fold(0.0_f64, f64::max);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" \
         viewBox=\"0 0 {WIDTH} {HEIGHT}\" font-family=\"sans-serif\">\n"
    ));
    svg.push_str(&format!(
        "  <rect width=\"{WIDTH}\" height=\"{HEIGHT}\" fill=\"{BACKGROUND}\"/>\n"
    ));
    svg.push_str(&format!(
        "  <text x=\"{x}\" y=\"28\" fill=\"{TEXT}\" font-size=\"17\" font-weight=\"bold\" \
         text-anchor=\"middle\">{title}</text>\n",
        x = WIDTH / 2.0,
        title = xml_escape(title),
    ));

    if loads.is_empty() {
        svg.push_str(&format!(
            "  <text x=\"{x}\" y=\"{y}\" fill=\"{MUTED}\" font-size=\"14\" \
             text-anchor=\"middle\">No plottable scenario data</text>\n",
            x = WIDTH / 2.0,
            y = HEIGHT / 2.0,
        ));
        svg.push_str("</svg>\n");
        return svg;
    }

    let min_load = loads[0];
    let max_load = loads[loads.len() - 1];
    // Keep a non-degenerate scale even when everything reads zero.
    let y_max = if max_value > 0.0 { max_value * 1.05 } else { 1.0 };

    let x_pos = |load: f64| -> f64 {
        if max_load > min_load {
            MARGIN_LEFT + (load - min_load) / (max_load - min_load) * PLOT_WIDTH
        } else {
            MARGIN_LEFT + PLOT_WIDTH / 2.0
        }
    };
    let y_pos = |value: f64| -> f64 { MARGIN_TOP + PLOT_HEIGHT * (1.0 - value / y_max) };

    // Horizontal gridlines with y-axis tick labels.
    for tick in 0..=4 {
        let value = y_max * f64::from(tick) / 4.0;
        let y = y_pos(value);
        svg.push_str(&format!(
            "  <line x1=\"{x1}\" y1=\"{y:.1}\" x2=\"{x2}\" y2=\"{y:.1}\" stroke=\"{GRID}\" \
             stroke-width=\"1\"/>\n",
            x1 = MARGIN_LEFT,
            x2 = MARGIN_LEFT + PLOT_WIDTH,
        ));
        svg.push_str(&format!(
            "  <text x=\"{x}\" y=\"{y:.1}\" fill=\"{MUTED}\" font-size=\"11\" \
             text-anchor=\"end\" dominant-baseline=\"middle\">{label}</text>\n",
            x = MARGIN_LEFT - 8.0,
            y = y,
            label = format_value(value),
        ));
    }

    // X-axis ticks at each plotted user load.
    let axis_y = MARGIN_TOP + PLOT_HEIGHT;
    for &load in &loads {
        let x = x_pos(load);
        svg.push_str(&format!(
            "  <line x1=\"{x:.1}\" y1=\"{axis_y:.1}\" x2=\"{x:.1}\" y2=\"{y2:.1}\" \
             stroke=\"{GRID}\" stroke-width=\"1\"/>\n",
            y2 = axis_y + 5.0,
        ));
        svg.push_str(&format!(
            "  <text x=\"{x:.1}\" y=\"{y:.1}\" fill=\"{MUTED}\" font-size=\"11\" \
             text-anchor=\"middle\">{label:.0}</text>\n",
            y = axis_y + 20.0,
            label = load,
        ));
    }

    // Axis labels.
    svg.push_str(&format!(
        "  <text x=\"{x}\" y=\"{y}\" fill=\"{TEXT}\" font-size=\"12\" \
         text-anchor=\"middle\">Concurrent users</text>\n",
        x = MARGIN_LEFT + PLOT_WIDTH / 2.0,
        y = HEIGHT - 18.0,
    ));
    svg.push_str(&format!(
        "  <text x=\"20\" y=\"{y}\" fill=\"{TEXT}\" font-size=\"12\" text-anchor=\"middle\" \
         transform=\"rotate(-90 20 {y})\">{label}</text>\n",
        y = MARGIN_TOP + PLOT_HEIGHT / 2.0,
        label = xml_escape(y_label),
    ));

    // One polyline + markers per architecture, plus a legend entry.
    let mut legend_y = MARGIN_TOP + 10.0;
    for s in &series {
        if !s.points.is_empty() {
            let points: Vec<String> = s
                .points
                .iter()
                .map(|&(load, value)| format!("{:.1},{:.1}", x_pos(load), y_pos(value)))
                .collect();
            svg.push_str(&format!(
                "  <polyline points=\"{points}\" fill=\"none\" stroke=\"{color}\" \
                 stroke-width=\"2.5\"/>\n",
                points = points.join(" "),
                color = s.color,
            ));
            for &(load, value) in &s.points {
                svg.push_str(&format!(
                    "  <circle cx=\"{cx:.1}\" cy=\"{cy:.1}\" r=\"4\" fill=\"{color}\"/>\n",
                    cx = x_pos(load),
                    cy = y_pos(value),
                    color = s.color,
                ));
            }
        }

        let legend_x = MARGIN_LEFT + PLOT_WIDTH + 16.0;
        svg.push_str(&format!(
            "  <rect x=\"{legend_x:.1}\" y=\"{y:.1}\" width=\"12\" height=\"12\" \
             fill=\"{color}\"/>\n",
            y = legend_y,
            color = s.color,
        ));
        svg.push_str(&format!(
            "  <text x=\"{x:.1}\" y=\"{y:.1}\" fill=\"{TEXT}\" font-size=\"12\">{name}</text>\n",
            x = legend_x + 18.0,
            y = legend_y + 10.0,
            name = s.name,
        ));
        legend_y += 22.0;
    }

    svg.push_str("</svg>\n");
    svg
}

fn format_value(value: f64) -> String {
    if value >= 100.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
