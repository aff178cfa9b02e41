pub mod charts;
pub mod console;
pub mod html;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::compare::ArchitectureComparison;
use crate::error::LoadcmpError;
use crate::metrics::MetricSet;

// ---------------------------------------------------------------------------
// ReportBundle
// ---------------------------------------------------------------------------

/// Everything the renderers consume for one report, plus report identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportBundle {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Records for every populated coordinate. The charts plot each
    /// architecture's own scenarios, not just the compared intersection.
    pub metrics: MetricSet,
    pub comparison: ArchitectureComparison,
}

impl ReportBundle {
    pub fn new(metrics: MetricSet, comparison: ArchitectureComparison) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            metrics,
            comparison,
        }
    }
}

// ---------------------------------------------------------------------------
// Artifact writing
// ---------------------------------------------------------------------------

/// Paths of the artifacts one report run wrote to disk.
#[derive(Debug, Clone)]
pub struct ReportArtifacts {
    pub html: PathBuf,
    pub json: PathBuf,
    pub response_time_chart: PathBuf,
    pub throughput_chart: PathBuf,
}

impl ReportArtifacts {
    /// All artifact paths, for listing to the user.
    pub fn paths(&self) -> [&Path; 4] {
        [
            &self.html,
            &self.json,
            &self.response_time_chart,
            &self.throughput_chart,
        ]
    }
}

/// Serialize the bundle as pretty-printed JSON.
pub fn export_json(bundle: &ReportBundle) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(bundle)
}

/// Render and write every report artifact into `out_dir`.
///
/// The directory is created if missing. Artifacts are rendered up front,
/// then written one after another.
pub async fn write_report_files(
    bundle: &ReportBundle,
    out_dir: impl AsRef<Path>,
) -> Result<ReportArtifacts, LoadcmpError> {
    let out_dir = out_dir.as_ref();
    tokio::fs::create_dir_all(out_dir).await?;

    let artifacts = ReportArtifacts {
        html: out_dir.join("comparison-report.html"),
        json: out_dir.join("comparison-report.json"),
        response_time_chart: out_dir.join("graph-response-time.svg"),
        throughput_chart: out_dir.join("graph-throughput.svg"),
    };

    tokio::fs::write(
        &artifacts.response_time_chart,
        charts::response_time_chart(bundle),
    )
    .await?;
    tokio::fs::write(&artifacts.throughput_chart, charts::throughput_chart(bundle)).await?;
    tokio::fs::write(&artifacts.html, html::render_html(bundle)).await?;
    tokio::fs::write(&artifacts.json, export_json(bundle)?).await?;

    Ok(artifacts)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
