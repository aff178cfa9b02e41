use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::warn;

use crate::error::LoadcmpError;
use crate::model::{Architecture, Coordinate, Scenario};

/// Fixed filename prefix of a result artifact.
pub const RESULT_PREFIX: &str = "results-";
/// Fixed filename suffix of a result artifact.
pub const RESULT_SUFFIX: &str = ".json";

// ---------------------------------------------------------------------------
// CoordinateStrategy
// ---------------------------------------------------------------------------

/// Which metadata source a discovery run derives coordinates from.
///
/// The two strategies are alternate readings of the same external contract,
/// selected up front by the caller; a run never mixes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoordinateStrategy {
    /// Parse the coordinate out of the artifact filename.
    #[default]
    Filename,
    /// Read the coordinate from `testConfig` metadata inside the document.
    Document,
}

// ---------------------------------------------------------------------------
// LocatedResult
// ---------------------------------------------------------------------------

/// One discovered result artifact: its coordinate, parsed document, and
/// the path it was read from.
#[derive(Debug, Clone)]
pub struct LocatedResult {
    pub coordinate: Coordinate,
    pub document: Value,
    pub path: PathBuf,
}

// ---------------------------------------------------------------------------
// Coordinate derivation
// ---------------------------------------------------------------------------

/// Split a result filename into raw (architecture, scenario) labels.
///
/// The stem between prefix and suffix is split on the first `-`: the left
/// side is the architecture, everything after it is the scenario label
/// (further dashes stay part of the scenario).
/// `results-monolith-medium_load.json` → (`monolith`, `medium_load`).
pub fn filename_coordinate(file_name: &str) -> Option<(String, String)> {
    let stem = file_name
        .strip_prefix(RESULT_PREFIX)?
        .strip_suffix(RESULT_SUFFIX)?;
    let (architecture, scenario) = stem.split_once('-')?;
    if architecture.is_empty() || scenario.is_empty() {
        return None;
    }
    Some((architecture.to_string(), scenario.to_string()))
}

/// Read raw (architecture, scenario) labels from the document's embedded
/// `testConfig.testName` / `testConfig.scenario` metadata.
pub fn document_coordinate(document: &Value) -> Option<(String, String)> {
    let config = document.get("testConfig")?;
    let architecture = config.get("testName")?.as_str()?;
    let scenario = config.get("scenario")?.as_str()?;
    Some((architecture.to_string(), scenario.to_string()))
}

fn raw_coordinate(
    file_name: &str,
    document: &Value,
    strategy: CoordinateStrategy,
) -> Option<(String, String)> {
    match strategy {
        CoordinateStrategy::Filename => filename_coordinate(file_name),
        CoordinateStrategy::Document => document_coordinate(document),
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Discover and parse every result artifact in `dir`, in sorted path order.
///
/// Artifacts that fail to read or parse, or that lack coordinate metadata,
/// are skipped with a warning and enumeration continues. Artifacts whose
/// architecture label is outside the recognized set are dropped silently.
/// No matching files is not an error here — the empty vector lets callers
/// short-circuit with a user-facing message. Each file is fully read and
/// closed before the next is opened.
pub async fn discover_results(
    dir: impl AsRef<Path>,
    strategy: CoordinateStrategy,
) -> Result<Vec<LocatedResult>, LoadcmpError> {
    let dir = dir.as_ref();

    let mut paths = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let is_file = entry
            .file_type()
            .await
            .map(|ty| ty.is_file())
            .unwrap_or(false);
        if !is_file {
            continue;
        }
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with(RESULT_PREFIX) && name.ends_with(RESULT_SUFFIX) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut located = Vec::new();
    for path in paths {
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable result file");
                continue;
            }
        };
        let document: Value = match serde_json::from_str(&content) {
            Ok(document) => document,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping result file with invalid JSON");
                continue;
            }
        };

        // The filename matched the prefix/suffix filter above, so it is
        // valid UTF-8 here.
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let Some((arch_label, scenario_label)) = raw_coordinate(file_name, &document, strategy)
        else {
            warn!(path = %path.display(), "skipping result file without coordinate metadata");
            continue;
        };

        // Out-of-scope architecture: not part of the comparison, not worth
        // a warning either.
        let Some(architecture) = Architecture::from_label(&arch_label) else {
            continue;
        };

        located.push(LocatedResult {
            coordinate: Coordinate::new(architecture, Scenario::new(scenario_label)),
            document,
            path,
        });
    }

    Ok(located)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
