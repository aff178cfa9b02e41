use std::collections::BTreeMap;

use serde_json::Value;

use crate::locate::LocatedResult;
use crate::model::{Architecture, Coordinate, Scenario};

// ---------------------------------------------------------------------------
// ResultStore
// ---------------------------------------------------------------------------

/// Raw result documents keyed by architecture, then scenario.
///
/// Populated once during the load phase and read-only afterward; the store
/// is threaded by reference through the rest of the pipeline. A coordinate
/// with no corresponding artifact is simply absent — never an error.
#[derive(Debug, Clone, Default)]
pub struct ResultStore {
    documents: BTreeMap<Architecture, BTreeMap<Scenario, Value>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from discovery output. If two artifacts map to the
    /// same coordinate, the later one (in discovery order) wins.
    pub fn from_located(results: Vec<LocatedResult>) -> Self {
        let mut store = Self::new();
        for result in results {
            store.insert(result.coordinate, result.document);
        }
        store
    }

    pub fn insert(&mut self, coordinate: Coordinate, document: Value) {
        self.documents
            .entry(coordinate.architecture)
            .or_default()
            .insert(coordinate.scenario, document);
    }

    pub fn get(&self, architecture: Architecture, scenario: &Scenario) -> Option<&Value> {
        self.documents.get(&architecture)?.get(scenario)
    }

    /// Architectures with at least one document.
    pub fn architectures(&self) -> Vec<Architecture> {
        self.documents.keys().copied().collect()
    }

    /// Scenarios populated for one architecture, in ordinal order.
    pub fn scenarios(&self, architecture: Architecture) -> Vec<&Scenario> {
        self.documents
            .get(&architecture)
            .map(|by_scenario| by_scenario.keys().collect())
            .unwrap_or_default()
    }

    /// All (scenario, document) pairs for one architecture, in ordinal order.
    pub fn documents(
        &self,
        architecture: Architecture,
    ) -> impl Iterator<Item = (&Scenario, &Value)> {
        self.documents
            .get(&architecture)
            .into_iter()
            .flat_map(|by_scenario| by_scenario.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.documents.values().all(|by_scenario| by_scenario.is_empty())
    }

    /// Total number of stored documents across all coordinates.
    pub fn len(&self) -> usize {
        self.documents.values().map(|by_scenario| by_scenario.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
