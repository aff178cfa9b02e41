use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Architecture
// ---------------------------------------------------------------------------

/// Which system variant a result belongs to.
///
/// The set is closed: result files labelled with anything else are outside
/// the comparison's scope and are dropped during discovery.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    Monolith,
    Microservices,
}

impl Architecture {
    pub const ALL: [Architecture; 2] = [Architecture::Monolith, Architecture::Microservices];

    /// Parse a recognized architecture label. Anything else yields `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "monolith" => Some(Architecture::Monolith),
            "microservices" => Some(Architecture::Microservices),
            _ => None,
        }
    }

    /// The label used in filenames and embedded metadata.
    pub fn label(&self) -> &'static str {
        match self {
            Architecture::Monolith => "monolith",
            Architecture::Microservices => "microservices",
        }
    }

    /// Human-facing name for report headings.
    pub fn display_name(&self) -> &'static str {
        match self {
            Architecture::Monolith => "Monolith",
            Architecture::Microservices => "Microservices",
        }
    }

    /// The other architecture of the pair.
    pub fn counterpart(&self) -> Architecture {
        match self {
            Architecture::Monolith => Architecture::Microservices,
            Architecture::Microservices => Architecture::Monolith,
        }
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

/// A named load profile, e.g. `medium_load`.
///
/// Labels are open: any string parsed from a result file is a valid
/// scenario. The three standard labels carry an implied concurrent-user
/// count — a convention of the benchmark suite, not derived from the data —
/// used for chart axis ordering. Unknown labels sort after the standard
/// ones, alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scenario(String);

impl Scenario {
    pub fn new(label: impl Into<String>) -> Self {
        Scenario(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    /// Implied concurrent-user count for the standard scenario labels.
    pub fn user_load(&self) -> Option<u32> {
        match self.0.as_str() {
            "light_load" => Some(5),
            "medium_load" => Some(20),
            "heavy_load" => Some(50),
            _ => None,
        }
    }

    /// Human-facing name, e.g. `Medium Load (20 users)`.
    pub fn display_name(&self) -> String {
        let title = title_case(&self.0);
        match self.user_load() {
            Some(users) => format!("{title} ({users} users)"),
            None => title,
        }
    }

    fn sort_key(&self) -> (u8, u32, &str) {
        match self.user_load() {
            Some(users) => (0, users, self.0.as_str()),
            None => (1, 0, self.0.as_str()),
        }
    }
}

impl Ord for Scenario {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Scenario {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn title_case(label: &str) -> String {
    label
        .split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Coordinate
// ---------------------------------------------------------------------------

/// The (architecture, scenario) pair a result document belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Coordinate {
    pub architecture: Architecture,
    pub scenario: Scenario,
}

impl Coordinate {
    pub fn new(architecture: Architecture, scenario: Scenario) -> Self {
        Self {
            architecture,
            scenario,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.architecture, self.scenario)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Architecture
    // -----------------------------------------------------------------------

    #[test]
    fn from_label_recognizes_both_architectures() {
        assert_eq!(
            Architecture::from_label("monolith"),
            Some(Architecture::Monolith)
        );
        assert_eq!(
            Architecture::from_label("microservices"),
            Some(Architecture::Microservices)
        );
    }

    #[test]
    fn from_label_rejects_unknown_labels() {
        assert_eq!(Architecture::from_label("serverless"), None);
        assert_eq!(Architecture::from_label("Monolith"), None);
        assert_eq!(Architecture::from_label(""), None);
    }

    #[test]
    fn architecture_label_round_trips() {
        for arch in Architecture::ALL {
            assert_eq!(Architecture::from_label(arch.label()), Some(arch));
        }
    }

    #[test]
    fn counterpart_is_the_other_variant() {
        assert_eq!(
            Architecture::Monolith.counterpart(),
            Architecture::Microservices
        );
        assert_eq!(
            Architecture::Microservices.counterpart(),
            Architecture::Monolith
        );
    }

    #[test]
    fn architecture_serializes_as_label() {
        let json = serde_json::to_string(&Architecture::Monolith).expect("serialize");
        assert_eq!(json, "\"monolith\"");
    }

    // -----------------------------------------------------------------------
    // Scenario
    // -----------------------------------------------------------------------

    #[test]
    fn standard_scenarios_carry_user_loads() {
        assert_eq!(Scenario::new("light_load").user_load(), Some(5));
        assert_eq!(Scenario::new("medium_load").user_load(), Some(20));
        assert_eq!(Scenario::new("heavy_load").user_load(), Some(50));
    }

    #[test]
    fn unknown_scenario_has_no_user_load() {
        assert_eq!(Scenario::new("heavy-load-extra").user_load(), None);
    }

    #[test]
    fn standard_scenarios_order_by_ascending_user_load() {
        let mut scenarios = vec![
            Scenario::new("heavy_load"),
            Scenario::new("light_load"),
            Scenario::new("medium_load"),
        ];
        scenarios.sort();
        let labels: Vec<&str> = scenarios.iter().map(Scenario::label).collect();
        assert_eq!(labels, vec!["light_load", "medium_load", "heavy_load"]);
    }

    #[test]
    fn unknown_scenarios_sort_after_standard_ones_alphabetically() {
        let mut scenarios = vec![
            Scenario::new("spike"),
            Scenario::new("heavy_load"),
            Scenario::new("endurance"),
        ];
        scenarios.sort();
        let labels: Vec<&str> = scenarios.iter().map(Scenario::label).collect();
        assert_eq!(labels, vec!["heavy_load", "endurance", "spike"]);
    }

    #[test]
    fn display_name_includes_user_load_for_standard_labels() {
        assert_eq!(
            Scenario::new("medium_load").display_name(),
            "Medium Load (20 users)"
        );
    }

    #[test]
    fn display_name_title_cases_unknown_labels() {
        assert_eq!(
            Scenario::new("heavy-load-extra").display_name(),
            "Heavy Load Extra"
        );
    }

    #[test]
    fn scenario_serializes_as_bare_string() {
        let json = serde_json::to_string(&Scenario::new("light_load")).expect("serialize");
        assert_eq!(json, "\"light_load\"");
    }

    // -----------------------------------------------------------------------
    // Coordinate
    // -----------------------------------------------------------------------

    #[test]
    fn coordinate_display_joins_both_labels() {
        let coord = Coordinate::new(Architecture::Monolith, Scenario::new("medium_load"));
        assert_eq!(coord.to_string(), "monolith/medium_load");
    }
}
