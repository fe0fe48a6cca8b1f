//! The immutable table of scenarios a session can load.

use tracing::info;

use crate::error::{PlaygroundError, Result};
use crate::scenario::Scenario;

/// Something that can author a scenario.
///
/// Each built-in scenario crate implements this, the same way a content
/// plug-in would.
pub trait ScenarioSource: Send + Sync {
    /// Stable id of the scenario this source builds.
    fn id(&self) -> &'static str;

    /// Build the scenario definition.
    fn build(&self) -> Scenario;
}

/// Scenarios in declaration order, built once and only read afterwards.
///
/// Content is not validated here; defects surface when a session loads the
/// scenario so one broken exercise never takes the rest down with it.
#[derive(Debug, Clone, Default)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
}

impl ScenarioCatalog {
    pub fn new(scenarios: Vec<Scenario>) -> Result<Self> {
        let mut catalog = Self::default();
        for scenario in scenarios {
            if catalog.get(&scenario.id).is_some() {
                return Err(PlaygroundError::DuplicateScenarioId(scenario.id));
            }
            catalog.scenarios.push(scenario);
        }
        info!(target: "playground.catalog", scenarios = catalog.len(), "catalog built");
        Ok(catalog)
    }

    /// Build every source, checking each one produced the id it declares.
    pub fn from_sources(sources: &[&dyn ScenarioSource]) -> Result<Self> {
        let scenarios = sources
            .iter()
            .map(|source| {
                let scenario = source.build();
                if scenario.id != source.id() {
                    return Err(PlaygroundError::SourceIdMismatch {
                        declared: source.id().to_string(),
                        built: scenario.id,
                    });
                }
                Ok(scenario)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(scenarios)
    }

    /// Parse a JSON array of scenario definitions.
    pub fn from_json(json: &str) -> Result<Self> {
        let scenarios: Vec<Scenario> = serde_json::from_str(json)?;
        Self::new(scenarios)
    }

    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.scenarios.iter().map(|s| s.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::tests::eval_scenario;

    struct EvalSource;

    impl ScenarioSource for EvalSource {
        fn id(&self) -> &'static str {
            "evals"
        }

        fn build(&self) -> Scenario {
            eval_scenario()
        }
    }

    #[test]
    fn builds_from_sources_in_order() {
        let mut other = eval_scenario();
        other.id = "other".to_string();
        let catalog = ScenarioCatalog::new(vec![eval_scenario(), other]).unwrap();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["evals", "other"]);

        let from_source = ScenarioCatalog::from_sources(&[&EvalSource]).unwrap();
        assert_eq!(from_source.get("evals"), Some(&eval_scenario()));
    }

    struct MislabelledSource;

    impl ScenarioSource for MislabelledSource {
        fn id(&self) -> &'static str {
            "judges"
        }

        fn build(&self) -> Scenario {
            eval_scenario()
        }
    }

    #[test]
    fn source_must_build_the_id_it_declares() {
        let err = ScenarioCatalog::from_sources(&[&EvalSource, &MislabelledSource]).unwrap_err();
        assert!(matches!(
            err,
            PlaygroundError::SourceIdMismatch { ref declared, ref built }
                if declared == "judges" && built == "evals"
        ));
    }

    #[test]
    fn duplicate_scenario_ids_are_rejected() {
        let err = ScenarioCatalog::from_sources(&[&EvalSource, &EvalSource]).unwrap_err();
        assert!(matches!(err, PlaygroundError::DuplicateScenarioId(id) if id == "evals"));
    }

    #[test]
    fn parses_json_catalog() {
        let json = serde_json::to_string(&vec![eval_scenario()]).unwrap();
        let catalog = ScenarioCatalog::from_json(&json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("evals").unwrap().outcomes.len(), 5);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = ScenarioCatalog::from_json("[{ \"id\": 3 }]").unwrap_err();
        assert!(matches!(err, PlaygroundError::Parse(_)));
    }

    #[test]
    fn unknown_id_is_absent() {
        let catalog = ScenarioCatalog::from_sources(&[&EvalSource]).unwrap();
        assert!(catalog.get("missing").is_none());
    }
}
