//! Scenario definitions: components, outcomes and principles.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ContentDefect;

/// A selectable unit of context or capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Identifier, unique within the owning scenario.
    pub id: String,
    /// Tokens charged against the scenario budget while selected.
    pub token_cost: u32,
    #[serde(default)]
    pub description: String,
    /// Display payload shown when the component is selected.
    #[serde(default)]
    pub content: String,
}

impl Component {
    pub fn new(id: &str, token_cost: u32) -> Self {
        Self {
            id: id.to_string(),
            token_cost,
            description: String::new(),
            content: String::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_content(mut self, content: &str) -> Self {
        self.content = content.to_string();
        self
    }
}

/// A pre-authored result tied to an exact combination of components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub id: String,
    /// The exact combination this outcome represents. Empty for the baseline.
    #[serde(default)]
    pub required_components: BTreeSet<String>,
    /// Quality score, 0-100 by convention.
    pub score: u32,
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
}

impl Outcome {
    pub fn new(id: &str, required: &[&str], score: u32) -> Self {
        Self {
            id: id.to_string(),
            required_components: required.iter().map(|c| c.to_string()).collect(),
            score,
            narrative: String::new(),
            issues: Vec::new(),
            strengths: Vec::new(),
        }
    }

    pub fn with_narrative(mut self, narrative: &str) -> Self {
        self.narrative = narrative.to_string();
        self
    }

    pub fn with_issue(mut self, issue: &str) -> Self {
        self.issues.push(issue.to_string());
        self
    }

    pub fn with_strength(mut self, strength: &str) -> Self {
        self.strengths.push(strength.to_string());
        self
    }

    /// True when this is the outcome for the empty selection.
    pub fn is_baseline(&self) -> bool {
        self.required_components.is_empty()
    }
}

/// A cross-cutting design lesson linked to one or more components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principle {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Components whose selection activates this principle.
    pub components: Vec<String>,
}

impl Principle {
    pub fn new(id: &str, title: &str, components: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            components: components.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }
}

/// One interactive exercise. Owns everything its ids refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Token ceiling, modelling a context window limit.
    pub capacity_tokens: u32,
    pub components: Vec<Component>,
    /// Declared order matters: it is the last tie-breaker when matching.
    pub outcomes: Vec<Outcome>,
    #[serde(default)]
    pub principles: Vec<Principle>,
    /// The intended learning path, one component id per step.
    #[serde(default)]
    pub recommended_build_order: Vec<String>,
}

impl Scenario {
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn has_component(&self, id: &str) -> bool {
        self.component(id).is_some()
    }

    pub fn outcome(&self, id: &str) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| o.id == id)
    }

    /// The first outcome with an empty required set.
    pub fn baseline(&self) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| o.is_baseline())
    }

    /// Every id in `outcome.required_components` exists in the registry.
    pub fn is_satisfiable(&self, outcome: &Outcome) -> bool {
        outcome
            .required_components
            .iter()
            .all(|id| self.has_component(id))
    }

    /// Check the structural invariants the matcher relies on.
    pub fn validate(&self) -> Result<(), ContentDefect> {
        let mut component_ids = HashSet::new();
        for component in &self.components {
            if !component_ids.insert(component.id.as_str()) {
                return Err(ContentDefect::DuplicateComponentId {
                    scenario: self.id.clone(),
                    component: component.id.clone(),
                });
            }
        }

        let mut outcome_ids = HashSet::new();
        let mut required_sets: HashMap<&BTreeSet<String>, &str> = HashMap::new();
        for outcome in &self.outcomes {
            if !outcome_ids.insert(outcome.id.as_str()) {
                return Err(ContentDefect::DuplicateOutcomeId {
                    scenario: self.id.clone(),
                    outcome: outcome.id.clone(),
                });
            }
            if let Some(first) = required_sets.insert(&outcome.required_components, &outcome.id) {
                return Err(ContentDefect::DuplicateRequiredSet {
                    scenario: self.id.clone(),
                    first: first.to_string(),
                    second: outcome.id.clone(),
                });
            }
        }

        if self.baseline().is_none() {
            return Err(ContentDefect::NoBaselineOutcome {
                scenario: self.id.clone(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Small eval-suite scenario shared by the engine's unit tests.
    pub(crate) fn eval_scenario() -> Scenario {
        Scenario {
            id: "evals".to_string(),
            title: "Eval Suite".to_string(),
            description: String::new(),
            capacity_tokens: 1_000,
            components: vec![
                Component::new("golden-dataset", 400),
                Component::new("assertion-tests", 300),
                Component::new("llm-judge", 350),
                Component::new("human-review", 200),
            ],
            outcomes: vec![
                Outcome::new("none", &[], 5),
                Outcome::new("golden-only", &["golden-dataset"], 20),
                Outcome::new("golden-assertions", &["golden-dataset", "assertion-tests"], 40),
                Outcome::new(
                    "full-suite",
                    &["golden-dataset", "assertion-tests", "llm-judge"],
                    75,
                ),
                Outcome::new("judge-only", &["llm-judge"], 15),
            ],
            principles: vec![
                Principle::new("ground-truth", "Start from ground truth", &["golden-dataset"]),
                Principle::new(
                    "layered-checks",
                    "Layer cheap checks under expensive ones",
                    &["assertion-tests", "llm-judge"],
                ),
            ],
            recommended_build_order: vec![
                "golden-dataset".to_string(),
                "assertion-tests".to_string(),
                "llm-judge".to_string(),
                "human-review".to_string(),
            ],
        }
    }

    #[test]
    fn valid_scenario_passes_validation() {
        assert_eq!(eval_scenario().validate(), Ok(()));
    }

    #[test]
    fn missing_baseline_is_rejected() {
        let mut scenario = eval_scenario();
        scenario.outcomes.retain(|o| !o.is_baseline());
        assert_eq!(
            scenario.validate(),
            Err(ContentDefect::NoBaselineOutcome {
                scenario: "evals".to_string()
            })
        );
    }

    #[test]
    fn empty_outcome_list_has_no_baseline() {
        let mut scenario = eval_scenario();
        scenario.outcomes.clear();
        assert!(matches!(
            scenario.validate(),
            Err(ContentDefect::NoBaselineOutcome { .. })
        ));
    }

    #[test]
    fn duplicate_required_sets_are_rejected_regardless_of_order() {
        let mut scenario = eval_scenario();
        scenario.outcomes.push(Outcome::new(
            "same-as-golden-assertions",
            &["assertion-tests", "golden-dataset"],
            50,
        ));
        assert_eq!(
            scenario.validate(),
            Err(ContentDefect::DuplicateRequiredSet {
                scenario: "evals".to_string(),
                first: "golden-assertions".to_string(),
                second: "same-as-golden-assertions".to_string(),
            })
        );
    }

    #[test]
    fn second_baseline_is_a_duplicate_required_set() {
        let mut scenario = eval_scenario();
        scenario.outcomes.push(Outcome::new("also-none", &[], 0));
        assert!(matches!(
            scenario.validate(),
            Err(ContentDefect::DuplicateRequiredSet { .. })
        ));
    }

    #[test]
    fn duplicate_component_and_outcome_ids_are_rejected() {
        let mut scenario = eval_scenario();
        scenario.components.push(Component::new("llm-judge", 10));
        assert!(matches!(
            scenario.validate(),
            Err(ContentDefect::DuplicateComponentId { .. })
        ));

        let mut scenario = eval_scenario();
        scenario
            .outcomes
            .push(Outcome::new("judge-only", &["human-review"], 10));
        assert!(matches!(
            scenario.validate(),
            Err(ContentDefect::DuplicateOutcomeId { .. })
        ));
    }

    #[test]
    fn outcome_with_unknown_component_is_unsatisfiable() {
        let scenario = eval_scenario();
        let ghost = Outcome::new("ghost", &["golden-dataset", "red-team"], 90);
        assert!(!scenario.is_satisfiable(&ghost));
        assert!(scenario.is_satisfiable(&scenario.outcomes[2]));
    }

    #[test]
    fn scenario_deserializes_with_defaults() {
        let json = r#"{
            "id": "tiny",
            "title": "Tiny",
            "capacity_tokens": 10,
            "components": [{ "id": "a", "token_cost": 3 }],
            "outcomes": [
                { "id": "none", "score": 0 },
                { "id": "a", "required_components": ["a"], "score": 50 }
            ]
        }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert!(scenario.principles.is_empty());
        assert!(scenario.outcomes[0].is_baseline());
        assert_eq!(scenario.validate(), Ok(()));
    }
}
