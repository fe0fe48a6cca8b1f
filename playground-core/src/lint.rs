//! Content lint: authoring problems that do not block a scenario from loading.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::scenario::Scenario;

/// One authoring problem found in a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LintFinding {
    /// The outcome can never be chosen.
    UnknownRequiredComponent { outcome: String, component: String },
    UnknownBuildOrderComponent { component: String },
    RepeatedBuildOrderEntry { component: String },
    UnknownPrincipleComponent { principle: String, component: String },
    /// A larger combination scores lower than one it contains.
    ScoreRegression {
        outcome: String,
        score: u32,
        contained: String,
        contained_score: u32,
    },
    ScoreOutOfRange { outcome: String, score: u32 },
    /// No outcome requires this component.
    UnscoredComponent { component: String },
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintFinding::UnknownRequiredComponent { outcome, component } => write!(
                f,
                "outcome '{}' requires unknown component '{}' and is unreachable",
                outcome, component
            ),
            LintFinding::UnknownBuildOrderComponent { component } => {
                write!(f, "build order lists unknown component '{}'", component)
            }
            LintFinding::RepeatedBuildOrderEntry { component } => {
                write!(f, "build order lists '{}' more than once", component)
            }
            LintFinding::UnknownPrincipleComponent {
                principle,
                component,
            } => write!(
                f,
                "principle '{}' links unknown component '{}'",
                principle, component
            ),
            LintFinding::ScoreRegression {
                outcome,
                score,
                contained,
                contained_score,
            } => write!(
                f,
                "outcome '{}' ({}) scores below '{}' ({}) which it contains",
                outcome, score, contained, contained_score
            ),
            LintFinding::ScoreOutOfRange { outcome, score } => {
                write!(f, "outcome '{}' has score {} above 100", outcome, score)
            }
            LintFinding::UnscoredComponent { component } => {
                write!(f, "component '{}' is not required by any outcome", component)
            }
        }
    }
}

/// Check a scenario for authoring problems.
pub fn lint(scenario: &Scenario) -> Vec<LintFinding> {
    let mut findings = Vec::new();

    for outcome in &scenario.outcomes {
        for component in &outcome.required_components {
            if !scenario.has_component(component) {
                findings.push(LintFinding::UnknownRequiredComponent {
                    outcome: outcome.id.clone(),
                    component: component.clone(),
                });
            }
        }
        if outcome.score > 100 {
            findings.push(LintFinding::ScoreOutOfRange {
                outcome: outcome.id.clone(),
                score: outcome.score,
            });
        }
    }

    let mut seen = HashSet::new();
    for component in &scenario.recommended_build_order {
        if !scenario.has_component(component) {
            findings.push(LintFinding::UnknownBuildOrderComponent {
                component: component.clone(),
            });
        }
        if !seen.insert(component.as_str()) {
            findings.push(LintFinding::RepeatedBuildOrderEntry {
                component: component.clone(),
            });
        }
    }

    for principle in &scenario.principles {
        for component in &principle.components {
            if !scenario.has_component(component) {
                findings.push(LintFinding::UnknownPrincipleComponent {
                    principle: principle.id.clone(),
                    component: component.clone(),
                });
            }
        }
    }

    for outcome in &scenario.outcomes {
        for contained in &scenario.outcomes {
            let strictly_contains = contained.required_components.len()
                < outcome.required_components.len()
                && contained
                    .required_components
                    .is_subset(&outcome.required_components);
            if strictly_contains && outcome.score < contained.score {
                findings.push(LintFinding::ScoreRegression {
                    outcome: outcome.id.clone(),
                    score: outcome.score,
                    contained: contained.id.clone(),
                    contained_score: contained.score,
                });
            }
        }
    }

    for component in &scenario.components {
        let required = scenario
            .outcomes
            .iter()
            .any(|o| o.required_components.contains(&component.id));
        if !required {
            findings.push(LintFinding::UnscoredComponent {
                component: component.id.clone(),
            });
        }
    }

    findings
}

/// Emit each finding as a warning under the scenario's id.
pub fn log_findings(scenario: &Scenario, findings: &[LintFinding]) {
    for finding in findings {
        warn!(target: "playground.lint", scenario = %scenario.id, "{}", finding);
    }
}
