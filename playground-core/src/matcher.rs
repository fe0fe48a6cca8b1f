//! Outcome matching: resolve any selection to exactly one authored outcome.
//!
//! Resolution runs in two passes. An outcome whose required set equals the
//! selection always wins, so every authored combination (including narrow
//! "detour" outcomes) is reachable verbatim. Otherwise the largest required
//! set contained in the selection wins, with ties broken by:
//!
//! 1. overlap with the recommended build order prefix of length `|selection|`
//! 2. higher declared score
//! 3. earlier declared position

use std::cmp::Reverse;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ContentDefect, Result};
use crate::scenario::{Outcome, Scenario};
use crate::selection::Selection;

/// How the matcher arrived at its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The selection is exactly an authored combination.
    Exact,
    /// The selection contains an authored combination plus extras.
    Subset,
    /// Nothing beyond the empty-selection outcome applies.
    Baseline,
}

/// The resolved outcome for a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub outcome: &'a Outcome,
    pub kind: MatchKind,
}

/// Pick the outcome that best represents `selection`.
///
/// Outcomes that reference components missing from the scenario registry are
/// never chosen. Fails only when the scenario has no baseline outcome.
pub fn match_outcome<'a>(selection: &Selection, scenario: &'a Scenario) -> Result<Match<'a>> {
    let baseline = scenario
        .baseline()
        .ok_or_else(|| ContentDefect::NoBaselineOutcome {
            scenario: scenario.id.clone(),
        })?;

    if let Some((_, outcome)) =
        candidates(scenario).find(|(_, outcome)| &outcome.required_components == selection.as_set())
    {
        let kind = if outcome.is_baseline() {
            MatchKind::Baseline
        } else {
            MatchKind::Exact
        };
        debug!(target: "playground.matcher", scenario = %scenario.id, outcome = %outcome.id, ?kind, "exact match");
        return Ok(Match { outcome, kind });
    }

    let prefix: HashSet<&str> = scenario
        .recommended_build_order
        .iter()
        .take(selection.len())
        .map(String::as_str)
        .collect();

    let best = candidates(scenario)
        .filter(|(_, outcome)| outcome.required_components.is_subset(selection.as_set()))
        .max_by_key(|(index, outcome)| {
            let overlap = outcome
                .required_components
                .iter()
                .filter(|id| prefix.contains(id.as_str()))
                .count();
            (
                outcome.required_components.len(),
                overlap,
                outcome.score,
                Reverse(*index),
            )
        })
        .map(|(_, outcome)| outcome);

    let resolved = match best {
        Some(outcome) if !outcome.is_baseline() => Match {
            outcome,
            kind: MatchKind::Subset,
        },
        _ => Match {
            outcome: baseline,
            kind: MatchKind::Baseline,
        },
    };

    debug!(
        target: "playground.matcher",
        scenario = %scenario.id,
        outcome = %resolved.outcome.id,
        kind = ?resolved.kind,
        selected = selection.len(),
        "fallback match"
    );
    Ok(resolved)
}

/// Outcomes the matcher may choose, with their declared positions.
fn candidates(scenario: &Scenario) -> impl Iterator<Item = (usize, &Outcome)> {
    scenario
        .outcomes
        .iter()
        .enumerate()
        .filter(move |(_, outcome)| scenario.is_satisfiable(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlaygroundError;
    use crate::scenario::tests::eval_scenario;
    use crate::scenario::Component;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn select(ids: &[&str]) -> Selection {
        ids.iter().copied().collect()
    }

    fn matched_id(ids: &[&str], scenario: &Scenario) -> String {
        match_outcome(&select(ids), scenario)
            .unwrap()
            .outcome
            .id
            .clone()
    }

    fn random_selection(rng: &mut StdRng, scenario: &Scenario) -> Selection {
        scenario
            .components
            .iter()
            .filter(|_| rng.gen_bool(0.5))
            .map(|c| c.id.as_str())
            .collect()
    }

    /// Components a..e, build order a..e, outcomes authored per test.
    fn letters_scenario(outcomes: Vec<Outcome>) -> Scenario {
        let ids = ["a", "b", "c", "d", "e"];
        Scenario {
            id: "letters".to_string(),
            title: "Letters".to_string(),
            description: String::new(),
            capacity_tokens: 100,
            components: ids.iter().map(|id| Component::new(id, 10)).collect(),
            outcomes,
            principles: vec![],
            recommended_build_order: ids.iter().map(|id| id.to_string()).collect(),
        }
    }

    #[test]
    fn empty_selection_resolves_to_baseline() {
        let scenario = eval_scenario();
        let resolved = match_outcome(&Selection::new(), &scenario).unwrap();
        assert_eq!(resolved.outcome.score, 5);
        assert_eq!(resolved.kind, MatchKind::Baseline);
    }

    #[test]
    fn staircase_step_matches_exactly() {
        let scenario = eval_scenario();
        let resolved = match_outcome(&select(&["golden-dataset"]), &scenario).unwrap();
        assert_eq!(resolved.outcome.score, 20);
        assert_eq!(resolved.kind, MatchKind::Exact);
    }

    #[test]
    fn detour_is_not_confused_with_staircase() {
        let scenario = eval_scenario();
        assert_eq!(matched_id(&["llm-judge"], &scenario), "judge-only");
    }

    #[test]
    fn superset_falls_back_to_largest_satisfied_subset() {
        let scenario = eval_scenario();
        let resolved = match_outcome(
            &select(&["golden-dataset", "assertion-tests", "llm-judge", "human-review"]),
            &scenario,
        )
        .unwrap();
        assert_eq!(resolved.outcome.id, "full-suite");
        assert_eq!(resolved.kind, MatchKind::Subset);
    }

    #[test]
    fn lone_component_without_outcome_resolves_to_baseline() {
        let scenario = eval_scenario();
        let resolved = match_outcome(&select(&["assertion-tests"]), &scenario).unwrap();
        assert_eq!(resolved.outcome.score, 5);
        assert_eq!(resolved.kind, MatchKind::Baseline);
    }

    #[test]
    fn every_authored_combination_is_reachable_verbatim() {
        let scenario = eval_scenario();
        for outcome in &scenario.outcomes {
            let selection: Selection = outcome.required_components.iter().collect();
            assert_eq!(match_outcome(&selection, &scenario).unwrap().outcome, outcome);
        }
    }

    #[test]
    fn missing_baseline_is_reported_not_panicked() {
        let mut scenario = eval_scenario();
        scenario.outcomes.clear();
        let err = match_outcome(&Selection::new(), &scenario).unwrap_err();
        assert!(matches!(
            err,
            PlaygroundError::Content(ContentDefect::NoBaselineOutcome { .. })
        ));
    }

    #[test]
    fn outcome_with_unknown_component_is_never_chosen() {
        let mut scenario = eval_scenario();
        scenario
            .outcomes
            .push(Outcome::new("ghost", &["golden-dataset", "red-team"], 99));
        assert_eq!(
            matched_id(&["golden-dataset", "red-team"], &scenario),
            "golden-only"
        );
    }

    #[test]
    fn tie_prefers_build_order_alignment() {
        let scenario = letters_scenario(vec![
            Outcome::new("none", &[], 0),
            Outcome::new("c-e", &["c", "e"], 90),
            Outcome::new("a-c", &["a", "c"], 10),
        ]);
        // prefix of length 3 is {a, b, c}: a-c overlaps twice, c-e once
        assert_eq!(matched_id(&["a", "c", "e"], &scenario), "a-c");
    }

    #[test]
    fn tie_then_prefers_higher_score() {
        let scenario = letters_scenario(vec![
            Outcome::new("none", &[], 0),
            Outcome::new("c-e", &["c", "e"], 30),
            Outcome::new("a-e", &["a", "e"], 50),
        ]);
        assert_eq!(matched_id(&["a", "c", "e"], &scenario), "a-e");
    }

    #[test]
    fn tie_finally_prefers_declaration_order() {
        let scenario = letters_scenario(vec![
            Outcome::new("none", &[], 0),
            Outcome::new("c-e", &["c", "e"], 30),
            Outcome::new("a-e", &["a", "e"], 30),
        ]);
        assert_eq!(matched_id(&["a", "c", "e"], &scenario), "c-e");
    }

    #[test]
    fn repeated_matching_is_deterministic() {
        let scenario = eval_scenario();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            let selection = random_selection(&mut rng, &scenario);
            let first = match_outcome(&selection, &scenario).unwrap();
            let second = match_outcome(&selection, &scenario).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn adding_components_never_loses_matched_ground() {
        let scenario = eval_scenario();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..64 {
            let selection = random_selection(&mut rng, &scenario);
            let before = match_outcome(&selection, &scenario)
                .unwrap()
                .outcome
                .required_components
                .len();

            for extra in &scenario.components {
                if selection.contains(&extra.id) {
                    continue;
                }
                let mut grown = selection.clone();
                grown.insert(&extra.id);
                let after = match_outcome(&grown, &scenario)
                    .unwrap()
                    .outcome
                    .required_components
                    .len();
                assert!(after >= before, "{:?} + {} lost ground", selection, extra.id);
            }

            let mut with_unknown = selection.clone();
            with_unknown.insert("not-in-scenario");
            let after = match_outcome(&with_unknown, &scenario)
                .unwrap()
                .outcome
                .required_components
                .len();
            assert!(after >= before);
        }
    }
}
