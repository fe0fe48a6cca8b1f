//! Shape a resolved outcome into what the presentation layer displays.

use serde::{Deserialize, Serialize};

use crate::matcher::{Match, MatchKind};
use crate::scenario::Scenario;
use crate::selection::Selection;

/// Display contract for the active outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub outcome_id: String,
    pub match_kind: MatchKind,
    pub score: u32,
    pub rating: String,
    pub narrative: String,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
}

/// Outcome feedback plus the principles the selection touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub outcome: Feedback,
    pub activated_principles: Vec<ActivatedPrinciple>,
}

/// A principle touched by the user's selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivatedPrinciple {
    pub id: String,
    pub title: String,
    /// The selected components that activated it, in declaration order.
    pub via: Vec<String>,
}

/// Label for a 0-100 outcome score.
pub fn rating(score: u32) -> &'static str {
    match score {
        90.. => "Production Ready",
        70..=89 => "Solid",
        40..=69 => "Developing",
        15..=39 => "Fragile",
        _ => "Missing Foundations",
    }
}

/// Principles whose linked components intersect the selection.
///
/// Uses what the user chose, not what the outcome required, so partial or
/// off-path selections still surface the lessons they touch.
pub fn activated_principles(scenario: &Scenario, selection: &Selection) -> Vec<ActivatedPrinciple> {
    scenario
        .principles
        .iter()
        .filter_map(|principle| {
            let via: Vec<String> = principle
                .components
                .iter()
                .filter(|id| selection.contains(id))
                .cloned()
                .collect();
            if via.is_empty() {
                None
            } else {
                Some(ActivatedPrinciple {
                    id: principle.id.clone(),
                    title: principle.title.clone(),
                    via,
                })
            }
        })
        .collect()
}

/// Build the presentation for a resolved match.
pub fn present(resolved: Match<'_>, scenario: &Scenario, selection: &Selection) -> Presentation {
    let outcome = resolved.outcome;
    Presentation {
        outcome: Feedback {
            outcome_id: outcome.id.clone(),
            match_kind: resolved.kind,
            score: outcome.score,
            rating: rating(outcome.score).to_string(),
            narrative: outcome.narrative.clone(),
            issues: outcome.issues.clone(),
            strengths: outcome.strengths.clone(),
        },
        activated_principles: activated_principles(scenario, selection),
    }
}
