//! Session controller: load, toggle and reset against one active scenario.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::budget::{utilization, BudgetUsage};
use crate::catalog::ScenarioCatalog;
use crate::config::PlaygroundConfig;
use crate::error::{PlaygroundError, Result};
use crate::feedback::{present, ActivatedPrinciple, Feedback, Presentation};
use crate::history::ScoreHistory;
use crate::lint::{lint, log_findings};
use crate::matcher::match_outcome;
use crate::scenario::{Component, Outcome, Scenario};
use crate::selection::Selection;

/// Everything the presentation layer needs after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    pub scenario_id: String,
    pub selection: Selection,
    pub budget: BudgetUsage,
    pub outcome: Feedback,
    pub activated_principles: Vec<ActivatedPrinciple>,
}

/// Compute the derived view for a selection without any session state.
pub fn derive_view(scenario: &Scenario, selection: &Selection) -> Result<View> {
    let budget = utilization(selection, scenario);
    let resolved = match_outcome(selection, scenario)?;
    let Presentation {
        outcome,
        activated_principles,
    } = present(resolved, scenario, selection);
    Ok(View {
        scenario_id: scenario.id.clone(),
        selection: selection.clone(),
        budget,
        outcome,
        activated_principles,
    })
}

/// Warn about outcomes that name components the scenario does not have.
///
/// The matcher skips them silently, so this is the only trace they leave.
fn warn_unreachable_outcomes(scenario: &Scenario) -> Vec<&Outcome> {
    let unreachable: Vec<&Outcome> = scenario
        .outcomes
        .iter()
        .filter(|outcome| !scenario.is_satisfiable(outcome))
        .collect();
    for outcome in &unreachable {
        warn!(
            target: "playground.matcher",
            scenario = %scenario.id,
            outcome = %outcome.id,
            "outcome requires unknown components and can never be chosen"
        );
    }
    unreachable
}

/// The scenario a session is working on.
#[derive(Debug, Clone)]
pub struct ActiveScenario<'a> {
    pub scenario: &'a Scenario,
    pub selection: Selection,
    pub view: View,
}

#[derive(Debug, Clone)]
pub enum SessionState<'a> {
    Unloaded,
    Loaded(ActiveScenario<'a>),
}

/// One user's interaction with the playground.
///
/// Sessions borrow the catalog and own their selection, so any number of
/// them can share one catalog.
#[derive(Debug, Clone)]
pub struct Session<'a> {
    catalog: &'a ScenarioCatalog,
    config: PlaygroundConfig,
    state: SessionState<'a>,
    history: ScoreHistory,
}

impl<'a> Session<'a> {
    pub fn new(catalog: &'a ScenarioCatalog) -> Self {
        Self::with_config(catalog, PlaygroundConfig::default())
    }

    pub fn with_config(catalog: &'a ScenarioCatalog, config: PlaygroundConfig) -> Self {
        let history = ScoreHistory::new(config.history_limit);
        Self {
            catalog,
            config,
            state: SessionState::Unloaded,
            history,
        }
    }

    /// Activate a scenario with an empty selection.
    ///
    /// On failure the session is left exactly as it was.
    pub fn load_scenario(&mut self, id: &str) -> Result<&View> {
        let catalog = self.catalog;
        let scenario = catalog
            .get(id)
            .ok_or_else(|| PlaygroundError::UnknownScenario(id.to_string()))?;

        scenario.validate()?;

        if self.config.lint_on_load {
            let findings = lint(scenario);
            log_findings(scenario, &findings);
            if self.config.strict_lint && !findings.is_empty() {
                return Err(PlaygroundError::LintFailed {
                    scenario: scenario.id.clone(),
                    findings: findings.len(),
                });
            }
        } else {
            warn_unreachable_outcomes(scenario);
        }

        let selection = Selection::new();
        let view = derive_view(scenario, &selection)?;

        info!(target: "playground.session", scenario = %scenario.id, score = view.outcome.score, "scenario loaded");

        self.history.clear();
        self.history
            .record("load", &view.outcome.outcome_id, view.outcome.score);
        self.state = SessionState::Loaded(ActiveScenario {
            scenario,
            selection,
            view,
        });

        self.view().ok_or(PlaygroundError::NoActiveScenario)
    }

    /// Flip a component on or off. Unknown ids leave the view unchanged.
    pub fn toggle(&mut self, component_id: &str) -> Result<&View> {
        let SessionState::Loaded(active) = &mut self.state else {
            return Err(PlaygroundError::NoActiveScenario);
        };

        if !active.scenario.has_component(component_id) {
            debug!(target: "playground.session", scenario = %active.scenario.id, component = component_id, "ignoring unknown component");
            return Ok(&active.view);
        }

        let mut selection = active.selection.clone();
        let selected = selection.toggle(component_id);
        active.view = derive_view(active.scenario, &selection)?;
        active.selection = selection;

        debug!(
            target: "playground.session",
            scenario = %active.scenario.id,
            component = component_id,
            selected,
            outcome = %active.view.outcome.outcome_id,
            used = active.view.budget.used,
            "component toggled"
        );

        self.history.record(
            &format!("toggle:{}", component_id),
            &active.view.outcome.outcome_id,
            active.view.outcome.score,
        );
        Ok(&active.view)
    }

    /// Clear the selection, keeping the scenario.
    pub fn reset(&mut self) -> Result<&View> {
        let SessionState::Loaded(active) = &mut self.state else {
            return Err(PlaygroundError::NoActiveScenario);
        };

        let selection = Selection::new();
        active.view = derive_view(active.scenario, &selection)?;
        active.selection = selection;
        debug!(target: "playground.session", scenario = %active.scenario.id, "selection reset");

        self.history.record(
            "reset",
            &active.view.outcome.outcome_id,
            active.view.outcome.score,
        );
        Ok(&active.view)
    }

    pub fn state(&self) -> &SessionState<'a> {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, SessionState::Loaded(_))
    }

    pub fn view(&self) -> Option<&View> {
        self.active().map(|active| &active.view)
    }

    pub fn scenario(&self) -> Option<&'a Scenario> {
        self.active().map(|active| active.scenario)
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.active().map(|active| &active.selection)
    }

    pub fn history(&self) -> &ScoreHistory {
        &self.history
    }

    pub fn catalog(&self) -> &'a ScenarioCatalog {
        self.catalog
    }

    /// First component on the recommended build order not yet selected.
    pub fn next_recommended(&self) -> Option<&'a Component> {
        let active = self.active()?;
        let scenario = active.scenario;
        scenario
            .recommended_build_order
            .iter()
            .filter(|id| !active.selection.contains(id))
            .find_map(|id| scenario.component(id))
    }

    fn active(&self) -> Option<&ActiveScenario<'a>> {
        match &self.state {
            SessionState::Loaded(active) => Some(active),
            SessionState::Unloaded => None,
        }
    }
}
