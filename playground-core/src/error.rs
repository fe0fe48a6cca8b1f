//! Error types for the playground engine.

use thiserror::Error;

/// Authoring defects found when a scenario is validated at load time.
///
/// Any of these blocks activation of the affected scenario.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentDefect {
    #[error("scenario '{scenario}' has no outcome with an empty required set")]
    NoBaselineOutcome { scenario: String },

    #[error("scenario '{scenario}': outcomes '{first}' and '{second}' require the same components")]
    DuplicateRequiredSet {
        scenario: String,
        first: String,
        second: String,
    },

    #[error("scenario '{scenario}' declares component '{component}' more than once")]
    DuplicateComponentId { scenario: String, component: String },

    #[error("scenario '{scenario}' declares outcome '{outcome}' more than once")]
    DuplicateOutcomeId { scenario: String, outcome: String },
}

/// Errors surfaced by the engine.
#[derive(Debug, Error)]
pub enum PlaygroundError {
    #[error("content defect: {0}")]
    Content(#[from] ContentDefect),

    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("catalog already contains a scenario with id '{0}'")]
    DuplicateScenarioId(String),

    #[error("scenario source '{declared}' built a scenario with id '{built}'")]
    SourceIdMismatch { declared: String, built: String },

    #[error("no scenario is loaded")]
    NoActiveScenario,

    #[error("scenario '{scenario}' failed strict lint with {findings} finding(s)")]
    LintFailed { scenario: String, findings: usize },

    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PlaygroundError {
    /// True for errors that mean "this scenario could not be loaded".
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            PlaygroundError::Content(_)
                | PlaygroundError::UnknownScenario(_)
                | PlaygroundError::LintFailed { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PlaygroundError>;
