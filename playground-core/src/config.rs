//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Session behaviour knobs, usually read from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Run the content lint when a scenario is loaded and log its findings.
    pub lint_on_load: bool,

    /// Refuse to load scenarios with lint findings.
    pub strict_lint: bool,

    /// Maximum score-history entries kept per session
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_history_limit() -> usize {
    256
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            lint_on_load: true,
            strict_lint: false,
            history_limit: default_history_limit(),
        }
    }
}

impl PlaygroundConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
