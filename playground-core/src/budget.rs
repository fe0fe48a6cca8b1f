//! Token budget accounting for a selection.

use serde::{Deserialize, Serialize};

use crate::scenario::Scenario;
use crate::selection::Selection;

/// How much of a scenario's capacity a selection consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetUsage {
    pub used: u32,
    pub capacity: u32,
    pub over_budget: bool,
}

impl BudgetUsage {
    pub fn new(used: u32, capacity: u32) -> Self {
        Self {
            used,
            capacity,
            over_budget: used > capacity,
        }
    }

    /// Tokens left before the ceiling; zero once over budget.
    pub fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.used)
    }

    /// Integer utilization percentage. May exceed 100 when over budget.
    pub fn percent(&self) -> u32 {
        if self.capacity == 0 {
            return 0;
        }
        let percent = u64::from(self.used) * 100 / u64::from(self.capacity);
        u32::try_from(percent).unwrap_or(u32::MAX)
    }
}

/// Sum the token cost of selected components present in the scenario.
///
/// Ids the scenario does not know are ignored.
pub fn utilization(selection: &Selection, scenario: &Scenario) -> BudgetUsage {
    let used = selection
        .iter()
        .filter_map(|id| scenario.component(id))
        .fold(0u32, |total, c| total.saturating_add(c.token_cost));

    BudgetUsage::new(used, scenario.capacity_tokens)
}
