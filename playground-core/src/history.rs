//! Score tracking across a session's actions.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Bounded record of every score the session has shown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreHistory {
    /// Entries in action order; oldest dropped once `limit` is reached.
    entries: VecDeque<ScoreEntry>,
    limit: usize,
    next_step: u32,
}

/// A single derived-view recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Monotonic step counter, starting at 0 for the load.
    pub step: u32,
    /// What triggered the recomputation, e.g. `toggle:llm-judge`.
    pub action: String,
    pub outcome_id: String,
    pub score: u32,
}

impl ScoreHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
            next_step: 0,
        }
    }

    /// Record a score change.
    pub fn record(&mut self, action: &str, outcome_id: &str, score: u32) {
        if self.limit == 0 {
            return;
        }
        while self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(ScoreEntry {
            step: self.next_step,
            action: action.to_string(),
            outcome_id: outcome_id.to_string(),
            score,
        });
        self.next_step += 1;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_step = 0;
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &ScoreEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn latest(&self) -> Option<&ScoreEntry> {
        self.entries.back()
    }

    /// Highest score seen; the earliest entry wins ties.
    pub fn best(&self) -> Option<&ScoreEntry> {
        self.entries
            .iter()
            .rev()
            .max_by_key(|e| e.score)
    }

    /// Lowest score seen; the earliest entry wins ties.
    pub fn worst(&self) -> Option<&ScoreEntry> {
        self.entries.iter().min_by_key(|e| e.score)
    }
}
