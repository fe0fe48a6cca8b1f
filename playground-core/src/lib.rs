//! Playground simulation engine.
//!
//! A user toggles components of a scenario on and off; the engine charges
//! their token cost against the scenario budget, resolves the selection to one
//! authored outcome and presents its feedback.

pub mod budget;
pub mod catalog;
pub mod config;
pub mod error;
pub mod feedback;
pub mod history;
pub mod lint;
pub mod matcher;
pub mod scenario;
pub mod selection;
pub mod session;
pub mod simulate;

pub use budget::{utilization, BudgetUsage};
pub use catalog::{ScenarioCatalog, ScenarioSource};
pub use config::PlaygroundConfig;
pub use error::{ContentDefect, PlaygroundError, Result};
pub use feedback::{present, rating, ActivatedPrinciple, Feedback, Presentation};
pub use matcher::{match_outcome, Match, MatchKind};
pub use scenario::{Component, Outcome, Principle, Scenario};
pub use selection::Selection;
pub use session::{derive_view, Session, SessionState, View};
