//! Playground CLI: explore scenarios from the terminal.
//!
//! - `playground list` - scenarios in the catalog
//! - `playground show <scenario>` - components, outcomes and principles
//! - `playground play <scenario> -t <component>...` - apply toggles, print the view
//! - `playground lint [scenario]` - content lint findings
//! - `playground simulate <scenario>` - let a scripted learner drive a session

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use chatbot_eval::ChatbotEvalScenario;
use context_window::ContextWindowScenario;
use playground_core::lint::lint;
use playground_core::simulate::{simulate, GuidedLearner, Learner, RandomLearner};
use playground_core::{PlaygroundConfig, ScenarioCatalog, Session};
use tool_pipeline::ToolPipelineScenario;

#[derive(Parser)]
#[command(name = "playground")]
#[command(about = "Interactive context-engineering exercises", version)]
struct Cli {
    /// JSON file with scenario definitions, replacing the built-in ones
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// JSON engine configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List scenarios
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a scenario's components, outcomes and principles
    Show { scenario: String },

    /// Toggle components in order and print the resulting view
    Play {
        scenario: String,

        /// Component to toggle; repeat for several
        #[arg(short, long = "toggle")]
        toggles: Vec<String>,
    },

    /// Report authoring problems
    Lint { scenario: Option<String> },

    /// Drive a session with a scripted learner
    Simulate {
        scenario: String,

        #[arg(long, value_enum, default_value_t = LearnerKind::Guided)]
        learner: LearnerKind,

        #[arg(long, default_value_t = 10)]
        steps: u32,

        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LearnerKind {
    Random,
    Guided,
}

#[derive(Serialize)]
struct ScenarioSummary<'a> {
    id: &'a str,
    title: &'a str,
    components: usize,
    outcomes: usize,
    capacity_tokens: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let catalog = load_catalog(cli.catalog.as_deref())?;
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::List { json } => list(&catalog, json),
        Commands::Show { scenario } => show(&catalog, &scenario),
        Commands::Play { scenario, toggles } => play(&catalog, config, &scenario, &toggles),
        Commands::Lint { scenario } => run_lint(&catalog, scenario.as_deref()),
        Commands::Simulate {
            scenario,
            learner,
            steps,
            seed,
        } => run_simulation(&catalog, config, &scenario, learner, steps, seed),
    }
}

fn builtin_catalog() -> playground_core::Result<ScenarioCatalog> {
    ScenarioCatalog::from_sources(&[
        &ChatbotEvalScenario,
        &ContextWindowScenario,
        &ToolPipelineScenario,
    ])
}

fn load_catalog(path: Option<&Path>) -> Result<ScenarioCatalog> {
    let Some(path) = path else {
        return Ok(builtin_catalog()?);
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog = ScenarioCatalog::from_json(&json)
        .with_context(|| format!("Invalid catalog {}", path.display()))?;
    tracing::info!(path = %path.display(), scenarios = catalog.len(), "Loaded catalog");
    Ok(catalog)
}

fn load_config(path: Option<&Path>) -> Result<PlaygroundConfig> {
    let Some(path) = path else {
        return Ok(PlaygroundConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    PlaygroundConfig::from_json(&json)
        .with_context(|| format!("Invalid config {}", path.display()))
}

fn list(catalog: &ScenarioCatalog, json: bool) -> Result<()> {
    let summaries: Vec<ScenarioSummary> = catalog
        .iter()
        .map(|s| ScenarioSummary {
            id: &s.id,
            title: &s.title,
            components: s.components.len(),
            outcomes: s.outcomes.len(),
            capacity_tokens: s.capacity_tokens,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    for s in &summaries {
        println!(
            "{:<16} {:<28} {} components, {} outcomes, {} tokens",
            s.id, s.title, s.components, s.outcomes, s.capacity_tokens
        );
    }
    Ok(())
}

fn show(catalog: &ScenarioCatalog, id: &str) -> Result<()> {
    let scenario = catalog
        .get(id)
        .with_context(|| format!("Unknown scenario '{}'", id))?;

    println!("{} ({} tokens)", scenario.title, scenario.capacity_tokens);
    if !scenario.description.is_empty() {
        println!("{}", scenario.description);
    }

    println!("\nComponents:");
    for c in &scenario.components {
        println!("  {:<24} {:>6}  {}", c.id, c.token_cost, c.description);
    }

    println!("\nOutcomes:");
    for o in &scenario.outcomes {
        let required = if o.required_components.is_empty() {
            "(none)".to_string()
        } else {
            o.required_components
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("  {:<28} {:>3}  {}", o.id, o.score, required);
    }

    if !scenario.principles.is_empty() {
        println!("\nPrinciples:");
        for p in &scenario.principles {
            println!("  {} [{}]", p.title, p.components.join(", "));
        }
    }

    println!("\nBuild order: {}", scenario.recommended_build_order.join(" -> "));
    Ok(())
}

fn play(
    catalog: &ScenarioCatalog,
    config: PlaygroundConfig,
    id: &str,
    toggles: &[String],
) -> Result<()> {
    let mut session = Session::with_config(catalog, config);
    session
        .load_scenario(id)
        .with_context(|| format!("Scenario '{}' could not be loaded", id))?;

    for component in toggles {
        session.toggle(component)?;
    }

    if let Some(view) = session.view() {
        println!("{}", serde_json::to_string_pretty(view)?);
    }
    if let Some(next) = session.next_recommended() {
        tracing::info!(component = %next.id, "Next recommended component");
    }
    Ok(())
}

fn run_lint(catalog: &ScenarioCatalog, id: Option<&str>) -> Result<()> {
    let scenarios: Vec<_> = match id {
        Some(id) => vec![catalog
            .get(id)
            .with_context(|| format!("Unknown scenario '{}'", id))?],
        None => catalog.iter().collect(),
    };

    for scenario in scenarios {
        if let Err(defect) = scenario.validate() {
            println!("{}: DEFECT {}", scenario.id, defect);
        }
        let findings = lint(scenario);
        if findings.is_empty() {
            println!("{}: clean", scenario.id);
        }
        for finding in findings {
            println!("{}: {}", scenario.id, finding);
        }
    }
    Ok(())
}

fn run_simulation(
    catalog: &ScenarioCatalog,
    config: PlaygroundConfig,
    id: &str,
    kind: LearnerKind,
    steps: u32,
    seed: u64,
) -> Result<()> {
    let learner: &dyn Learner = match kind {
        LearnerKind::Random => &RandomLearner,
        LearnerKind::Guided => &GuidedLearner,
    };

    let mut session = Session::with_config(catalog, config);
    session
        .load_scenario(id)
        .with_context(|| format!("Scenario '{}' could not be loaded", id))?;

    let mut rng = StdRng::seed_from_u64(seed);
    let report = simulate(&mut session, learner, steps, &mut rng)?;

    tracing::info!(
        learner = report.learner,
        steps = report.steps.len(),
        best = report.best.as_ref().map(|s| s.score).unwrap_or_default(),
        "Simulation finished"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn builtin_scenarios_all_load() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(catalog.len(), 3);

        let mut session = Session::new(&catalog);
        for id in ["chatbot-eval", "context-window", "tool-pipeline"] {
            let view = session.load_scenario(id).unwrap();
            assert!(view.selection.is_empty());
        }
    }

    #[test]
    fn play_arguments_collect_repeated_toggles() {
        let cli = Cli::parse_from([
            "playground",
            "play",
            "chatbot-eval",
            "-t",
            "golden-dataset",
            "--toggle",
            "llm-judge",
        ]);
        match cli.command {
            Commands::Play { scenario, toggles } => {
                assert_eq!(scenario, "chatbot-eval");
                assert_eq!(toggles, vec!["golden-dataset", "llm-judge"]);
            }
            _ => panic!("expected play command"),
        }
    }
}
