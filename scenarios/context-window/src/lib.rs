use playground_core::{Component, Outcome, Principle, Scenario, ScenarioSource};

/// "Build a context window": assemble what a coding assistant sees for one
/// request, inside a fixed token budget.
pub struct ContextWindowScenario;

const SYSTEM_PROMPT: &str = "system-prompt";
const RETRIEVED_DOCS: &str = "retrieved-docs";
const HISTORY: &str = "conversation-history";
const TOOLS: &str = "tool-definitions";
const FEW_SHOT: &str = "few-shot-examples";

impl ScenarioSource for ContextWindowScenario {
    fn id(&self) -> &'static str {
        "context-window"
    }

    fn build(&self) -> Scenario {
        Scenario {
            id: self.id().to_string(),
            title: "Build a Context Window".to_string(),
            description: "A user asks the assistant to fix a failing test. Choose what goes \
                into the 4,000-token window."
                .to_string(),
            capacity_tokens: 4_000,
            components: vec![
                Component::new(SYSTEM_PROMPT, 300)
                    .with_description("Role, constraints and output format")
                    .with_content("You are a senior engineer. Only edit files you were shown. Reply with a unified diff."),
                Component::new(RETRIEVED_DOCS, 1_800)
                    .with_description("The failing test and the code under test")
                    .with_content("tests/parser_test.rs (failing case) and src/parser.rs, ranked by symbol overlap."),
                Component::new(HISTORY, 1_200)
                    .with_description("The last turns of the conversation")
                    .with_content("User already tried bumping the dependency; the error changed from E0308 to E0599."),
                Component::new(TOOLS, 600)
                    .with_description("Schemas for run_tests and read_file")
                    .with_content("run_tests(filter: string), read_file(path: string, range?: [int, int])"),
                Component::new(FEW_SHOT, 900)
                    .with_description("Two worked examples of good diffs")
                    .with_content("Example fixes for an unrelated lifetime error and an off-by-one."),
            ],
            outcomes: vec![
                Outcome::new("empty", &[], 5)
                    .with_narrative("The model sees only the user's sentence and invents a parser that does not exist.")
                    .with_issue("No instructions")
                    .with_issue("No code to ground the answer"),
                Outcome::new("prompt-only", &[SYSTEM_PROMPT], 20)
                    .with_narrative("Answers arrive as tidy diffs against files the model has never seen.")
                    .with_issue("Format without facts")
                    .with_strength("Output contract is clear"),
                Outcome::new("grounded", &[SYSTEM_PROMPT, RETRIEVED_DOCS], 50)
                    .with_narrative("The diff targets the right function, but repeats the dependency bump the user already tried.")
                    .with_issue("Ignores what already happened in the conversation")
                    .with_strength("Grounded in the actual code"),
                Outcome::new("grounded-with-history", &[SYSTEM_PROMPT, RETRIEVED_DOCS, HISTORY], 70)
                    .with_narrative("The fix addresses the new E0599 error. The model asks the user to run the tests and paste the result.")
                    .with_issue("Cannot verify its own fix")
                    .with_strength("Builds on prior turns"),
                Outcome::new("agentic", &[SYSTEM_PROMPT, RETRIEVED_DOCS, HISTORY, TOOLS], 90)
                    .with_narrative("The assistant proposes the fix, runs the failing test, reads one more file when it fails, and lands a passing diff.")
                    .with_strength("Closes the loop with tools")
                    .with_strength("Leaves headroom in the window"),
                Outcome::new("docs-dump", &[RETRIEVED_DOCS], 15)
                    .with_narrative("Pages of code with no instruction. The model summarizes the parser instead of fixing it.")
                    .with_issue("Retrieval without a task framing"),
                Outcome::new("examples-without-grounding", &[SYSTEM_PROMPT, FEW_SHOT], 25)
                    .with_narrative("The diff is beautifully formatted and fixes a lifetime error that is not in this codebase.")
                    .with_issue("Examples crowd out the real code")
                    .with_strength("Output style is consistent"),
            ],
            principles: vec![
                Principle::new("ground-in-source", "Ground answers in retrieved source", &[RETRIEVED_DOCS])
                    .with_description("The model can only fix code it can see."),
                Principle::new("state-carries-over", "Carry state across turns", &[HISTORY])
                    .with_description("What the user already tried is part of the problem."),
                Principle::new("budget-is-attention", "Every token competes for attention", &[FEW_SHOT, RETRIEVED_DOCS])
                    .with_description("Large blocks of marginal context dilute the signal."),
                Principle::new("act-to-verify", "Give the model a way to check itself", &[TOOLS]),
            ],
            recommended_build_order: vec![
                SYSTEM_PROMPT.to_string(),
                RETRIEVED_DOCS.to_string(),
                HISTORY.to_string(),
                TOOLS.to_string(),
                FEW_SHOT.to_string(),
            ],
        }
    }
}
