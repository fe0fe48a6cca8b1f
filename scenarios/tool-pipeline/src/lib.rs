use playground_core::{Component, Outcome, Principle, Scenario, ScenarioSource};

/// "Assemble a tool pipeline": harden an agent's call to a flaky billing API.
///
/// Retries without error handling and caching before validation are the two
/// detours learners most often take.
pub struct ToolPipelineScenario;

impl ScenarioSource for ToolPipelineScenario {
    fn id(&self) -> &'static str {
        "tool-pipeline"
    }

    fn build(&self) -> Scenario {
        Scenario {
            id: self.id().to_string(),
            title: "Assemble a Tool Pipeline".to_string(),
            description: "An agent looks up invoices through an API that times out on one \
                call in twenty. Wrap the call so the agent can rely on it."
                .to_string(),
            capacity_tokens: 900,
            components: vec![
                Component::new("tool-schema", 200)
                    .with_description("Typed JSON schema for the lookup_invoice tool")
                    .with_content("{ invoice_id: string (pattern INV-\\d{6}), include_lines?: bool }"),
                Component::new("input-validation", 150)
                    .with_description("Reject malformed arguments before calling out")
                    .with_content("Invalid ids return a structured error the model can correct."),
                Component::new("error-handling", 200)
                    .with_description("Map API failures to messages the model can act on")
                    .with_content("404 -> 'invoice not found', 429 -> 'rate limited, wait', 5xx -> 'upstream unavailable'"),
                Component::new("retry-logic", 150)
                    .with_description("Bounded retries with backoff on transient failures")
                    .with_content("3 attempts, exponential backoff from 200ms, only on timeouts and 5xx."),
                Component::new("observability", 150)
                    .with_description("Trace every call with arguments, latency and outcome"),
                Component::new("result-caching", 250)
                    .with_description("Cache lookups by invoice id for five minutes"),
            ],
            outcomes: vec![
                Outcome::new("raw-call", &[], 5)
                    .with_narrative("The model guesses argument names. Half the calls fail and the agent apologizes a lot.")
                    .with_issue("No contract between model and tool"),
                Outcome::new("schema", &["tool-schema"], 25)
                    .with_narrative("Calls are well-formed most of the time. Bad ids still reach the API and come back as opaque 400s.")
                    .with_issue("Malformed input reaches the API")
                    .with_strength("Clear tool contract"),
                Outcome::new("validated", &["tool-schema", "input-validation"], 45)
                    .with_narrative("Bad ids are caught locally and the model fixes them on the next turn. Timeouts still surface as stack traces.")
                    .with_issue("Upstream failures are unreadable")
                    .with_strength("Model can self-correct arguments"),
                Outcome::new(
                    "handled",
                    &["tool-schema", "input-validation", "error-handling"],
                    65,
                )
                .with_narrative("Every failure comes back as a sentence the model can act on. One call in twenty still fails outright.")
                .with_issue("Transient failures are not retried")
                .with_strength("Failures are actionable"),
                Outcome::new(
                    "resilient",
                    &["tool-schema", "input-validation", "error-handling", "retry-logic"],
                    80,
                )
                .with_narrative("Timeouts are retried with backoff and almost never reach the model. When something does go wrong nobody can tell why.")
                .with_issue("No visibility into retries or latency")
                .with_strength("Transient failures absorbed"),
                Outcome::new(
                    "production",
                    &[
                        "tool-schema",
                        "input-validation",
                        "error-handling",
                        "retry-logic",
                        "observability",
                    ],
                    95,
                )
                .with_narrative("Calls are validated, retried, explained and traced. The on-call engineer can see a retry storm before customers do.")
                .with_strength("End-to-end traceability")
                .with_strength("Layered failure handling"),
                Outcome::new("retry-only", &["retry-logic"], 10)
                    .with_narrative("Malformed calls are retried three times each. The API rate-limits the agent within minutes.")
                    .with_issue("Retries amplify permanent failures")
                    .with_issue("No error classification"),
                Outcome::new("cache-first", &["result-caching"], 12)
                    .with_narrative("Lookups are fast and sometimes wrong: a cached 'not found' outlives the invoice being created.")
                    .with_issue("Errors are cached along with results"),
                Outcome::new("schema-and-cache", &["tool-schema", "result-caching"], 30)
                    .with_narrative("Well-formed calls are cached. Failures are cached too, and nobody handles them.")
                    .with_issue("Optimizing before the call is reliable")
                    .with_strength("Clear tool contract"),
            ],
            principles: vec![
                Principle::new("contract-first", "Define the contract before hardening the call", &["tool-schema", "input-validation"]),
                Principle::new(
                    "classify-before-retry",
                    "Classify failures before retrying them",
                    &["error-handling", "retry-logic"],
                )
                .with_description("Only transient failures deserve a retry."),
                Principle::new("see-it-fail", "You cannot fix what you cannot see", &["observability"]),
                Principle::new("optimize-last", "Make it correct, then make it fast", &["result-caching"]),
            ],
            recommended_build_order: vec![
                "tool-schema".to_string(),
                "input-validation".to_string(),
                "error-handling".to_string(),
                "retry-logic".to_string(),
                "observability".to_string(),
                "result-caching".to_string(),
            ],
        }
    }
}
