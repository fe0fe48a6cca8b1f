use playground_core::{Component, Outcome, Principle, Scenario, ScenarioSource};

/// "Run an eval suite": build up evaluation coverage for a support chatbot.
///
/// The staircase is golden dataset ➜ assertion tests ➜ LLM judge. Reaching for
/// the judge first is the common detour.
pub struct ChatbotEvalScenario;

impl ScenarioSource for ChatbotEvalScenario {
    fn id(&self) -> &'static str {
        "chatbot-eval"
    }

    fn build(&self) -> Scenario {
        Scenario {
            id: self.id().to_string(),
            title: "Chatbot Eval Suite".to_string(),
            description: "Decide what it takes to know whether a support chatbot is \
                getting better or worse between releases."
                .to_string(),
            capacity_tokens: 1_200,
            components: vec![
                Component::new("golden-dataset", 400)
                    .with_description("Curated question/answer pairs with known-good responses")
                    .with_content("120 real tickets, each paired with an approved answer and the policy it cites."),
                Component::new("assertion-tests", 250)
                    .with_description("Deterministic checks on every response")
                    .with_content("Must cite a policy id; must not promise refunds; must stay under 150 words."),
                Component::new("llm-judge", 350)
                    .with_description("A model grading helpfulness and tone against a rubric")
                    .with_content("Rubric: correctness 0-3, tone 0-2, policy adherence 0-3. Judge sees the golden answer."),
            ],
            outcomes: vec![
                Outcome::new("none", &[], 5)
                    .with_narrative("Releases ship on vibes. A prompt tweak that breaks refund handling goes unnoticed until customers complain.")
                    .with_issue("No definition of a correct answer")
                    .with_issue("Regressions are found by users"),
                Outcome::new("golden-only", &["golden-dataset"], 20)
                    .with_narrative("There is ground truth, but someone has to eyeball 120 answers per release. It happens twice, then stops.")
                    .with_issue("Comparison is manual and gets skipped")
                    .with_strength("Known-good answers exist"),
                Outcome::new("golden-assertions", &["golden-dataset", "assertion-tests"], 40)
                    .with_narrative("Hard rules are enforced on every run. Format and policy violations fail CI, but a polite wrong answer still passes.")
                    .with_issue("Semantic quality is unmeasured")
                    .with_strength("Cheap checks run on every change")
                    .with_strength("Policy violations block releases"),
                Outcome::new("full-suite", &["golden-dataset", "assertion-tests", "llm-judge"], 85)
                    .with_narrative("Assertions catch the obvious failures, and the judge scores the rest against golden answers. Score drift is visible per release.")
                    .with_issue("Judge calibration should be spot-checked by humans")
                    .with_strength("Layered checks from cheap to expensive")
                    .with_strength("Judge is anchored to ground truth"),
                Outcome::new("judge-only", &["llm-judge"], 15)
                    .with_narrative("The judge grades answers with nothing to compare against. Scores are stable, confident and mostly meaningless.")
                    .with_issue("Judge has no reference answers")
                    .with_issue("Expensive checks run where cheap ones would do"),
                Outcome::new("judge-with-golden", &["golden-dataset", "llm-judge"], 35)
                    .with_narrative("The judge is anchored, but every trivial formatting failure costs a model call to discover.")
                    .with_issue("No deterministic assertions")
                    .with_strength("Judge compares against known-good answers"),
            ],
            principles: vec![
                Principle::new("ground-truth-first", "Define correct before measuring it", &["golden-dataset"])
                    .with_description("Every other check is relative to a reference. Build the reference first."),
                Principle::new(
                    "cheap-before-expensive",
                    "Run cheap checks before expensive ones",
                    &["assertion-tests", "llm-judge"],
                )
                .with_description("Deterministic assertions filter the obvious failures so the judge only sees hard cases."),
            ],
            recommended_build_order: vec![
                "golden-dataset".to_string(),
                "assertion-tests".to_string(),
                "llm-judge".to_string(),
            ],
        }
    }
}
