use serde_json::Value;

use crate::{
    agent::{
        events::{RunEvent, RunEvents, StageKind},
        execution::PlanExecutor,
        memory::ActionHistory,
        planning::Plan,
        types::{RunResult, StageOutcome},
    },
    error::Result,
    llm::TextGenerator,
    prompt::{PromptTemplate, build_action_prompt},
    tools::ToolInvoker,
};

/// One prompt → plan → execution cycle.
pub struct StagePlanner<G> {
    generator: G,
    executor: PlanExecutor,
    events: RunEvents,
}

impl<G: TextGenerator> StagePlanner<G> {
    pub fn new(generator: G, executor: PlanExecutor, events: RunEvents) -> Self {
        Self {
            generator,
            executor,
            events,
        }
    }

    /// Never fails: prompt, generation and parse errors come back as a failed
    /// [`RunResult`] with no step results.
    pub async fn run_stage<T>(
        &self,
        stage: StageKind,
        template: &PromptTemplate,
        input: &Value,
        history: &ActionHistory,
        tools: &T,
    ) -> StageOutcome
    where
        T: ToolInvoker + ?Sized,
    {
        let plan = match self.plan(template, input, history).await {
            Ok(plan) => plan,
            Err(err) => {
                let error = format!("{stage} stage failed: {err}");
                self.events.emit(RunEvent::StageFailed {
                    stage,
                    error: error.clone(),
                });
                return StageOutcome {
                    plan: None,
                    result: RunResult::failed(error),
                };
            }
        };

        self.events.emit(RunEvent::PlanParsed {
            stage,
            plan: plan.clone(),
        });

        let result = self.executor.execute(&plan, tools).await;
        if !result.success {
            self.events.emit(RunEvent::StageFailed {
                stage,
                error: result.summary.clone(),
            });
        }

        StageOutcome {
            plan: Some(plan),
            result,
        }
    }

    async fn plan(
        &self,
        template: &PromptTemplate,
        input: &Value,
        history: &ActionHistory,
    ) -> Result<Plan> {
        let template = template.load().await?;
        let prompt = build_action_prompt(&template, input, history);
        let response = self.generator.generate(&prompt).await?;
        Plan::from_response(&response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{Map, json};

    use super::*;
    use crate::{
        error::{Error, agent_error::AgentError},
        tools::ToolOutput,
    };

    struct FixedGenerator {
        reply: std::result::Result<String, String>,
        prompts: Mutex<Vec<String>>,
    }

    impl FixedGenerator {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply
                .clone()
                .map_err(|e| Error::from(AgentError::Generation(e)))
        }
    }

    struct OkTools;

    #[async_trait]
    impl ToolInvoker for OkTools {
        async fn invoke(&self, _tool: &str, _params: &Map<String, Value>) -> Result<ToolOutput> {
            Ok(ToolOutput::from("ok"))
        }
    }

    fn planner(generator: FixedGenerator) -> StagePlanner<FixedGenerator> {
        StagePlanner::new(generator, PlanExecutor::default(), RunEvents::default())
    }

    #[tokio::test]
    async fn executes_the_generated_plan() {
        let planner = planner(FixedGenerator::replying(
            "Plan:\n```json\n{\"steps\": [{\"tool\": \"go_to_url\", \"params\": {\"url\": \"https://example.com\"}}]}\n```",
        ));
        let outcome = planner
            .run_stage(
                StageKind::Navigation,
                &PromptTemplate::from("Navigate."),
                &json!({ "query": "open example" }),
                &ActionHistory::new(),
                &OkTools,
            )
            .await;

        assert!(outcome.success());
        assert_eq!(outcome.plan.unwrap().steps[0].tool, "go_to_url");
        assert_eq!(outcome.result.results[0].result, Some(json!("ok")));

        let prompts = planner.generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with("Navigate.\n\n```json\n"));
        assert!(prompts[0].contains("\"query\": \"open example\""));
    }

    #[tokio::test]
    async fn unparseable_response_fails_the_stage() {
        let planner = planner(FixedGenerator::replying("I'd rather not."));
        let outcome = planner
            .run_stage(
                StageKind::Action,
                &PromptTemplate::from("Act."),
                &json!({}),
                &ActionHistory::new(),
                &OkTools,
            )
            .await;

        assert!(!outcome.success());
        assert!(outcome.plan.is_none());
        assert!(outcome.result.results.is_empty());
        assert!(
            outcome
                .result
                .error
                .as_deref()
                .is_some_and(|e| e.starts_with("action stage failed: plan parse failed"))
        );
    }

    #[tokio::test]
    async fn generation_error_fails_the_stage() {
        let planner = planner(FixedGenerator {
            reply: Err("quota exceeded".to_string()),
            prompts: Mutex::new(Vec::new()),
        });
        let outcome = planner
            .run_stage(
                StageKind::Navigation,
                &PromptTemplate::from("Navigate."),
                &json!({}),
                &ActionHistory::new(),
                &OkTools,
            )
            .await;

        assert!(!outcome.success());
        assert_eq!(
            outcome.result.error.as_deref(),
            Some("navigation stage failed: generation failed: quota exceeded")
        );
    }
}
