use crate::{
    agent::{
        events::{RunEvent, RunEvents},
        planning::Plan,
        state::CancelFlag,
        types::{RunResult, StepResult},
    },
    error::{Result, agent_error::AgentError},
    tools::{ToolInvoker, ToolOutput, serializer::serialize},
};

/// Runs a plan's steps in order against a tool backend.
#[derive(Clone, Default)]
pub struct PlanExecutor {
    events: RunEvents,
    cancel: CancelFlag,
}

impl PlanExecutor {
    pub fn new(events: RunEvents, cancel: CancelFlag) -> Self {
        Self { events, cancel }
    }

    /// Executes `plan`. A failed step stops the plan unless
    /// `continue_on_error` is set; steps never attempted are absent from the
    /// result.
    pub async fn execute<T>(&self, plan: &Plan, tools: &T) -> RunResult
    where
        T: ToolInvoker + ?Sized,
    {
        let mut results = Vec::with_capacity(plan.steps.len());

        for step in &plan.steps {
            if self.cancel.is_cancelled() {
                break;
            }

            self.events.emit(RunEvent::ToolInvoked {
                tool: step.tool.clone(),
                params: step.params.clone(),
            });

            let outcome: Result<ToolOutput> = if step.tool.is_empty() {
                Err(AgentError::tool("<unnamed>", "step has no tool name").into())
            } else {
                tools.invoke(&step.tool, &step.params).await
            };
            match outcome {
                Ok(output) => {
                    let value = serialize(&output);
                    self.events.emit(RunEvent::ToolFinished {
                        tool: step.tool.clone(),
                        success: true,
                        result: Some(value.clone()),
                        error: None,
                    });
                    results.push(StepResult::succeeded(step.clone(), value));
                }
                Err(err) => {
                    let error = err.to_string();
                    self.events.emit(RunEvent::ToolFinished {
                        tool: step.tool.clone(),
                        success: false,
                        result: None,
                        error: Some(error.clone()),
                    });
                    results.push(StepResult::failed(step.clone(), error));
                    if !plan.continue_on_error {
                        break;
                    }
                }
            }
        }

        RunResult::from_results(results)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{Map, Value, json};

    use super::*;
    use crate::agent::planning::Step;

    /// Fails every call to a tool named in `failing`.
    #[derive(Default)]
    struct ScriptedTools {
        failing: Vec<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ToolInvoker for ScriptedTools {
        async fn invoke(&self, tool: &str, params: &Map<String, Value>) -> Result<ToolOutput> {
            self.calls.lock().unwrap().push(tool.to_string());
            if self.failing.contains(&tool) {
                return Err(AgentError::tool(tool, "element not found").into());
            }
            Ok(ToolOutput::mapping([
                ("tool", ToolOutput::from(tool)),
                ("params", ToolOutput::from(Value::Object(params.clone()))),
            ]))
        }
    }

    fn three_steps() -> Vec<Step> {
        vec![
            Step::new("go_to_url").with_param("url", "https://example.com"),
            Step::new("click_element_by_index").with_param("index", 9),
            Step::new("scroll_down"),
        ]
    }

    #[tokio::test]
    async fn all_steps_succeed() {
        let tools = ScriptedTools::default();
        let result = PlanExecutor::default()
            .execute(&Plan::new(three_steps()), &tools)
            .await;

        assert!(result.success);
        assert_eq!(result.results.len(), 3);
        assert_eq!(result.summary, "Successfully completed all 3 actions");
        assert_eq!(
            result.results[0].result,
            Some(json!({ "tool": "go_to_url", "params": { "url": "https://example.com" } }))
        );
        assert!(result.results.iter().all(|r| r.error.is_none()));
    }

    #[tokio::test]
    async fn failure_stops_the_plan() {
        let tools = ScriptedTools {
            failing: vec!["click_element_by_index"],
            ..Default::default()
        };
        let result = PlanExecutor::default()
            .execute(&Plan::new(three_steps()), &tools)
            .await;

        assert!(!result.success);
        assert_eq!(result.results.len(), 2);
        assert_eq!(*tools.calls.lock().unwrap(), ["go_to_url", "click_element_by_index"]);
        assert_eq!(result.summary, "Completed 1 of 2 actions; some failed");

        let failed = &result.results[1];
        assert!(failed.result.is_none());
        assert_eq!(
            failed.error.as_deref(),
            Some("tool 'click_element_by_index' failed: element not found")
        );
    }

    #[tokio::test]
    async fn continue_on_error_attempts_every_step() {
        let tools = ScriptedTools {
            failing: vec!["go_to_url", "click_element_by_index"],
            ..Default::default()
        };
        let result = PlanExecutor::default()
            .execute(&Plan::new(three_steps()).continuing(), &tools)
            .await;

        assert!(!result.success);
        assert_eq!(result.results.len(), 3);
        assert!(result.results[2].success);
        assert_eq!(result.summary, "Completed 1 of 3 actions; some failed");
    }

    #[tokio::test]
    async fn unnamed_step_fails_without_calling_the_backend() {
        let tools = ScriptedTools::default();
        let plan = Plan::new(vec![Step::new(""), Step::new("scroll_down")]).continuing();
        let result = PlanExecutor::default().execute(&plan, &tools).await;

        assert!(!result.success);
        assert_eq!(
            result.results[0].error.as_deref(),
            Some("tool '<unnamed>' failed: step has no tool name")
        );
        assert!(result.results[1].success);
        assert_eq!(*tools.calls.lock().unwrap(), ["scroll_down"]);
    }

    #[tokio::test]
    async fn empty_plan_is_vacuously_successful() {
        let result = PlanExecutor::default()
            .execute(&Plan::new(vec![]), &ScriptedTools::default())
            .await;
        assert!(result.success);
        assert!(result.results.is_empty());
        assert_eq!(result.summary, "Successfully completed all 0 actions");
    }

    #[tokio::test]
    async fn cancellation_stops_before_next_step() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let tools = ScriptedTools::default();
        let result = PlanExecutor::new(RunEvents::default(), cancel)
            .execute(&Plan::new(three_steps()), &tools)
            .await;
        assert!(result.results.is_empty());
        assert!(tools.calls.lock().unwrap().is_empty());
    }
}
