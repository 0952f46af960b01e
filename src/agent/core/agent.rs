use std::sync::Arc;

use serde_json::{Map, Value, json};

use crate::{
    agent::{
        events::{EventSink, RunEvent, RunEvents, StageKind, TracingSink},
        execution::PlanExecutor,
        memory::ActionHistory,
        planning::{Plan, StagePlanner},
        state::{CancelFlag, RunPhase},
        types::{OrchestratorOutcome, StageOutcome, StepResult},
    },
    config::AgentConfig,
    error::agent_error::AgentError,
    input::BrowserRequest,
    llm::{OpenAiCompatGenerator, TextGenerator},
    perception::{ElementSnapshot, parse_snapshot},
    prompt::PromptTemplate,
    tools::{
        HttpToolInvoker, ToolInvoker,
        model::{GET_INTERACTIVE_ELEMENTS, tool_descriptions},
        serialize,
    },
};

/// Drives a browser task: one navigation stage, then action stages until a
/// plan ends in a substantive action or the iteration budget runs out.
///
/// Each agent owns its tool backend handle; runs on separate agents share
/// nothing mutable.
pub struct BrowserAgent<G, T> {
    generator: Arc<G>,
    tools: T,
    navigation_prompt: PromptTemplate,
    action_prompt: PromptTemplate,
    sink: Arc<dyn EventSink>,
    cancel: CancelFlag,
}

impl BrowserAgent<OpenAiCompatGenerator, HttpToolInvoker> {
    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(
            OpenAiCompatGenerator::new(config.model.clone()),
            HttpToolInvoker::new(config.tool_endpoint.clone()),
            PromptTemplate::File(config.navigation_prompt.clone()),
            PromptTemplate::File(config.action_prompt.clone()),
        )
    }
}

impl<G, T> BrowserAgent<G, T>
where
    G: TextGenerator,
    T: ToolInvoker,
{
    pub fn new(
        generator: G,
        tools: T,
        navigation_prompt: PromptTemplate,
        action_prompt: PromptTemplate,
    ) -> Self {
        Self {
            generator: Arc::new(generator),
            tools,
            navigation_prompt,
            action_prompt,
            sink: Arc::new(TracingSink),
            cancel: CancelFlag::new(),
        }
    }

    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn tools(&self) -> &T {
        &self.tools
    }

    /// Runs the task. Never fails; stage failures and cancellation are
    /// reported through the outcome together with the results gathered so far.
    pub async fn run(&self, request: &BrowserRequest, max_iterations: usize) -> OrchestratorOutcome {
        let events = RunEvents::new(self.sink.clone());
        events.emit(RunEvent::RunStarted {
            query: request.query.clone(),
            max_iterations,
        });

        let executor = PlanExecutor::new(events.clone(), self.cancel.clone());
        let planner = StagePlanner::new(self.generator.clone(), executor, events.clone());
        let mut history = ActionHistory::new();
        let mut results: Vec<StepResult> = Vec::new();
        let mut iterations_completed = 0;
        let mut error = None;

        let mut phase = RunPhase::Navigating;
        events.emit(RunEvent::StageStarted {
            stage: StageKind::Navigation,
            iteration: None,
        });
        let StageOutcome { result, .. } = planner
            .run_stage(
                StageKind::Navigation,
                &self.navigation_prompt,
                &request_input(request),
                &history,
                &self.tools,
            )
            .await;
        let navigated = result.success;
        results.extend(result.results);
        if !navigated {
            phase = RunPhase::Failed;
            error = Some(result.error.unwrap_or(result.summary));
        } else if self.cancel.is_cancelled() {
            phase = RunPhase::Failed;
            error = Some(AgentError::Cancelled.to_string());
        }

        if !phase.is_terminal() && max_iterations > 0 {
            let mut snapshot = self.fetch_snapshot(&events).await;

            for iteration in 1..=max_iterations {
                if self.cancel.is_cancelled() {
                    phase = RunPhase::Failed;
                    error = Some(AgentError::Cancelled.to_string());
                    break;
                }

                phase = RunPhase::Acting(iteration);
                events.emit(RunEvent::StageStarted {
                    stage: StageKind::Action,
                    iteration: Some(iteration),
                });
                let StageOutcome { plan, result } = planner
                    .run_stage(
                        StageKind::Action,
                        &self.action_prompt,
                        &action_input(request, &snapshot),
                        &history,
                        &self.tools,
                    )
                    .await;
                iterations_completed = iteration;

                let stage_ok = result.success;
                results.extend(result.results);
                if let Some(plan) = &plan {
                    history.record(iteration, &plan.steps);
                }

                if !stage_ok {
                    phase = RunPhase::Failed;
                    error = Some(result.error.unwrap_or_else(|| {
                        format!("action stage failed at iteration {iteration}: {}", result.summary)
                    }));
                    break;
                }
                if self.cancel.is_cancelled() {
                    phase = RunPhase::Failed;
                    error = Some(AgentError::Cancelled.to_string());
                    break;
                }

                let task_complete = plan.as_ref().is_some_and(Plan::ends_with_action);
                events.emit(RunEvent::IterationFinished {
                    iteration,
                    task_complete,
                });
                if task_complete {
                    phase = RunPhase::Done;
                    break;
                }

                if iteration < max_iterations {
                    snapshot = self.fetch_snapshot(&events).await;
                }
            }
        }

        let success = phase != RunPhase::Failed;
        let summary = outcome_summary(&results, phase, iterations_completed, error.as_deref());
        events.emit(RunEvent::RunFinished {
            success,
            iterations_completed,
            summary: summary.clone(),
        });

        OrchestratorOutcome {
            success,
            iterations_completed,
            results,
            summary,
            error,
        }
    }

    /// Current interactive elements. A failed fetch yields an empty snapshot.
    async fn fetch_snapshot(&self, events: &RunEvents) -> ElementSnapshot {
        match self.tools.invoke(GET_INTERACTIVE_ELEMENTS, &Map::new()).await {
            Ok(output) => {
                let snapshot = parse_snapshot(serialize(&output));
                events.emit(RunEvent::SnapshotFetched {
                    elements: snapshot.elements().len(),
                });
                snapshot
            }
            Err(err) => {
                events.emit(RunEvent::ToolFinished {
                    tool: GET_INTERACTIVE_ELEMENTS.to_string(),
                    success: false,
                    result: None,
                    error: Some(err.to_string()),
                });
                ElementSnapshot::empty()
            }
        }
    }
}

fn request_input(request: &BrowserRequest) -> Value {
    json!({
        "query": request.query,
        "browser_context": request.browser_context,
        "current_url": request.current_url,
        "available_tools": request.available_tools,
        "tool_descriptions": tool_descriptions(&request.available_tools),
    })
}

fn action_input(request: &BrowserRequest, snapshot: &ElementSnapshot) -> Value {
    let mut input = request_input(request);
    if let Value::Object(map) = &mut input {
        map.insert("interactive_elements".to_string(), json!(snapshot));
    }
    input
}

fn outcome_summary(
    results: &[StepResult],
    phase: RunPhase,
    iterations: usize,
    error: Option<&str>,
) -> String {
    let total = results.len();
    let succeeded = results.iter().filter(|r| r.success).count();
    match (phase, error) {
        (RunPhase::Failed, Some(error)) => {
            format!("{error}; {succeeded} of {total} actions succeeded")
        }
        (RunPhase::Failed, None) => format!("Completed {succeeded} of {total} actions; some failed"),
        (RunPhase::Done, _) => format!(
            "Task complete after {iterations} iteration(s); successfully completed all {total} actions"
        ),
        _ => format!(
            "Iteration budget exhausted after {iterations} iteration(s); successfully completed all {total} actions"
        ),
    }
}
