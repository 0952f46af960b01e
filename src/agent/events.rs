//! Structured run events.
//!
//! Components emit [`RunEvent`]s into an [`EventSink`] instead of logging
//! inline, so the control flow stays testable without a subscriber attached.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::agent::planning::Plan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Navigation,
    Action,
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StageKind::Navigation => write!(f, "navigation"),
            StageKind::Action => write!(f, "action"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunEvent {
    RunStarted {
        query: String,
        max_iterations: usize,
    },
    StageStarted {
        stage: StageKind,
        iteration: Option<usize>,
    },
    PlanParsed {
        stage: StageKind,
        plan: Plan,
    },
    ToolInvoked {
        tool: String,
        params: Map<String, Value>,
    },
    ToolFinished {
        tool: String,
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        result: Option<Value>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    SnapshotFetched {
        elements: usize,
    },
    StageFailed {
        stage: StageKind,
        error: String,
    },
    IterationFinished {
        iteration: usize,
        task_complete: bool,
    },
    RunFinished {
        success: bool,
        iterations_completed: usize,
        summary: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub run_id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: RunEvent,
}

pub trait EventSink: Send + Sync {
    fn emit(&self, record: &EventRecord);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, record: &EventRecord) {
        let run_id = record.run_id;
        match &record.event {
            RunEvent::RunStarted { query, max_iterations } => {
                info!(%run_id, %query, max_iterations, "run started")
            }
            RunEvent::StageStarted { stage, iteration } => {
                info!(%run_id, %stage, ?iteration, "stage started")
            }
            RunEvent::PlanParsed { stage, plan } => debug!(
                %run_id,
                %stage,
                steps = plan.steps.len(),
                plan = %serde_json::to_string(plan).unwrap_or_default(),
                "plan parsed"
            ),
            RunEvent::ToolInvoked { tool, params } => debug!(
                %run_id,
                %tool,
                params = %serde_json::Value::Object(params.clone()),
                "invoking tool"
            ),
            RunEvent::ToolFinished {
                tool,
                success: true,
                result,
                ..
            } => debug!(
                %run_id,
                %tool,
                result = %result.as_ref().unwrap_or(&serde_json::Value::Null),
                "tool finished"
            ),
            RunEvent::ToolFinished { tool, error, .. } => warn!(
                %run_id,
                %tool,
                error = error.as_deref().unwrap_or_default(),
                "tool failed"
            ),
            RunEvent::SnapshotFetched { elements } => {
                info!(%run_id, elements, "interactive elements fetched")
            }
            RunEvent::StageFailed { stage, error } => {
                error!(%run_id, %stage, %error, "stage failed")
            }
            RunEvent::IterationFinished {
                iteration,
                task_complete,
            } => info!(%run_id, iteration, task_complete, "iteration finished"),
            RunEvent::RunFinished {
                success,
                iterations_completed,
                summary,
            } => info!(%run_id, success, iterations_completed, %summary, "run finished"),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _record: &EventRecord) {}
}

/// Keeps every record in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<EventRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RunEvent> {
        match self.records.lock() {
            Ok(records) => records.iter().map(|r| r.event.clone()).collect(),
            Err(poisoned) => poisoned.into_inner().iter().map(|r| r.event.clone()).collect(),
        }
    }
}

impl EventSink for MemorySink {
    fn emit(&self, record: &EventRecord) {
        match self.records.lock() {
            Ok(mut records) => records.push(record.clone()),
            Err(poisoned) => poisoned.into_inner().push(record.clone()),
        }
    }
}

/// Sink bound to one run id.
#[derive(Clone)]
pub struct RunEvents {
    run_id: Uuid,
    sink: Arc<dyn EventSink>,
}

impl RunEvents {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            sink,
        }
    }

    pub fn emit(&self, event: RunEvent) {
        self.sink.emit(&EventRecord {
            run_id: self.run_id,
            timestamp: Utc::now(),
            event,
        });
    }
}

impl Default for RunEvents {
    fn default() -> Self {
        Self::new(Arc::new(NoopSink))
    }
}
