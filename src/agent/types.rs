use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::agent::planning::{Plan, Step};

/// Outcome of one attempted step. `result` is set on success, `error` on
/// failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub step: Step,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepResult {
    pub fn succeeded(step: Step, result: Value) -> Self {
        Self {
            step,
            success: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(step: Step, error: impl Into<String>) -> Self {
        Self {
            step,
            success: false,
            result: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub success: bool,
    pub results: Vec<StepResult>,
    pub summary: String,
    /// Set when the stage failed before any step ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunResult {
    pub fn from_results(results: Vec<StepResult>) -> Self {
        Self {
            success: results.iter().all(|r| r.success),
            summary: summarize(&results),
            results,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            success: false,
            results: Vec::new(),
            summary: error.clone(),
            error: Some(error),
        }
    }
}

/// What a stage produced: the parsed plan, when parsing got that far, and the
/// run result.
#[derive(Debug, Clone)]
pub struct StageOutcome {
    pub plan: Option<Plan>,
    pub result: RunResult,
}

impl StageOutcome {
    pub fn success(&self) -> bool {
        self.result.success
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestratorOutcome {
    pub success: bool,
    pub iterations_completed: usize,
    pub results: Vec<StepResult>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn summarize(results: &[StepResult]) -> String {
    let total = results.len();
    let succeeded = results.iter().filter(|r| r.success).count();
    if succeeded == total {
        format!("Successfully completed all {total} actions")
    } else {
        format!("Completed {succeeded} of {total} actions; some failed")
    }
}
