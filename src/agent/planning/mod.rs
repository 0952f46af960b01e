pub mod planner;
mod step;

pub use planner::StagePlanner;
use serde::{Deserialize, Serialize};
pub use step::Step;

use crate::{
    error::{Error, Result, agent_error::AgentError},
    tools::model::is_informational,
    utils::string_util::json_object_candidates,
};

/// Ordered tool invocations produced from one model response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub steps: Vec<Step>,

    #[serde(default)]
    pub continue_on_error: bool,
}

impl Plan {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            continue_on_error: false,
        }
    }

    pub fn continuing(mut self) -> Self {
        self.continue_on_error = true;
        self
    }

    /// Parses a model response, tolerating prose and code fences around the
    /// JSON object. The first brace-delimited object that parses as a plan
    /// wins; otherwise the first parse error is reported.
    pub fn from_response(response: &str) -> Result<Self> {
        let mut first_error = None;
        for candidate in json_object_candidates(response) {
            match serde_json::from_str(candidate) {
                Ok(plan) => return Ok(plan),
                Err(e) => {
                    first_error.get_or_insert_with(|| e.to_string());
                }
            }
        }
        let reason = first_error.unwrap_or_else(|| "no JSON object in response".to_string());
        Err(Error::from(AgentError::PlanParse(reason)))
    }

    /// A plan whose last step only reads state or waits has not finished the
    /// task. An empty plan has not finished it either.
    pub fn ends_with_action(&self) -> bool {
        self.steps
            .last()
            .is_some_and(|step| !is_informational(&step.tool))
    }
}
