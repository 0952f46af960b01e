use serde::{Deserialize, Serialize};

use crate::agent::planning::Step;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: usize,
    pub steps: Vec<Step>,
}

/// Steps planned in earlier action iterations, oldest first.
///
/// Records are copies of the plan's steps and are never changed once pushed.
#[derive(Debug, Default, Clone)]
pub struct ActionHistory {
    records: Vec<IterationRecord>,
}

impl ActionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, iteration: usize, steps: &[Step]) {
        self.records.push(IterationRecord {
            iteration,
            steps: steps.to_vec(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Plain-text rendering appended to action prompts.
    pub fn render(&self) -> String {
        self.records
            .iter()
            .map(|record| {
                let steps = record
                    .steps
                    .iter()
                    .map(|step| {
                        format!("{}({})", step.tool, serde_json::Value::Object(step.params.clone()))
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Iteration {}: {}", record.iteration, steps)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_iterations_in_order() {
        let mut history = ActionHistory::new();
        history.record(1, &[Step::new("get_interactive_elements")]);
        history.record(
            2,
            &[
                Step::new("input_text")
                    .with_param("index", 4)
                    .with_param("text", "rust"),
                Step::new("wait"),
            ],
        );

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.render(),
            "Iteration 1: get_interactive_elements({})\nIteration 2: input_text({\"index\":4,\"text\":\"rust\"}), wait({})"
        );
    }
}
