use serde_json::Value;

use crate::agent::memory::ActionHistory;

/// Template followed by the stage input as a fenced JSON block.
pub fn build_stage_prompt(template: &str, input: &Value) -> String {
    let body = serde_json::to_string_pretty(input).unwrap_or_else(|_| input.to_string());
    format!("{}\n\n```json\n{}\n```", template.trim(), body)
}

/// Like [`build_stage_prompt`], with earlier iterations appended as text.
/// History stays out of the JSON body to keep the prompt small.
pub fn build_action_prompt(template: &str, input: &Value, history: &ActionHistory) -> String {
    let prompt = build_stage_prompt(template, input);
    if history.is_empty() {
        return prompt;
    }
    format!(
        "{}\n\nActions taken in previous iterations:\n{}",
        prompt,
        history.render()
    )
}
