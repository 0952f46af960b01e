use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One tool invocation within a plan.
///
/// A step without a `tool` parses with an empty name and fails when executed,
/// so one malformed step does not reject the whole plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub tool: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub params: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Step {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            params: Map::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn null_or_missing_params_are_empty() {
        let steps: Vec<Step> = serde_json::from_value(json!([
            { "tool": "wait", "params": null },
            { "tool": "go_back" },
            {}
        ]))
        .unwrap();

        assert!(steps.iter().all(|step| step.params.is_empty()));
        assert_eq!(steps[2].tool, "");
    }
}
