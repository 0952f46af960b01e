#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("generation failed: {0}")]
    Generation(String),

    #[error("plan parse failed: {0}")]
    PlanParse(String),

    #[error("tool '{tool}' failed: {reason}")]
    ToolInvocation { tool: String, reason: String },

    #[error("prompt template unavailable: {0}")]
    PromptLoad(String),

    #[error("run cancelled")]
    Cancelled,

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AgentError {
    pub fn tool(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        AgentError::ToolInvocation {
            tool: tool.into(),
            reason: reason.into(),
        }
    }
}
