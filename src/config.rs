use std::{env, path::Path, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, agent_error::AgentError};

pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Text-generation endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: Option<u32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434/v1".to_string(),
            api_key: None,
            model: "llama3.2".to_string(),
            max_tokens: Some(4096),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub max_iterations: usize,
    pub navigation_prompt: PathBuf,
    pub action_prompt: PathBuf,
    pub model: ModelConfig,
    pub tool_endpoint: String,
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            navigation_prompt: PathBuf::from("prompts/browser_navigation_prompt.txt"),
            action_prompt: PathBuf::from("prompts/browser_action_prompt.txt"),
            model: ModelConfig::default(),
            tool_endpoint: "http://localhost:18000/mcp".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AgentConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `RUSBROWSER_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = env::var("RUSBROWSER_MAX_ITERATIONS") {
            config.max_iterations = value.parse().map_err(|_| {
                AgentError::Config(format!("RUSBROWSER_MAX_ITERATIONS is not a number: {value}"))
            })?;
        }
        if let Ok(value) = env::var("RUSBROWSER_NAVIGATION_PROMPT") {
            config.navigation_prompt = PathBuf::from(value);
        }
        if let Ok(value) = env::var("RUSBROWSER_ACTION_PROMPT") {
            config.action_prompt = PathBuf::from(value);
        }
        if let Ok(value) = env::var("RUSBROWSER_MODEL_URL") {
            config.model.base_url = value;
        }
        if let Ok(value) = env::var("RUSBROWSER_MODEL") {
            config.model.model = value;
        }
        config.model.api_key = env::var("RUSBROWSER_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .ok()
            .or(config.model.api_key);
        if let Ok(value) = env::var("RUSBROWSER_TOOL_ENDPOINT") {
            config.tool_endpoint = value;
        }
        if let Ok(value) = env::var("RUSBROWSER_LOG") {
            config.log_level = value;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.model.base_url.is_empty() {
            return Err(AgentError::Config("model.base_url is empty".into()).into());
        }
        if self.tool_endpoint.is_empty() {
            return Err(AgentError::Config("tool_endpoint is empty".into()).into());
        }
        Ok(())
    }
}
