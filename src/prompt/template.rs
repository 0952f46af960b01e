use std::path::PathBuf;

use crate::error::{Error, Result, agent_error::AgentError};

/// Stage prompt, either inline or read from disk on every stage run so edits
/// are picked up without a restart.
#[derive(Debug, Clone)]
pub enum PromptTemplate {
    Inline(String),
    File(PathBuf),
}

impl PromptTemplate {
    pub async fn load(&self) -> Result<String> {
        match self {
            PromptTemplate::Inline(text) => Ok(text.clone()),
            PromptTemplate::File(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                Error::from(AgentError::PromptLoad(format!("{}: {}", path.display(), e)))
            }),
        }
    }
}

impl From<&str> for PromptTemplate {
    fn from(text: &str) -> Self {
        PromptTemplate::Inline(text.to_string())
    }
}

impl From<PathBuf> for PromptTemplate {
    fn from(path: PathBuf) -> Self {
        PromptTemplate::File(path)
    }
}
