pub mod agent;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod logging;
pub mod perception;
pub mod prompt;
pub mod tools;
pub mod utils;

pub use agent::{BrowserAgent, OrchestratorOutcome};
pub use config::AgentConfig;
pub use error::{Error, Result};
pub use input::BrowserRequest;
