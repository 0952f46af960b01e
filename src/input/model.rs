use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::tools::model::browser_tool_names;

/// What the caller wants done in the browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserRequest {
    /// Natural-language instruction, e.g. "search for rust tutorials"
    pub query: String,

    /// Ambient browser state known to the caller (open tabs, session info, ...)
    #[serde(default)]
    pub browser_context: Map<String, Value>,

    #[serde(default)]
    pub current_url: String,

    #[serde(default = "browser_tool_names")]
    pub available_tools: Vec<String>,
}

impl BrowserRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            browser_context: Map::new(),
            current_url: String::new(),
            available_tools: browser_tool_names(),
        }
    }

    pub fn with_current_url(mut self, url: impl Into<String>) -> Self {
        self.current_url = url.into();
        self
    }

    pub fn with_browser_context(mut self, context: Map<String, Value>) -> Self {
        self.browser_context = context;
        self
    }

    pub fn with_available_tools(mut self, tools: Vec<String>) -> Self {
        self.available_tools = tools;
        self
    }
}
