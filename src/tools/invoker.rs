use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::{Result, agent_error::AgentError},
    tools::output::{ForeignObject, ToolOutput},
};

/// Backend that performs individual browser operations.
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    async fn invoke(&self, tool: &str, params: &Map<String, Value>) -> Result<ToolOutput>;
}

#[async_trait]
impl<T: ToolInvoker + ?Sized> ToolInvoker for std::sync::Arc<T> {
    async fn invoke(&self, tool: &str, params: &Map<String, Value>) -> Result<ToolOutput> {
        (**self).invoke(tool, params).await
    }
}

/// Content block of a `tools/call` result.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ForeignObject for ContentBlock {
    fn attributes(&self) -> Option<Vec<(String, ToolOutput)>> {
        let mut attrs = vec![("type".to_string(), ToolOutput::from(self.kind.clone()))];
        if let Some(text) = &self.text {
            attrs.push(("text".to_string(), ToolOutput::from(text.clone())));
        }
        attrs.extend(
            self.extra
                .iter()
                .map(|(k, v)| (k.clone(), ToolOutput::from(v.clone()))),
        );
        Some(attrs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallToolResult {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(rename = "isError", default)]
    pub is_error: bool,
    #[serde(rename = "_meta", default)]
    pub meta: Option<Value>,
}

impl CallToolResult {
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ForeignObject for CallToolResult {
    fn attributes(&self) -> Option<Vec<(String, ToolOutput)>> {
        let content = self
            .content
            .iter()
            .map(|block| ToolOutput::object(block.clone()))
            .collect();
        Some(vec![
            ("content".to_string(), ToolOutput::Sequence(content)),
            ("isError".to_string(), ToolOutput::Bool(self.is_error)),
            (
                "_meta".to_string(),
                self.meta.clone().map(ToolOutput::from).unwrap_or(ToolOutput::Null),
            ),
        ])
    }
}

/// Calls tools on a server speaking JSON-RPC `tools/call` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpToolInvoker {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpToolInvoker {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ToolInvoker for HttpToolInvoker {
    async fn invoke(&self, tool: &str, params: &Map<String, Value>) -> Result<ToolOutput> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": Uuid::new_v4().to_string(),
            "method": "tools/call",
            "params": {
                "name": tool,
                "arguments": params,
            }
        });
        debug!(tool, endpoint = %self.endpoint, "calling tool");

        let response: Value = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = response.get("error") {
            let reason = error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(AgentError::tool(tool, reason).into());
        }

        let result = response.get("result").cloned().unwrap_or(Value::Null);
        let call: CallToolResult = serde_json::from_value(result)?;
        if call.is_error {
            return Err(AgentError::tool(tool, call.text()).into());
        }
        Ok(ToolOutput::object(call))
    }
}
