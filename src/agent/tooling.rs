// file: src/agent/tooling.rs
// description: seams between the agent loop and the tool processes it drives

use crate::error::Result;
use crate::mcp::ToolDescriptor;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// A tool as advertised by a running tool server.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Launches a live session for a descriptor.
#[async_trait]
pub trait ToolConnector: Send + Sync {
    async fn connect(&self, descriptor: &ToolDescriptor) -> Result<Box<dyn ToolSession>>;
}

/// One connected tool server, owned by a single task.
#[async_trait]
pub trait ToolSession: Send + Sync {
    async fn list_tools(&self) -> Result<Vec<ToolInfo>>;

    /// Returns the tool's text output. Tool-level failures come back as text
    /// so the model can react to them; only transport failures are errors.
    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> Result<String>;

    async fn close(self: Box<Self>) -> Result<()>;
}
