// file: src/mcp/session.rs
// description: MCP client sessions over child-process stdio transport
// reference: https://docs.rs/rmcp

use crate::agent::tooling::{ToolConnector, ToolInfo, ToolSession};
use crate::error::{AgentError, Result};
use crate::mcp::descriptor::ToolDescriptor;
use async_trait::async_trait;
use rmcp::model::{CallToolRequestParam, CallToolResult};
use rmcp::service::{RoleClient, RunningService};
use rmcp::transport::TokioChildProcess;
use rmcp::ServiceExt;
use serde_json::{Map, Value};
use std::borrow::Cow;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Spawns the descriptor's process and completes the MCP handshake.
#[derive(Debug, Default, Clone, Copy)]
pub struct McpConnector;

#[async_trait]
impl ToolConnector for McpConnector {
    async fn connect(&self, descriptor: &ToolDescriptor) -> Result<Box<dyn ToolSession>> {
        let session = McpSession::start(descriptor).await?;
        Ok(Box::new(session))
    }
}

pub struct McpSession {
    tool: String,
    service: RunningService<RoleClient, ()>,
}

impl McpSession {
    pub async fn start(descriptor: &ToolDescriptor) -> Result<Self> {
        info!("Starting tool process {}", descriptor);

        let mut command = Command::new(&descriptor.command);
        command.args(&descriptor.args).envs(&descriptor.env);

        let transport = TokioChildProcess::new(command)
            .map_err(|e| AgentError::tool_process(&descriptor.name, e))?;

        let service = ()
            .serve(transport)
            .await
            .map_err(|e| AgentError::tool_process(&descriptor.name, e))?;

        if let Some(peer) = service.peer_info() {
            debug!(
                "Connected to {} {}",
                peer.server_info.name, peer.server_info.version
            );
        }

        Ok(Self {
            tool: descriptor.name.clone(),
            service,
        })
    }
}

#[async_trait]
impl ToolSession for McpSession {
    async fn list_tools(&self) -> Result<Vec<ToolInfo>> {
        let tools = self
            .service
            .list_all_tools()
            .await
            .map_err(|e| AgentError::tool_process(&self.tool, e))?;

        debug!("{} exposes {} tool(s)", self.tool, tools.len());

        Ok(tools
            .into_iter()
            .map(|tool| ToolInfo {
                name: tool.name.to_string(),
                description: tool.description.map(|d| d.to_string()).unwrap_or_default(),
                input_schema: Value::Object(tool.input_schema.as_ref().clone()),
            })
            .collect())
    }

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> Result<String> {
        debug!("Calling {}::{}", self.tool, name);

        let result = self
            .service
            .call_tool(CallToolRequestParam {
                name: Cow::Owned(name.to_string()),
                arguments: Some(arguments),
            })
            .await
            .map_err(|e| AgentError::tool_process(&self.tool, e))?;

        if result.is_error.unwrap_or(false) {
            warn!("{}::{} reported an error", self.tool, name);
        }

        Ok(render_output(&result))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let tool = self.tool.clone();
        match self.service.cancel().await {
            Ok(reason) => debug!("Tool process {} stopped: {:?}", tool, reason),
            Err(e) => warn!("Tool process {} did not stop cleanly: {}", tool, e),
        }
        Ok(())
    }
}

/// Joins the text parts of a tool result; failures are prefixed so the model sees them.
fn render_output(result: &CallToolResult) -> String {
    let text = result
        .content
        .iter()
        .flatten()
        .filter_map(|content| content.as_text())
        .map(|text| text.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    if result.is_error.unwrap_or(false) {
        format!("error: {}", text)
    } else {
        text
    }
}
