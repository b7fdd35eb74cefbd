// file: src/mcp/mod.rs
// description: MCP (Model Context Protocol) tool processes driven by the agent
// reference: https://docs.rs/rmcp

pub mod descriptor;
pub mod registry;
pub mod session;

pub use descriptor::ToolDescriptor;
pub use registry::ToolRegistry;
pub use session::{McpConnector, McpSession};
