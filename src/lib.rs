// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod mcp;
pub mod models;
pub mod server;
pub mod utils;

pub use agent::{AgentAdapter, McpAgent, TaskExecutor, ToolConnector, ToolInfo, ToolSession};
pub use config::{AgentConfig, Config, ModelConfig, ModelProvider, ServerConfig, ToolsConfig};
pub use error::{AgentError, ParseError, Result};
pub use llm::ChatClient;
pub use mcp::{McpConnector, McpSession, ToolDescriptor, ToolRegistry};
pub use models::{
    CodeReviewResponse, ResponseSchema, ResponseShape, SentryIssuesResponse, TaskRequest,
    TaskResult, parse_into_schema,
};
pub use server::{AppState, build_router};
