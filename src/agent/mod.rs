// file: src/agent/mod.rs
// description: agent runtime, its tool seams, and the adapter handlers call into

pub mod adapter;
pub mod executor;
pub mod prompt;
pub mod runtime;
pub mod tooling;

pub use adapter::AgentAdapter;
pub use executor::TaskExecutor;
pub use runtime::McpAgent;
pub use tooling::{ToolConnector, ToolInfo, ToolSession};
