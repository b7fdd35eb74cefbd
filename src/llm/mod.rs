// file: src/llm/mod.rs
// description: language model backend used by the agent runtime

pub mod client;
pub mod types;

pub use client::ChatClient;
pub use types::{ChatMessage, FunctionCall, Role, ToolCall, ToolSpec};
