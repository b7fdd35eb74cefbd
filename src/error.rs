// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AgentError>;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tool process '{tool}' failed: {message}")]
    ToolProcess { tool: String, message: String },

    #[error("Model backend error: {0}")]
    Model(String),

    #[error("Agent exceeded {0} tool rounds without a final answer")]
    ToolRoundsExhausted(usize),

    #[error("Response did not match schema: {0}")]
    Parse(#[from] ParseError),

    #[error("Agent task aborted: {0}")]
    Runtime(String),

    #[error("HTTP server error: {0}")]
    HttpServer(String),
}

impl AgentError {
    pub fn tool_process(tool: &str, message: impl ToString) -> Self {
        AgentError::ToolProcess {
            tool: tool.to_string(),
            message: message.to_string(),
        }
    }
}

/// Failure to coerce a raw agent answer into a declared response shape.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("agent returned an empty answer")]
    Empty,

    #[error("no JSON object found in agent answer")]
    NoJsonObject,

    #[error("answer does not fit {schema}: {source}")]
    Mismatch {
        schema: &'static str,
        source: serde_json::Error,
    },
}
