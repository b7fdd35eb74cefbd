// file: src/mcp/descriptor.rs
// description: launch descriptors for external MCP tool processes
// reference: https://modelcontextprotocol.io/specification/basic/transports#stdio

use std::collections::BTreeMap;
use std::fmt;

/// How to launch one external MCP tool server.
///
/// Built once at startup and shared read-only; secrets live in `args` or
/// `env` exactly as the tool process expects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: String,
    pub command: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

// Secrets never reach logs: only the command line shape is printed.
impl fmt::Display for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {} arg(s))", self.name, self.command, self.args.len())
    }
}
