// file: src/models/task.rs
// description: per-request task submitted to the agent runtime

use crate::error::Result;
use crate::mcp::ToolDescriptor;
use crate::models::schema::{ResponseSchema, ResponseShape};
use uuid::Uuid;

/// A single unit of agent work: what to do, which tool to use, what to return.
#[derive(Debug, Clone)]
pub struct TaskRequest {
    pub id: Uuid,
    pub instruction: String,
    pub tool: ToolDescriptor,
    pub schema: ResponseSchema,
}

impl TaskRequest {
    pub fn new<S: ResponseShape>(instruction: impl Into<String>, tool: ToolDescriptor) -> Self {
        Self {
            id: Uuid::new_v4(),
            instruction: instruction.into(),
            tool,
            schema: ResponseSchema::of::<S>(),
        }
    }
}

/// Outcome of one task: the populated shape, or why there is none.
pub type TaskResult<S> = Result<S>;
