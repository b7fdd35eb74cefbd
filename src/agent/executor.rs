// file: src/agent/executor.rs
// description: the boundary the adapter submits tasks across

use crate::error::Result;
use crate::models::TaskRequest;
use async_trait::async_trait;

/// Something that can carry a task to completion.
///
/// Implementations return the agent's raw final answer; coercing it into the
/// requested shape is the adapter's job.
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    async fn execute(&self, task: TaskRequest) -> Result<String>;
}
