// file: src/agent/adapter.rs
// description: single bridge between request handlers and the agent runtime

use crate::agent::executor::TaskExecutor;
use crate::error::AgentError;
use crate::mcp::ToolDescriptor;
use crate::models::{ResponseShape, TaskRequest, TaskResult, parse_into_schema};
use crate::utils::timing::TaskTimer;
use std::sync::Arc;

#[derive(Clone)]
pub struct AgentAdapter {
    executor: Arc<dyn TaskExecutor>,
}

impl AgentAdapter {
    pub fn new(executor: Arc<dyn TaskExecutor>) -> Self {
        Self { executor }
    }

    /// Submits one task and waits for its structured result.
    ///
    /// The executor runs on its own tokio task, so dropping the returned future
    /// (for example when an HTTP client disconnects) does not stop the agent.
    pub async fn execute<S: ResponseShape>(
        &self,
        instruction: impl Into<String>,
        tool: &ToolDescriptor,
    ) -> TaskResult<S> {
        let task = TaskRequest::new::<S>(instruction, tool.clone());
        let timer = TaskTimer::start(task.id, &tool.name);

        let executor = Arc::clone(&self.executor);
        let outcome = match tokio::spawn(async move { executor.execute(task).await }).await {
            Ok(outcome) => outcome,
            Err(e) => Err(AgentError::Runtime(e.to_string())),
        };

        let result = outcome.and_then(|raw| parse_into_schema::<S>(&raw).map_err(AgentError::from));
        timer.finish(result.as_ref().err());
        result
    }
}
