// file: src/utils/timing.rs
// description: wall-clock timing for agent tasks

use crate::error::AgentError;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use uuid::Uuid;

/// Logs when a task starts and how it ended.
pub struct TaskTimer {
    task_id: Uuid,
    tool: String,
    start: Instant,
}

impl TaskTimer {
    pub fn start(task_id: Uuid, tool: &str) -> Self {
        info!("Starting task {} with tool {}", task_id, tool);
        Self {
            task_id,
            tool: tool.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(self, error: Option<&AgentError>) -> Duration {
        let elapsed = self.elapsed();
        match error {
            None => info!(
                "Task {} ({}) completed in {:.2}s",
                self.task_id,
                self.tool,
                elapsed.as_secs_f64()
            ),
            Some(e) => warn!(
                "Task {} ({}) failed after {:.2}s: {}",
                self.task_id,
                self.tool,
                elapsed.as_secs_f64(),
                e
            ),
        }
        elapsed
    }
}
