//! Timer-backed scheduling for client-mode finalize steps.

use saccade_core::schedule::{FinalizeTask, Scheduler, TaskHandle};
use std::time::Duration;

/// Runs finalize steps on the ambient Tokio runtime.
///
/// Each scheduled task is a spawned future that sleeps for the delay, checks
/// the cancellation flag, and runs the task. Must be used from within a
/// runtime; `schedule` panics otherwise, which is the same
/// configuration/integration error as scheduling with no event loop at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl TokioScheduler {
    pub fn new() -> Self {
        Self
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: FinalizeTask) -> TaskHandle {
        let handle = TaskHandle::new();
        let token = handle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if token.is_cancelled() {
                tracing::debug!(?delay, "scheduled task cancelled before firing");
                return;
            }
            task();
        });
        handle
    }
}
