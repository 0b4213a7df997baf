//! Cancelable scheduling for delayed finalize steps.
//!
//! The transition engine never touches an ambient timer directly: it hands
//! the finalize step to a [`Scheduler`]. Production client runtimes plug in
//! a real timer (see `saccade-runtime`); tests drive [`ManualScheduler`] to
//! simulate elapsed time deterministically instead of sleeping.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub type FinalizeTask = Box<dyn FnOnce() + Send + 'static>;

/// Cooperative cancellation handle for a scheduled task.
///
/// Cancellation is advisory: the scheduler checks the flag right before
/// running the task. Dropping the handle does not cancel.
#[derive(Clone, Default)]
pub struct TaskHandle {
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// A source of delayed execution for finalize steps.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: FinalizeTask) -> TaskHandle;
}

/// Deterministic scheduler: queues tasks and runs them on demand.
///
/// `schedule` never blocks and never spawns; a test (or a single-threaded
/// host loop) fires queued tasks with [`run_next`](Self::run_next) or
/// [`drain`](Self::drain) when it decides the delay has "elapsed".
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<VecDeque<(Duration, FinalizeTask, TaskHandle)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Run the oldest queued task. Returns false when the queue is empty.
    /// Cancelled tasks are discarded without running.
    pub fn run_next(&self) -> bool {
        let entry = self.queue.lock().pop_front();
        match entry {
            Some((_, task, handle)) => {
                if !handle.is_cancelled() {
                    task();
                }
                true
            }
            None => false,
        }
    }

    /// Run every queued task in order, including ones queued by the tasks
    /// themselves. Returns the number of entries consumed.
    pub fn drain(&self) -> usize {
        let mut consumed = 0;
        while self.run_next() {
            consumed += 1;
        }
        consumed
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: FinalizeTask) -> TaskHandle {
        let handle = TaskHandle::new();
        self.queue.lock().push_back((delay, task, handle.clone()));
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_run_only_when_driven() {
        let scheduler = ManualScheduler::new();
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        scheduler.schedule(
            Duration::from_millis(500),
            Box::new(move || flag.store(true, Ordering::SeqCst)),
        );
        assert!(!fired.load(Ordering::SeqCst));
        assert_eq!(scheduler.pending(), 1);

        assert!(scheduler.run_next());
        assert!(fired.load(Ordering::SeqCst));
        assert!(!scheduler.run_next());
    }

    #[test]
    fn cancelled_tasks_are_discarded() {
        let scheduler = ManualScheduler::new();
        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();

        let handle = scheduler.schedule(
            Duration::from_millis(500),
            Box::new(move || flag.store(true, Ordering::SeqCst)),
        );
        handle.cancel();

        assert_eq!(scheduler.drain(), 1);
        assert!(!fired.load(Ordering::SeqCst));
    }
}
