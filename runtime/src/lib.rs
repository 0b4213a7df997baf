//! Async execution layer for saccade.
//!
//! The core decides; this crate runs. [`TokioScheduler`] gives client-mode
//! transitions a real timer, and [`Navigator`] drives navigation requests
//! through a pipeline.

pub mod navigator;
pub mod scheduler;

pub use navigator::{NavigateError, Navigator};
pub use scheduler::TokioScheduler;

pub mod prelude {
    pub use crate::navigator::Navigator;
    pub use crate::scheduler::TokioScheduler;
}
