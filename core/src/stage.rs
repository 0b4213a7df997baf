use crate::bus::Bus;
use crate::metadata::StageMetadata;
use async_trait::async_trait;
use std::sync::Arc;

pub type StageError = Box<dyn std::error::Error + Send + Sync>;

/// The explicit result of running one stage against the bus.
///
/// `Continue` hands control to the next stage, `Halt` ends the chain
/// cleanly (a decision, not a failure), `Error` aborts it.
#[derive(Debug)]
pub enum StageResult {
    Continue,
    Halt,
    Error(StageError),
}

impl StageResult {
    pub fn is_halt(&self) -> bool {
        matches!(self, StageResult::Halt)
    }
}

/// One link in a navigation pipeline.
///
/// Stages own every collaborator they need at construction time; the only
/// thing passed per navigation is the [`Bus`].
#[async_trait]
pub trait Stage: Send + Sync {
    fn metadata(&self) -> StageMetadata;
    async fn execute(&self, bus: &mut Bus) -> StageResult;
}

// Memoized stages are handed out as Arcs; let them slot into a pipeline
// without a wrapper type.
#[async_trait]
impl<S: Stage + ?Sized> Stage for Arc<S> {
    fn metadata(&self) -> StageMetadata {
        (**self).metadata()
    }

    async fn execute(&self, bus: &mut Bus) -> StageResult {
        (**self).execute(bus).await
    }
}
