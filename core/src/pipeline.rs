use crate::bus::Bus;
use crate::metadata::StageMetadata;
use crate::stage::{Stage, StageResult};
use async_trait::async_trait;
use tracing::Instrument;
use uuid::Uuid;

/// An ordered chain of navigation stages.
///
/// Execution walks the stages in order: `Continue` falls through, `Halt`
/// stops the chain cleanly, `Error` aborts it. A `Pipeline` is itself a
/// [`Stage`], so chains nest.
pub struct Pipeline {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            stages: Vec::new(),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn add_stage<S: Stage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Box::new(stage));
        self
    }
}

#[async_trait]
impl Stage for Pipeline {
    fn metadata(&self) -> StageMetadata {
        StageMetadata {
            id: self.id,
            label: self.name.clone(),
            description: self.description.clone(),
        }
    }

    async fn execute(&self, bus: &mut Bus) -> StageResult {
        for stage in &self.stages {
            let meta = stage.metadata();
            let span = tracing::debug_span!("Stage", saccade.stage = %meta.label);
            match stage.execute(bus).instrument(span).await {
                StageResult::Continue => continue,
                StageResult::Halt => {
                    tracing::debug!(stage = %meta.label, "pipeline halted");
                    return StageResult::Halt;
                }
                StageResult::Error(e) => {
                    tracing::error!(stage = %meta.label, error = %e, "stage failed");
                    return StageResult::Error(e);
                }
            }
        }
        StageResult::Continue
    }
}
