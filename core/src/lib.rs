pub mod bus;
pub mod commit;
pub mod config;
pub mod context;
pub mod error;
pub mod gate;
pub mod metadata;
pub mod mode;
pub mod pipeline;
pub mod render;
pub mod schedule;
pub mod stage;
pub mod stages;
pub mod transition;
pub mod tree;

pub use bus::{Bus, NavRequest, NavResponse};
pub use commit::ShowPage;
pub use config::PagerConfig;
pub use context::{Coordinator, CoordinatorBuilder};
pub use error::CoordinatorError;
pub use gate::CheckPage;
pub use metadata::StageMetadata;
pub use mode::Mode;
pub use pipeline::Pipeline;
pub use render::{
    NoopRouter, Projection, RenderError, RenderOptions, RouterSync, TemplateRenderer,
};
pub use schedule::{FinalizeTask, ManualScheduler, Scheduler, TaskHandle};
pub use stage::{Stage, StageError, StageResult};
pub use stages::{SetData, StageCache, UseTemplate};
pub use transition::TransitionEngine;
pub use tree::{PendingTransition, RenderTree, SharedTree, ViewNode};

pub mod prelude {
    pub use crate::bus::{Bus, NavRequest, NavResponse};
    pub use crate::config::PagerConfig;
    pub use crate::context::Coordinator;
    pub use crate::mode::Mode;
    pub use crate::pipeline::Pipeline;
    pub use crate::stage::{Stage, StageResult};
    pub use crate::tree::{RenderTree, ViewNode};
}
