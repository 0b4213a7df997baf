//! The coordinator context - one explicit object in place of module state.
//!
//! Everything the stages share (tree, config, mode, scheduler, renderer,
//! router, the template-stage memo) is owned here and injected into the
//! stages at construction time. Build one per application surface; nothing
//! in this crate is process-global.

use crate::commit::ShowPage;
use crate::config::PagerConfig;
use crate::error::CoordinatorError;
use crate::gate::CheckPage;
use crate::mode::Mode;
use crate::pipeline::Pipeline;
use crate::render::{NoopRouter, Projection, RouterSync, TemplateRenderer};
use crate::schedule::{ManualScheduler, Scheduler};
use crate::stage::Stage;
use crate::stages::{SetData, StageCache, UseTemplate};
use crate::transition::TransitionEngine;
use crate::tree::{RenderTree, SharedTree};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

pub struct Coordinator {
    tree: SharedTree,
    config: Arc<PagerConfig>,
    mode: Mode,
    engine: Arc<TransitionEngine>,
    renderer: Arc<dyn TemplateRenderer>,
    router: Arc<dyn RouterSync>,
    projection: Option<Arc<dyn Projection>>,
    cache: Mutex<StageCache>,
}

impl Coordinator {
    pub fn builder() -> CoordinatorBuilder {
        CoordinatorBuilder::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    pub fn tree(&self) -> SharedTree {
        self.tree.clone()
    }

    pub fn engine(&self) -> Arc<TransitionEngine> {
        self.engine.clone()
    }

    /// A wired navigation gate stage.
    pub fn check_page(&self) -> CheckPage {
        CheckPage::new(
            self.tree.clone(),
            self.engine.clone(),
            self.router.clone(),
            self.mode,
        )
    }

    /// A wired render committer stage.
    pub fn show_page(&self) -> ShowPage {
        ShowPage::new(
            self.tree.clone(),
            self.engine.clone(),
            self.renderer.clone(),
            self.projection.clone(),
            self.config.clone(),
            self.mode,
        )
    }

    /// A stage attaching a fixed data payload.
    pub fn set_data(&self, data: Value) -> SetData {
        SetData::new(data)
    }

    /// The memoized template stage for `template_id`.
    pub fn use_template(&self, template_id: &str) -> Arc<UseTemplate> {
        self.cache.lock().use_template(template_id)
    }

    /// The standard chain for one route: gate, the route's own stages,
    /// committer.
    pub fn route_pipeline(&self, name: &str, route_stages: Vec<Box<dyn Stage>>) -> Pipeline {
        let mut pipeline = Pipeline::new(name).add_stage(self.check_page());
        pipeline.stages.extend(route_stages);
        pipeline.add_stage(self.show_page())
    }

    /// Prune views that are neither active nor transitioning. The router's
    /// refresh path calls this when it rebuilds client state.
    pub fn sweep(&self) -> usize {
        self.tree.lock().sweep()
    }
}

#[derive(Default)]
pub struct CoordinatorBuilder {
    config: Option<PagerConfig>,
    mode: Option<Mode>,
    scheduler: Option<Arc<dyn Scheduler>>,
    renderer: Option<Arc<dyn TemplateRenderer>>,
    router: Option<Arc<dyn RouterSync>>,
    projection: Option<Arc<dyn Projection>>,
}

impl CoordinatorBuilder {
    pub fn config(mut self, config: PagerConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn renderer(mut self, renderer: Arc<dyn TemplateRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn router(mut self, router: Arc<dyn RouterSync>) -> Self {
        self.router = Some(router);
        self
    }

    pub fn projection(mut self, projection: Arc<dyn Projection>) -> Self {
        self.projection = Some(projection);
        self
    }

    pub fn build(self) -> Result<Coordinator, CoordinatorError> {
        let config = self.config.unwrap_or_default();
        let mode = self.mode.unwrap_or(Mode::Client);

        if config.container_selector.trim().is_empty() {
            return Err(CoordinatorError::MissingContainer {
                selector: config.container_selector,
            });
        }
        let renderer = self
            .renderer
            .ok_or(CoordinatorError::Misconfigured("a template renderer is required"))?;
        if mode.is_server() && self.projection.is_none() {
            return Err(CoordinatorError::Misconfigured(
                "server mode requires a projection",
            ));
        }
        let scheduler: Arc<dyn Scheduler> = match (self.scheduler, mode) {
            (Some(scheduler), _) => scheduler,
            // Server transitions are synchronous; the scheduler is never
            // consulted.
            (None, Mode::Server) => Arc::new(ManualScheduler::new()),
            (None, Mode::Client) => {
                return Err(CoordinatorError::Misconfigured(
                    "client mode requires a scheduler",
                ));
            }
        };

        let config = Arc::new(config);
        let tree = RenderTree::new(config.container_selector.clone()).into_shared();
        let engine = Arc::new(TransitionEngine::new(
            tree.clone(),
            config.clone(),
            scheduler,
            mode,
        ));

        Ok(Coordinator {
            tree,
            config,
            mode,
            engine,
            renderer,
            router: self.router.unwrap_or_else(|| Arc::new(NoopRouter)),
            projection: self.projection,
            cache: Mutex::new(StageCache::new()),
        })
    }
}
