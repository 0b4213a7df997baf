//! The render committer - turns a forwarded navigation into a view.
//!
//! Runs only after the gate has passed the navigation through and an
//! upstream stage has selected a template. Builds the view node with its
//! deferred-render binding, populates it through the template renderer,
//! inserts it under the container, and either serializes (server) or starts
//! a transition (client).

use crate::bus::Bus;
use crate::config::PagerConfig;
use crate::metadata::StageMetadata;
use crate::mode::Mode;
use crate::render::{Projection, RenderOptions, TemplateRenderer, error_placeholder};
use crate::stage::{Stage, StageResult};
use crate::transition::TransitionEngine;
use crate::tree::{SharedTree, ViewNode};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use uuid::Uuid;

pub struct ShowPage {
    id: Uuid,
    tree: SharedTree,
    engine: Arc<TransitionEngine>,
    renderer: Arc<dyn TemplateRenderer>,
    projection: Option<Arc<dyn Projection>>,
    config: Arc<PagerConfig>,
    mode: Mode,
}

impl ShowPage {
    pub fn new(
        tree: SharedTree,
        engine: Arc<TransitionEngine>,
        renderer: Arc<dyn TemplateRenderer>,
        projection: Option<Arc<dyn Projection>>,
        config: Arc<PagerConfig>,
        mode: Mode,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tree,
            engine,
            renderer,
            projection,
            config,
            mode,
        }
    }
}

#[async_trait]
impl Stage for ShowPage {
    fn metadata(&self) -> StageMetadata {
        StageMetadata {
            id: self.id,
            label: "showpage".to_string(),
            description: Some("render the selected template into a new view".to_string()),
        }
    }

    async fn execute(&self, bus: &mut Bus) -> StageResult {
        // No template selected upstream: nothing to commit, keep the chain
        // moving.
        let Some(template_id) = bus.res.template_id.clone() else {
            return StageResult::Continue;
        };

        let uri = bus.req.uri.clone();
        let data = bus
            .res
            .data
            .clone()
            .unwrap_or_else(|| Value::Object(Map::new()));
        let opts = RenderOptions {
            force_success: self.mode.is_server(),
            server_env: self.mode.is_server(),
        };

        let mut node = ViewNode::new(&uri, &template_id, data.clone());
        node.content = match self.renderer.render(&template_id, &data, &opts).await {
            Ok(content) => content,
            Err(err) => {
                // A failed render never leaves the view visibly empty; the
                // placeholder names the template so the surface stays
                // diagnosable. Server mode reaches this only when a renderer
                // violates the force-success contract.
                tracing::warn!(%uri, template = %template_id, error = %err,
                    "render failed, substituting placeholder");
                error_placeholder(&template_id, &err)
            }
        };

        if self.mode.is_server() {
            let mut tree = self.tree.lock();
            let inserted = tree.insert(node);
            inserted.active = true;
            let Some(projection) = self.projection.as_ref() else {
                return StageResult::Error("server commit requires a projection".into());
            };
            match projection.project(&tree, &self.config) {
                Ok(markup) => bus.res.body = Some(markup),
                Err(e) => return StageResult::Error(Box::new(e)),
            }
        } else {
            let from = {
                let mut tree = self.tree.lock();
                let from = tree.active_view().map(|n| n.uri.clone());
                tree.insert(node);
                from
            };
            if let Err(e) = self.engine.transition(from.as_deref(), &uri) {
                return StageResult::Error(Box::new(e));
            }
        }

        bus.res.handled = true;
        tracing::info!(%uri, template = %template_id, mode = ?self.mode, "view committed");
        StageResult::Continue
    }
}
