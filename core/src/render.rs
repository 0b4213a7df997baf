//! Collaborator contracts consumed at the coordinator's boundary.
//!
//! Template rendering, router state synchronization, and markup projection
//! are external concerns; the core only fixes their interfaces.

use crate::config::PagerConfig;
use crate::error::CoordinatorError;
use crate::tree::RenderTree;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Per-render options passed to the template renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// The renderer must produce usable markup no matter what - a response
    /// has to go out. Set for every server-mode render.
    pub force_success: bool,
    /// Environment hook: the render is feeding server-side serialization and
    /// must match what a client render of the same template would produce.
    pub server_env: bool,
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("template '{template_id}' is not registered")]
    TemplateNotFound { template_id: String },

    #[error("render failed: {0}")]
    Failed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Populates a view's content from a named template and a data payload.
///
/// Implementations honoring [`RenderOptions::force_success`] must never
/// return `Err` and never yield empty markup; the committer still guards
/// against implementations that violate the contract.
#[async_trait]
pub trait TemplateRenderer: Send + Sync {
    async fn render(
        &self,
        template_id: &str,
        data: &Value,
        opts: &RenderOptions,
    ) -> Result<String, RenderError>;
}

/// Receives a notification when the gate shows an already-rendered view
/// without going through the render pipeline, so client-side routing state
/// stays consistent.
pub trait RouterSync: Send + Sync {
    fn synchronized(&self, uri: &str);
}

/// Router notification sink that drops every event. The default for server
/// contexts and for hosts that do not track client routing state.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRouter;

impl RouterSync for NoopRouter {
    fn synchronized(&self, _uri: &str) {}
}

/// Serializes the render tree into container markup.
///
/// The tree is the state; a projection is a pure function of it. The core
/// ships no projection - `saccade-html` provides the markup one.
pub trait Projection: Send + Sync {
    fn project(&self, tree: &RenderTree, config: &PagerConfig) -> Result<String, CoordinatorError>;
}

/// Markup substituted for a view whose client-mode render failed.
///
/// The view is never left visibly empty: the placeholder names the template
/// so the failure is diagnosable from the surface alone.
pub fn error_placeholder(template_id: &str, err: &RenderError) -> String {
    format!(
        "<!-- render failed -->\n<p class=\"render-error\" data-template=\"{template_id}\">{err}</p>"
    )
}
