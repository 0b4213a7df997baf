use crate::render::RenderError;
use thiserror::Error;

/// Structural failures of the coordinator.
///
/// Transient conditions (already on the page, transition in flight) are not
/// errors - they resolve to a halted pipeline. Everything here is either a
/// caller contract violation or a configuration/integration fault.
#[derive(Error, Debug)]
pub enum CoordinatorError {
    /// A transition was requested toward a view the tree does not contain.
    /// Rejected before any mutation takes place.
    #[error("no view in the render tree for uri '{uri}'")]
    MissingView { uri: String },

    /// The configured container selector does not name a usable container.
    #[error("container '{selector}' is not part of the render surface")]
    MissingContainer { selector: String },

    /// The coordinator was assembled without a required collaborator.
    #[error("coordinator misconfigured: {0}")]
    Misconfigured(&'static str),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
