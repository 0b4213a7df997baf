use serde::{Deserialize, Serialize};

/// Execution context probe.
///
/// `Server` renders into a detached tree with no live surface and no timers:
/// transitions apply instantly, and the serialized output already reflects
/// the final state when the render pass returns. `Client` mutates a live
/// surface and swaps views through asynchronous timed transitions.
///
/// The mode is fixed when the [`Coordinator`](crate::Coordinator) is built
/// and never changes for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Server,
    Client,
}

impl Mode {
    pub fn is_server(&self) -> bool {
        matches!(self, Mode::Server)
    }

    pub fn is_client(&self) -> bool {
        matches!(self, Mode::Client)
    }
}
