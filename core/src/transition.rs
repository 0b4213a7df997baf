//! The transition engine - executes the active-view swap.
//!
//! A transition marks the previous view as transitioning out, makes the
//! incoming view visible, and finalizes the swap after the configured delay:
//! the incoming view gains the active flag, the previous view loses both
//! flags and is hidden. Between invocation and finalize the tree reports no
//! stable active view; the navigation gate relies on exactly that window to
//! suppress overlapping navigations, so the engine itself performs no
//! concurrency control.

use crate::config::PagerConfig;
use crate::error::CoordinatorError;
use crate::mode::Mode;
use crate::schedule::Scheduler;
use crate::tree::{PendingTransition, SharedTree};
use chrono::Utc;
use std::sync::Arc;

pub struct TransitionEngine {
    tree: SharedTree,
    config: Arc<PagerConfig>,
    scheduler: Arc<dyn Scheduler>,
    mode: Mode,
}

impl TransitionEngine {
    pub fn new(
        tree: SharedTree,
        config: Arc<PagerConfig>,
        scheduler: Arc<dyn Scheduler>,
        mode: Mode,
    ) -> Self {
        Self {
            tree,
            config,
            scheduler,
            mode,
        }
    }

    /// Swap the active view from `prev` to `next`.
    ///
    /// `next` must already be in the tree: a transition toward a missing view
    /// is a caller contract violation and is rejected before any mutation.
    /// In server mode the whole swap is synchronous - no timer is
    /// outstanding when this returns. In client mode the finalize step is
    /// handed to the scheduler with the configured delay.
    ///
    /// Callers must not start a second transition for the same pair while
    /// one is in flight; the gate's suppression is the only guard.
    pub fn transition(&self, prev: Option<&str>, next: &str) -> Result<(), CoordinatorError> {
        {
            let mut tree = self.tree.lock();
            if tree.find_by_uri(next).is_none() {
                return Err(CoordinatorError::MissingView {
                    uri: next.to_string(),
                });
            }

            if let Some(prev_uri) = prev
                && let Some(node) = tree.find_by_uri_mut(prev_uri)
            {
                node.inactive = true;
            }
            if let Some(node) = tree.find_by_uri_mut(next) {
                node.visible = true;
            }
            tree.set_pending(PendingTransition {
                from: prev.map(String::from),
                to: next.to_string(),
                started_at: Utc::now(),
            });
        }

        if self.mode.is_server() {
            finalize(&self.tree, prev, next);
            return Ok(());
        }

        tracing::debug!(
            from = prev.unwrap_or("<none>"),
            to = next,
            delay_ms = self.config.transition_delay_ms,
            "transition scheduled"
        );
        let tree = self.tree.clone();
        let from = prev.map(String::from);
        let to = next.to_string();
        self.scheduler.schedule(
            self.config.transition_delay(),
            Box::new(move || finalize(&tree, from.as_deref(), &to)),
        );
        Ok(())
    }
}

/// The delayed half of the swap. Runs inline in server mode, from the
/// scheduler in client mode.
fn finalize(tree: &SharedTree, from: Option<&str>, to: &str) {
    let mut tree = tree.lock();
    if let Some(node) = tree.find_by_uri_mut(to) {
        node.active = true;
    }
    if let Some(from_uri) = from
        && let Some(node) = tree.find_by_uri_mut(from_uri)
    {
        node.active = false;
        node.inactive = false;
        node.visible = false;
    }
    tree.clear_pending();
    tracing::debug!(to, "transition finalized");
}
