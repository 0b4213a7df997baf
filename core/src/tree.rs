//! The render tree - the explicit navigation state object.
//!
//! The tree is the single source of truth for "what page am I on". The
//! visible surface (live document, serialized markup) is a projection of
//! this state, never the state itself, which keeps the coordination logic
//! testable without a rendering surface.
//!
//! Steady-state invariant: at most one node has `active` set without
//! `inactive`. While a transition is in flight exactly one node carries
//! `inactive` and the incoming node carries neither flag until the finalize
//! step fires - that window is deliberately observable and is what the
//! navigation gate keys its suppression on.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// One rendered page.
///
/// `active` and `inactive` are independent markers, not exclusive states:
/// both, either, or neither may be set transiently while a swap is running.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewNode {
    pub uri: String,
    /// Template recorded on the node as its deferred-render binding.
    pub template_id: String,
    /// Data payload recorded alongside the template.
    pub data: Value,
    /// Markup produced by the template renderer.
    pub content: String,
    pub active: bool,
    pub inactive: bool,
    /// Client-mode display toggle; server projections ignore it.
    pub visible: bool,
}

impl ViewNode {
    pub fn new(uri: impl Into<String>, template_id: impl Into<String>, data: Value) -> Self {
        Self {
            uri: uri.into(),
            template_id: template_id.into(),
            data,
            content: String::new(),
            active: false,
            inactive: false,
            visible: false,
        }
    }

    /// True for the node the user is settled on: flagged in, not flagged out.
    pub fn is_settled_active(&self) -> bool {
        self.active && !self.inactive
    }
}

/// The explicit record of an in-flight transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingTransition {
    pub from: Option<String>,
    pub to: String,
    pub started_at: DateTime<Utc>,
}

/// Process-wide collection of view nodes, scoped to one container.
#[derive(Debug, Serialize, Deserialize)]
pub struct RenderTree {
    container_selector: String,
    nodes: Vec<ViewNode>,
    pending: Option<PendingTransition>,
}

pub type SharedTree = Arc<Mutex<RenderTree>>;

impl RenderTree {
    pub fn new(container_selector: impl Into<String>) -> Self {
        Self {
            container_selector: container_selector.into(),
            nodes: Vec::new(),
            pending: None,
        }
    }

    pub fn into_shared(self) -> SharedTree {
        Arc::new(Mutex::new(self))
    }

    pub fn container_selector(&self) -> &str {
        &self.container_selector
    }

    /// The node the user is settled on, if any.
    ///
    /// `None` signals "no stable active view" - the transient window while a
    /// transition is in flight.
    pub fn active_view(&self) -> Option<&ViewNode> {
        self.nodes.iter().find(|n| n.is_settled_active())
    }

    /// Look a node up by URI, regardless of flags.
    ///
    /// URIs are unique per node outside a transition window; when transient
    /// duplicates exist the most recently inserted node wins.
    pub fn find_by_uri(&self, uri: &str) -> Option<&ViewNode> {
        self.nodes.iter().rev().find(|n| n.uri == uri)
    }

    pub(crate) fn find_by_uri_mut(&mut self, uri: &str) -> Option<&mut ViewNode> {
        self.nodes.iter_mut().rev().find(|n| n.uri == uri)
    }

    /// Nodes in insertion order (also serialization order).
    pub fn nodes(&self) -> &[ViewNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn pending(&self) -> Option<&PendingTransition> {
        self.pending.as_ref()
    }

    pub(crate) fn set_pending(&mut self, pending: PendingTransition) {
        self.pending = Some(pending);
    }

    pub(crate) fn clear_pending(&mut self) {
        self.pending = None;
    }

    /// Append a node under the container and return it for further setup.
    pub fn insert(&mut self, node: ViewNode) -> &mut ViewNode {
        self.nodes.push(node);
        self.nodes.last_mut().expect("node just pushed")
    }

    /// Remove nodes that are neither active nor part of a transition.
    ///
    /// This is the refresh/cleanup path: the router calls it when it rebuilds
    /// client state, pruning views that finished transitioning out. Returns
    /// the number of nodes removed.
    pub fn sweep(&mut self) -> usize {
        let before = self.nodes.len();
        let pending = self.pending.clone();
        self.nodes.retain(|n| {
            n.active
                || n.inactive
                || pending.as_ref().is_some_and(|p| {
                    p.to == n.uri || p.from.as_deref() == Some(n.uri.as_str())
                })
        });
        let removed = before - self.nodes.len();
        if removed > 0 {
            tracing::debug!(removed, "swept stale views");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(uri: &str) -> ViewNode {
        ViewNode::new(uri, "t", json!({}))
    }

    #[test]
    fn active_view_requires_active_without_inactive() {
        let mut tree = RenderTree::new("body");
        tree.insert(node("/a")).active = true;
        assert_eq!(tree.active_view().unwrap().uri, "/a");

        tree.find_by_uri_mut("/a").unwrap().inactive = true;
        assert!(tree.active_view().is_none());
    }

    #[test]
    fn find_by_uri_ignores_flags_and_prefers_newest() {
        let mut tree = RenderTree::new("body");
        tree.insert(node("/a")).inactive = true;
        tree.insert(node("/a")).content = "fresh".to_string();

        let found = tree.find_by_uri("/a").unwrap();
        assert_eq!(found.content, "fresh");
        assert!(tree.find_by_uri("/missing").is_none());
    }

    #[test]
    fn sweep_removes_only_settled_out_nodes() {
        let mut tree = RenderTree::new("body");
        tree.insert(node("/old"));
        tree.insert(node("/out")).inactive = true;
        tree.insert(node("/cur")).active = true;
        tree.insert(node("/in"));
        tree.set_pending(PendingTransition {
            from: Some("/cur".to_string()),
            to: "/in".to_string(),
            started_at: Utc::now(),
        });

        assert_eq!(tree.sweep(), 1);
        assert!(tree.find_by_uri("/old").is_none());
        assert!(tree.find_by_uri("/out").is_some());
        assert!(tree.find_by_uri("/in").is_some());
    }
}
