//! The navigation gate - decides what an incoming navigation may do.
//!
//! The decision order is load-bearing. "Already here" is checked before
//! "transition in flight" so that repeating a navigation to the active page
//! never schedules a duplicate transition; "transition in flight" is checked
//! before "promote an existing view" so that two transitions can never run
//! concurrently toward different targets. Refusing to decide while the tree
//! has no stable active view is the system's only concurrency control.

use crate::bus::Bus;
use crate::metadata::StageMetadata;
use crate::mode::Mode;
use crate::render::RouterSync;
use crate::stage::{Stage, StageResult};
use crate::transition::TransitionEngine;
use crate::tree::SharedTree;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct CheckPage {
    id: Uuid,
    tree: SharedTree,
    engine: Arc<TransitionEngine>,
    router: Arc<dyn RouterSync>,
    mode: Mode,
}

enum Decision {
    AlreadyActive,
    MidTransition,
    Promote { from: Option<String> },
    Forward,
}

impl CheckPage {
    pub fn new(
        tree: SharedTree,
        engine: Arc<TransitionEngine>,
        router: Arc<dyn RouterSync>,
        mode: Mode,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tree,
            engine,
            router,
            mode,
        }
    }

    fn decide(&self, uri: &str, refreshing: bool) -> Decision {
        let tree = self.tree.lock();
        let current = tree.active_view();

        if let Some(current) = current
            && current.uri == uri
        {
            return Decision::AlreadyActive;
        }
        // An empty tree is first paint, not a transition window: only defer
        // when there are views that could be mid-swap.
        if current.is_none() && !refreshing && !tree.is_empty() {
            return Decision::MidTransition;
        }
        match tree.find_by_uri(uri) {
            Some(node) if !node.active => Decision::Promote {
                from: current.map(|c| c.uri.clone()),
            },
            _ => Decision::Forward,
        }
    }
}

#[async_trait]
impl Stage for CheckPage {
    fn metadata(&self) -> StageMetadata {
        StageMetadata {
            id: self.id,
            label: "checkpage".to_string(),
            description: Some("suppress, promote, or forward an incoming navigation".to_string()),
        }
    }

    async fn execute(&self, bus: &mut Bus) -> StageResult {
        // Server renders are one-shot: there is no live transition to protect.
        if self.mode.is_server() {
            return StageResult::Continue;
        }

        let uri = bus.req.uri.clone();
        match self.decide(&uri, bus.req.refreshing) {
            Decision::AlreadyActive => {
                tracing::debug!(%uri, "navigation suppressed: already on this page");
                StageResult::Halt
            }
            Decision::MidTransition => {
                tracing::debug!(%uri, "navigation deferred: transition in flight");
                StageResult::Halt
            }
            Decision::Promote { from } => {
                if let Err(e) = self.engine.transition(from.as_deref(), &uri) {
                    return StageResult::Error(Box::new(e));
                }
                self.router.synchronized(&uri);
                tracing::debug!(%uri, "existing view promoted");
                StageResult::Halt
            }
            Decision::Forward => StageResult::Continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::NavRequest;
    use crate::config::PagerConfig;
    use crate::schedule::ManualScheduler;
    use crate::tree::{RenderTree, ViewNode};
    use parking_lot::Mutex;
    use serde_json::json;

    #[derive(Default)]
    struct RecordingRouter {
        seen: Mutex<Vec<String>>,
    }

    impl RouterSync for RecordingRouter {
        fn synchronized(&self, uri: &str) {
            self.seen.lock().push(uri.to_string());
        }
    }

    struct Fixture {
        gate: CheckPage,
        tree: SharedTree,
        scheduler: Arc<ManualScheduler>,
        router: Arc<RecordingRouter>,
    }

    fn fixture(mode: Mode) -> Fixture {
        let tree = RenderTree::new("body").into_shared();
        let scheduler = Arc::new(ManualScheduler::new());
        let engine = Arc::new(TransitionEngine::new(
            tree.clone(),
            Arc::new(PagerConfig::default()),
            scheduler.clone(),
            mode,
        ));
        let router = Arc::new(RecordingRouter::default());
        let gate = CheckPage::new(tree.clone(), engine, router.clone(), mode);
        Fixture {
            gate,
            tree,
            scheduler,
            router,
        }
    }

    fn seed(tree: &SharedTree, uri: &str, active: bool) {
        let mut tree = tree.lock();
        let node = tree.insert(ViewNode::new(uri, "t", json!({})));
        node.active = active;
        node.visible = active;
    }

    #[tokio::test]
    async fn repeat_navigation_to_active_page_is_halted() {
        let f = fixture(Mode::Client);
        seed(&f.tree, "/a", true);

        for _ in 0..3 {
            let mut bus = Bus::new(NavRequest::new("/a"));
            assert!(f.gate.execute(&mut bus).await.is_halt());
        }
        assert_eq!(f.tree.lock().len(), 1);
        assert_eq!(f.scheduler.pending(), 0);
    }

    #[tokio::test]
    async fn navigation_during_transition_window_is_halted() {
        let f = fixture(Mode::Client);
        seed(&f.tree, "/a", false); // present but not yet active: mid-swap

        let mut bus = Bus::new(NavRequest::new("/b"));
        assert!(f.gate.execute(&mut bus).await.is_halt());
        assert_eq!(f.tree.lock().len(), 1);
    }

    #[tokio::test]
    async fn refresh_bypasses_the_transition_window_check() {
        let f = fixture(Mode::Client);
        seed(&f.tree, "/a", false);

        // A refresh toward the hidden view promotes it instead of deferring.
        let mut bus = Bus::new(NavRequest::new("/a").refreshing());
        assert!(f.gate.execute(&mut bus).await.is_halt());
        assert_eq!(f.scheduler.pending(), 1);
    }

    #[tokio::test]
    async fn hidden_view_is_promoted_and_router_notified() {
        let f = fixture(Mode::Client);
        seed(&f.tree, "/a", true);
        seed(&f.tree, "/b", false);

        let mut bus = Bus::new(NavRequest::new("/b"));
        assert!(f.gate.execute(&mut bus).await.is_halt());
        assert_eq!(f.router.seen.lock().as_slice(), ["/b".to_string()]);

        f.scheduler.drain();
        assert_eq!(f.tree.lock().active_view().unwrap().uri, "/b");
    }

    #[tokio::test]
    async fn promotion_overlap_halts_the_second_call() {
        let f = fixture(Mode::Client);
        seed(&f.tree, "/a", true);
        seed(&f.tree, "/b", false);

        let mut first = Bus::new(NavRequest::new("/b"));
        assert!(f.gate.execute(&mut first).await.is_halt());

        // Second promotion arrives before finalize: the window is open, so
        // it must observe "mid-transition" and halt without scheduling.
        let mut second = Bus::new(NavRequest::new("/b"));
        assert!(f.gate.execute(&mut second).await.is_halt());
        assert_eq!(f.scheduler.pending(), 1);
        assert!(f.router.seen.lock().len() == 1);
    }

    #[tokio::test]
    async fn unknown_uri_on_empty_tree_forwards() {
        let f = fixture(Mode::Client);
        let mut bus = Bus::new(NavRequest::new("/a"));
        assert!(matches!(
            f.gate.execute(&mut bus).await,
            StageResult::Continue
        ));
    }

    #[tokio::test]
    async fn server_mode_always_forwards() {
        let f = fixture(Mode::Server);
        seed(&f.tree, "/a", true);
        let mut bus = Bus::new(NavRequest::new("/a"));
        assert!(matches!(
            f.gate.execute(&mut bus).await,
            StageResult::Continue
        ));
    }
}
