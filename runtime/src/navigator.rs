//! The navigation driver.
//!
//! One `Navigator` fronts one wired pipeline: every navigation request gets
//! a fresh [`Bus`], a tracing span carrying the URI, and the response record
//! back - whether the chain ran to completion or a stage halted it.

use saccade_core::bus::{Bus, NavRequest, NavResponse};
use saccade_core::pipeline::Pipeline;
use saccade_core::stage::{Stage, StageError, StageResult};
use std::sync::Arc;
use thiserror::Error;
use tracing::Instrument;

#[derive(Error, Debug)]
pub enum NavigateError {
    #[error("navigation pipeline '{pipeline}' failed")]
    Pipeline {
        pipeline: String,
        #[source]
        source: StageError,
    },
}

pub struct Navigator {
    pipeline: Arc<Pipeline>,
}

impl Navigator {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    pub fn from_arc(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline }
    }

    /// Run one navigation request through the pipeline.
    ///
    /// A halted chain is a decision, not a failure: the response record is
    /// returned either way. Only a faulted stage maps to `Err`.
    pub async fn navigate(&self, req: NavRequest) -> Result<NavResponse, NavigateError> {
        let span = tracing::info_span!(
            "Navigation",
            saccade.uri = %req.uri,
            saccade.refreshing = req.refreshing
        );
        async move {
            let mut bus = Bus::new(req);
            match self.pipeline.execute(&mut bus).await {
                StageResult::Continue => {
                    tracing::debug!(handled = bus.res.handled, "pipeline completed");
                }
                StageResult::Halt => {
                    tracing::debug!("pipeline halted");
                }
                StageResult::Error(source) => {
                    return Err(NavigateError::Pipeline {
                        pipeline: self.pipeline.name.clone(),
                        source,
                    });
                }
            }
            Ok(bus.res)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::TokioScheduler;
    use async_trait::async_trait;
    use saccade_core::config::PagerConfig;
    use saccade_core::context::Coordinator;
    use saccade_core::mode::Mode;
    use saccade_core::render::{RenderError, RenderOptions, TemplateRenderer};
    use serde_json::{Value, json};
    use std::time::Duration;

    struct StubRenderer;

    #[async_trait]
    impl TemplateRenderer for StubRenderer {
        async fn render(
            &self,
            template_id: &str,
            data: &Value,
            _opts: &RenderOptions,
        ) -> Result<String, RenderError> {
            Ok(format!("<section>{template_id}:{data}</section>"))
        }
    }

    fn client_navigator() -> (Navigator, Coordinator) {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let coordinator = Coordinator::builder()
            .mode(Mode::Client)
            .config(PagerConfig::default())
            .scheduler(Arc::new(TokioScheduler::new()))
            .renderer(Arc::new(StubRenderer))
            .build()
            .unwrap();
        let pipeline = coordinator.route_pipeline(
            "nav",
            vec![
                Box::new(coordinator.use_template("t1")),
                Box::new(coordinator.set_data(json!({"n": 1}))),
            ],
        );
        (Navigator::new(pipeline), coordinator)
    }

    #[tokio::test(start_paused = true)]
    async fn navigation_settles_after_the_configured_delay() {
        let (navigator, coordinator) = client_navigator();

        let res = navigator.navigate(NavRequest::new("/a")).await.unwrap();
        assert!(res.handled);
        assert!(coordinator.tree().lock().active_view().is_none());

        tokio::time::sleep(Duration::from_millis(501)).await;
        assert_eq!(coordinator.tree().lock().active_view().unwrap().uri, "/a");
    }

    #[tokio::test(start_paused = true)]
    async fn repeat_and_overlapping_navigations_are_suppressed() {
        let (navigator, coordinator) = client_navigator();

        navigator.navigate(NavRequest::new("/a")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(501)).await;

        // Already active: suppressed, nothing new committed.
        let res = navigator.navigate(NavRequest::new("/a")).await.unwrap();
        assert!(!res.handled);

        // Start toward /b, then request /c before the delay elapses.
        navigator.navigate(NavRequest::new("/b")).await.unwrap();
        let res = navigator.navigate(NavRequest::new("/c")).await.unwrap();
        assert!(!res.handled, "mid-transition navigation must be deferred");

        tokio::time::sleep(Duration::from_millis(501)).await;
        let tree = coordinator.tree();
        let tree = tree.lock();
        assert_eq!(tree.active_view().unwrap().uri, "/b");
        assert_eq!(tree.len(), 2);
    }
}
