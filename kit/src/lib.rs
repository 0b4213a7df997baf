//! saccade facade crate.
//!
//! Re-exports the core coordinator, the async runtime layer, and the markup
//! projection with a single entry point.

pub use saccade_core as core;
#[cfg(feature = "html")]
pub use saccade_html as html;
pub use saccade_runtime as runtime;

pub use saccade_core::{
    Bus, CheckPage, Coordinator, CoordinatorError, Mode, NavRequest, NavResponse, PagerConfig,
    Pipeline, ShowPage, Stage, StageResult,
};
#[cfg(feature = "html")]
pub use saccade_html::HtmlProjection;
pub use saccade_runtime::{NavigateError, Navigator, TokioScheduler};

pub mod prelude {
    pub use saccade_core::prelude::*;
    pub use saccade_runtime::prelude::*;

    #[cfg(feature = "html")]
    pub use saccade_html::HtmlProjection;
}

#[cfg(all(test, feature = "html"))]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use saccade_core::render::{RenderError, RenderOptions, TemplateRenderer};
    use serde_json::{Value, json};
    use std::sync::Arc;

    struct StubRenderer;

    #[async_trait]
    impl TemplateRenderer for StubRenderer {
        async fn render(
            &self,
            template_id: &str,
            data: &Value,
            _opts: &RenderOptions,
        ) -> Result<String, RenderError> {
            Ok(format!("<article>{template_id}:{data}</article>"))
        }
    }

    // The server-side round trip through the public facade: one navigation
    // in, serialized container markup out, no timer left behind.
    #[tokio::test]
    async fn server_render_round_trip() {
        let coordinator = Coordinator::builder()
            .mode(Mode::Server)
            .renderer(Arc::new(StubRenderer))
            .projection(Arc::new(HtmlProjection::new()))
            .build()
            .unwrap();
        let pipeline = coordinator.route_pipeline(
            "route:/foo",
            vec![
                Box::new(coordinator.use_template("t1")),
                Box::new(coordinator.set_data(json!({"x": 1}))),
            ],
        );
        let navigator = Navigator::new(pipeline);

        let res = navigator.navigate(NavRequest::new("/foo")).await.unwrap();
        assert!(res.handled);

        let body = res.body.unwrap();
        assert!(body.starts_with("<body>"));
        assert!(body.contains("data-view-uri=\"/foo\""));
        assert!(body.contains("class=\"active\""));
        assert!(body.contains(r#"<article>t1:{"x":1}</article>"#));
    }
}
