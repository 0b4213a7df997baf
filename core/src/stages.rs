//! Configuration-time stage builders.
//!
//! Routes are wired at startup from small reusable stages: one attaches a
//! fixed data payload, one selects a template. Template stages are memoized
//! per identifier on the [`StageCache`] so wiring fifty routes to the same
//! template shares one stage instance.

use crate::bus::Bus;
use crate::metadata::StageMetadata;
use crate::stage::{Stage, StageResult};
use ahash::AHashMap;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Unconditionally attaches a fixed data payload to the pending response.
pub struct SetData {
    id: Uuid,
    data: Value,
}

impl SetData {
    pub fn new(data: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            data,
        }
    }
}

#[async_trait]
impl Stage for SetData {
    fn metadata(&self) -> StageMetadata {
        StageMetadata {
            id: self.id,
            label: "setdata".to_string(),
            description: None,
        }
    }

    async fn execute(&self, bus: &mut Bus) -> StageResult {
        bus.res.data = Some(self.data.clone());
        StageResult::Continue
    }
}

/// Attaches a template identifier to the pending response.
pub struct UseTemplate {
    id: Uuid,
    template_id: String,
}

impl UseTemplate {
    pub fn new(template_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            template_id: template_id.into(),
        }
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }
}

#[async_trait]
impl Stage for UseTemplate {
    fn metadata(&self) -> StageMetadata {
        StageMetadata {
            id: self.id,
            label: format!("usetemplate:{}", self.template_id),
            description: None,
        }
    }

    async fn execute(&self, bus: &mut Bus) -> StageResult {
        bus.res.template_id = Some(self.template_id.clone());
        StageResult::Continue
    }
}

/// Per-context memo for template stages.
///
/// Owned by the coordinator context rather than living process-wide, so two
/// coordinators never share stage instances.
#[derive(Default)]
pub struct StageCache {
    templates: AHashMap<String, Arc<UseTemplate>>,
}

impl StageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The memoized template stage for `template_id`, building it on first
    /// use.
    pub fn use_template(&mut self, template_id: &str) -> Arc<UseTemplate> {
        self.templates
            .entry(template_id.to_string())
            .or_insert_with(|| Arc::new(UseTemplate::new(template_id)))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
