//! Bus - the per-navigation carrier.
//!
//! A `Bus` owns the typed request/response records for one navigation plus a
//! type-keyed resource map for anything collaborators want to hand each
//! other. No string keys, no duck typing: a resource is addressed by its
//! type, and a mismatch is a compile error at the call site.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// An intent to display a given URI, originating from routing logic.
///
/// Ephemeral: constructed by the router, consumed by the navigation gate,
/// dropped after handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavRequest {
    pub uri: String,
    /// Set when the router is re-running navigation for a page refresh;
    /// relaxes the mid-transition suppression in the gate.
    #[serde(default)]
    pub refreshing: bool,
}

impl NavRequest {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            refreshing: false,
        }
    }

    pub fn refreshing(mut self) -> Self {
        self.refreshing = true;
        self
    }
}

/// The pending response record stages write into.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavResponse {
    /// Template selected by an upstream stage; absent means the committer
    /// passes through without rendering.
    pub template_id: Option<String>,
    /// Data payload for the deferred render. Defaults to an empty object at
    /// commit time.
    pub data: Option<Value>,
    /// Set once a view has been committed; downstream stages must not
    /// re-render.
    pub handled: bool,
    /// Serialized container contents, server mode only.
    pub body: Option<String>,
}

pub struct Bus {
    pub req: NavRequest,
    pub res: NavResponse,
    resources: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Bus {
    pub fn new(req: NavRequest) -> Self {
        Self {
            req,
            res: NavResponse::default(),
            resources: HashMap::new(),
        }
    }

    /// Insert a resource. A resource of the same type is replaced.
    pub fn insert<T: Send + Sync + 'static>(&mut self, resource: T) {
        self.resources.insert(TypeId::of::<T>(), Box::new(resource));
    }

    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.resources
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref())
    }

    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.resources
            .get_mut(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_mut())
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.resources.contains_key(&TypeId::of::<T>())
    }

    pub fn remove<T: 'static>(&mut self) -> Option<T> {
        self.resources
            .remove(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast().ok())
            .map(|boxed| *boxed)
    }
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field("uri", &self.req.uri)
            .field("handled", &self.res.handled)
            .field("resource_count", &self.resources.len())
            .finish()
    }
}
