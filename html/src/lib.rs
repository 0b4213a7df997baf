//! Markup projection for the saccade render tree.
//!
//! The tree is the state; this crate is one projection of it - the markup a
//! server response carries. Each view serializes to an element tagged with
//! its URI, its deferred-render binding, and the configured transition
//! markers, wrapped in the configured container. Nothing here mutates the
//! tree.

use saccade_core::config::PagerConfig;
use saccade_core::error::CoordinatorError;
use saccade_core::render::Projection;
use saccade_core::tree::{RenderTree, ViewNode};
use serde_json::json;

/// The standard markup projection.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlProjection;

impl HtmlProjection {
    pub fn new() -> Self {
        Self
    }
}

impl Projection for HtmlProjection {
    fn project(&self, tree: &RenderTree, config: &PagerConfig) -> Result<String, CoordinatorError> {
        Ok(serialize_tree(tree, config))
    }
}

/// Serialize the whole tree: every node in insertion order, wrapped in the
/// container element named by the config's selector.
pub fn serialize_tree(tree: &RenderTree, config: &PagerConfig) -> String {
    let (open, close) = container_tags(tree.container_selector());
    let mut out = String::with_capacity(256);
    out.push_str(&open);
    for node in tree.nodes() {
        out.push_str(&serialize_node(node, config));
    }
    out.push_str(&close);
    out
}

/// Serialize one view node.
///
/// The binding directive re-renders the view client-side from the same
/// template and data, so a server-rendered page hydrates without a second
/// render pass diverging from it.
pub fn serialize_node(node: &ViewNode, config: &PagerConfig) -> String {
    let binding = json!({
        "template": node.template_id,
        "data": node.data,
    });

    let mut classes = Vec::new();
    if node.active {
        classes.push(config.active_marker.as_str());
    }
    if node.inactive {
        classes.push(config.inactive_marker.as_str());
    }
    let class_attr = if classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", escape_attr(&classes.join(" ")))
    };

    format!(
        "<div data-view-uri=\"{uri}\" data-view-bind=\"{bind}\"{class_attr}>{content}</div>",
        uri = escape_attr(&node.uri),
        bind = escape_attr(&binding.to_string()),
        content = node.content,
    )
}

/// The container element for a selector: `body` style tag names map to that
/// tag, `#id` and `.class` map to a tagged `<div>`.
fn container_tags(selector: &str) -> (String, String) {
    if let Some(id) = selector.strip_prefix('#') {
        (
            format!("<div id=\"{}\">", escape_attr(id)),
            "</div>".to_string(),
        )
    } else if let Some(class) = selector.strip_prefix('.') {
        (
            format!("<div class=\"{}\">", escape_attr(class)),
            "</div>".to_string(),
        )
    } else {
        (format!("<{selector}>"), format!("</{selector}>"))
    }
}

/// Escape a string for use inside a double-quoted attribute value.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
