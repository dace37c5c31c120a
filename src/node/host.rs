use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::node_model::{FontRef, Node, Paint, Rgb};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HostError {
    /// The id no longer resolves (removed between traversal and mutation).
    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("node {id} does not support {capability}")]
    Unsupported { id: String, capability: &'static str },

    #[error("font unavailable: {0}")]
    FontUnavailable(String),

    /// Text content or size written before the node's fonts were loaded.
    #[error("font not loaded for node {0}")]
    FontNotLoaded(String),

    #[error("style not found: {0}")]
    StyleNotFound(String),

    #[error("image error: {0}")]
    Image(String),
}

pub type HostResult<T> = Result<T, HostError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StyleKind {
    Paint,
    Text,
}

/// Entry of the host's shared style registry (design tokens).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub id: String,
    pub name: String,
    pub kind: StyleKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<FontRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintTarget {
    Fill,
    Stroke,
}

/// Capability set of the live document host. All tree data is owned by the
/// host; callers hold ids and re-resolve before every mutation.
pub trait DocumentHost {
    fn current_selection(&self) -> Vec<String>;
    fn set_selection(&mut self, ids: Vec<String>);
    fn resolve_node(&self, id: &str) -> Option<&Node>;

    fn set_name(&mut self, id: &str, name: &str) -> HostResult<()>;
    fn set_position(&mut self, id: &str, x: f64, y: f64) -> HostResult<()>;
    fn resize(&mut self, id: &str, width: f64, height: f64) -> HostResult<()>;
    fn set_visible(&mut self, id: &str, visible: bool) -> HostResult<()>;
    fn set_opacity(&mut self, id: &str, opacity: f64) -> HostResult<()>;
    fn set_corner_radius(&mut self, id: &str, radius: f64) -> HostResult<()>;
    fn set_fills(&mut self, id: &str, fills: Vec<Paint>) -> HostResult<()>;

    /// Must be called for every font of a text leaf before its content or
    /// size is written.
    fn load_font(&mut self, font: &FontRef) -> HostResult<()>;
    fn set_characters(&mut self, id: &str, text: &str) -> HostResult<()>;
    fn set_font_size(&mut self, id: &str, size: f64) -> HostResult<()>;

    fn clone_node(&mut self, id: &str) -> HostResult<String>;
    fn remove_node(&mut self, id: &str) -> HostResult<()>;

    /// Register encoded image bytes, returning the image hash.
    fn create_image(&mut self, bytes: &[u8]) -> HostResult<String>;

    fn styles(&self) -> Vec<Style>;
    fn style(&self, id: &str) -> Option<Style>;
    fn style_by_name(&self, name: &str) -> Option<Style>;
    fn create_paint_style(&mut self, name: &str, color: Rgb) -> HostResult<Style>;
    fn bind_paint_style(&mut self, id: &str, target: PaintTarget, style_id: &str)
        -> HostResult<()>;
    fn bind_text_style(&mut self, id: &str, style_id: &str) -> HostResult<()>;
}
