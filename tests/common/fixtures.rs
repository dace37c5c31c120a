use std::cell::RefCell;

use canvas_assist::fill::image::{FetchError, ImageSource};
use canvas_assist::node::color::parse_hex;
use canvas_assist::node::host::{Style, StyleKind};
use canvas_assist::node::memory::MemoryDocument;
use canvas_assist::node::node_model::{
    FontName, FontRef, LayoutMode, Node, NodeKind, Paint, Rgb,
};

// =========================================================================
// Node builders
// =========================================================================

pub fn rgb(hex: &str) -> Rgb {
    parse_hex(hex).unwrap()
}

pub fn font(family: &str) -> FontRef {
    FontRef {
        family: family.to_string(),
        style: "Regular".to_string(),
    }
}

pub fn frame(id: &str, name: &str, children: Vec<Node>) -> Node {
    let mut node = Node::new(id, name, NodeKind::Frame);
    node.width = 200.0;
    node.height = 100.0;
    node.opacity = Some(1.0);
    node.corner_radius = Some(0.0);
    node.layout_mode = Some(LayoutMode::None);
    node.fills = Some(Vec::new());
    node.children = Some(children);
    node
}

pub fn auto_frame(id: &str, name: &str, children: Vec<Node>) -> Node {
    let mut node = frame(id, name, children);
    node.layout_mode = Some(LayoutMode::Vertical);
    node
}

pub fn group(id: &str, name: &str, children: Vec<Node>) -> Node {
    let mut node = Node::new(id, name, NodeKind::Group);
    node.opacity = Some(1.0);
    node.children = Some(children);
    node
}

pub fn instance(id: &str, name: &str, children: Vec<Node>) -> Node {
    let mut node = Node::new(id, name, NodeKind::Instance);
    node.opacity = Some(1.0);
    node.fills = Some(Vec::new());
    node.children = Some(children);
    node
}

pub fn component(id: &str, name: &str, children: Vec<Node>) -> Node {
    let mut node = instance(id, name, children);
    node.kind = NodeKind::Component;
    node
}

pub fn text(id: &str, name: &str, characters: &str) -> Node {
    text_in_font(id, name, characters, "Inter")
}

pub fn text_in_font(id: &str, name: &str, characters: &str, family: &str) -> Node {
    let mut node = Node::new(id, name, NodeKind::Text);
    node.width = 120.0;
    node.height = 20.0;
    node.opacity = Some(1.0);
    node.characters = Some(characters.to_string());
    node.font_name = Some(FontName::Single(font(family)));
    node.font_size = Some(16.0);
    node.fills = Some(vec![Paint::solid(rgb("#000000"))]);
    node
}

pub fn rect(id: &str, name: &str, hex: &str) -> Node {
    let mut node = Node::new(id, name, NodeKind::Rectangle);
    node.width = 50.0;
    node.height = 50.0;
    node.opacity = Some(1.0);
    node.corner_radius = Some(0.0);
    node.fills = Some(vec![Paint::solid(rgb(hex))]);
    node
}

pub fn paint_style(id: &str, name: &str, hex: &str) -> Style {
    Style {
        id: id.to_string(),
        name: name.to_string(),
        kind: StyleKind::Paint,
        color: Some(rgb(hex)),
        font_name: None,
        font_size: None,
    }
}

pub fn text_style(id: &str, name: &str, family: &str, size: f64) -> Style {
    Style {
        id: id.to_string(),
        name: name.to_string(),
        kind: StyleKind::Text,
        color: None,
        font_name: Some(font(family)),
        font_size: Some(size),
    }
}

/// Document holding `nodes` with `selection` selected.
pub fn doc(nodes: Vec<Node>, selection: &[&str]) -> MemoryDocument {
    MemoryDocument::from_nodes(nodes).with_selection(selection)
}

pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-3
}

// =========================================================================
// Image source stub
// =========================================================================

pub const STUB_IMAGE: &[u8] = b"\x89PNG stub image";

/// Serves fixed bytes and records every requested URL.
#[derive(Default)]
pub struct StubImages {
    pub fail: bool,
    pub requested: RefCell<Vec<String>>,
}

impl StubImages {
    pub fn failing() -> Self {
        Self {
            fail: true,
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl ImageSource for StubImages {
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.requested.borrow_mut().push(url.to_string());
        if self.fail {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: 503,
            });
        }
        Ok(STUB_IMAGE.to_vec())
    }
}
