use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::fingerprint::fingerprint;
use crate::node::host::{DocumentHost, HostError, HostResult, PaintTarget, Style, StyleKind};
use crate::node::node_model::{FontRef, Node, NodeKind, Paint, Rgb};
use crate::traverse::walker::HasChildren;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("could not read document {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk form of a document: the node forest plus host-side registries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFile {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub selection: Vec<String>,
    #[serde(default)]
    pub styles: Vec<Style>,
    /// Font families the host cannot load.
    #[serde(default)]
    pub unavailable_fonts: Vec<String>,
    /// Registered image hashes and their byte sizes.
    #[serde(default)]
    pub images: HashMap<String, usize>,
}

/// In-process host backed by a `DocumentFile`.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    file: DocumentFile,
    loaded_fonts: HashSet<FontRef>,
    copies: u32,
}

impl MemoryDocument {
    pub fn new(file: DocumentFile) -> Self {
        Self {
            file,
            loaded_fonts: HashSet::new(),
            copies: 0,
        }
    }

    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self::new(DocumentFile {
            nodes,
            ..DocumentFile::default()
        })
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let json = serde_json::to_string_pretty(&self.file)?;
        std::fs::write(path, json).map_err(|source| DocumentError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn file(&self) -> &DocumentFile {
        &self.file
    }

    pub fn with_selection(mut self, ids: &[&str]) -> Self {
        self.file.selection = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn with_styles(mut self, styles: Vec<Style>) -> Self {
        self.file.styles = styles;
        self
    }

    pub fn with_unavailable_font(mut self, family: &str) -> Self {
        self.file.unavailable_fonts.push(family.to_string());
        self
    }

    fn node_mut(&mut self, id: &str) -> HostResult<&mut Node> {
        find_mut(&mut self.file.nodes, id).ok_or_else(|| HostError::NodeNotFound(id.to_string()))
    }

    fn fonts_loaded_for(&self, node: &Node) -> bool {
        match &node.font_name {
            Some(font) => font
                .required_fonts()
                .iter()
                .all(|f| self.loaded_fonts.contains(*f)),
            None => true,
        }
    }

    fn editable_text(&self, id: &str) -> HostResult<()> {
        let node = self
            .resolve_node(id)
            .ok_or_else(|| HostError::NodeNotFound(id.to_string()))?;
        if node.kind != NodeKind::Text {
            return Err(HostError::Unsupported {
                id: id.to_string(),
                capability: "text content",
            });
        }
        if !self.fonts_loaded_for(node) {
            return Err(HostError::FontNotLoaded(id.to_string()));
        }
        Ok(())
    }
}

fn find<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = node.child_nodes().and_then(|c| find(c, id)) {
            return Some(found);
        }
    }
    None
}

fn find_mut<'a>(nodes: &'a mut [Node], id: &str) -> Option<&'a mut Node> {
    for node in nodes.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let Some(children) = node.children.as_mut() {
            if let Some(found) = find_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn remove_from(nodes: &mut Vec<Node>, id: &str) -> Option<Node> {
    if let Some(pos) = nodes.iter().position(|n| n.id == id) {
        return Some(nodes.remove(pos));
    }
    for node in nodes.iter_mut() {
        if let Some(children) = node.children.as_mut() {
            if let Some(removed) = remove_from(children, id) {
                return Some(removed);
            }
        }
    }
    None
}

/// Insert `node` right after its sibling `after_id`.
fn insert_after(nodes: &mut Vec<Node>, after_id: &str, node: Node) -> Result<(), Node> {
    if let Some(pos) = nodes.iter().position(|n| n.id == after_id) {
        nodes.insert(pos + 1, node);
        return Ok(());
    }
    let mut pending = node;
    for sibling in nodes.iter_mut() {
        if let Some(children) = sibling.children.as_mut() {
            match insert_after(children, after_id, pending) {
                Ok(()) => return Ok(()),
                Err(back) => pending = back,
            }
        }
    }
    Err(pending)
}

fn collect_ids(node: &Node, out: &mut Vec<String>) {
    out.push(node.id.clone());
    if let Some(children) = node.children.as_deref() {
        for child in children {
            collect_ids(child, out);
        }
    }
}

fn reassign_ids(node: &mut Node, suffix: &str) {
    node.id = format!("{}{}", node.id, suffix);
    if let Some(children) = node.children.as_mut() {
        for child in children {
            reassign_ids(child, suffix);
        }
    }
}

impl DocumentHost for MemoryDocument {
    fn current_selection(&self) -> Vec<String> {
        self.file.selection.clone()
    }

    fn set_selection(&mut self, ids: Vec<String>) {
        self.file.selection = ids;
    }

    fn resolve_node(&self, id: &str) -> Option<&Node> {
        find(&self.file.nodes, id)
    }

    fn set_name(&mut self, id: &str, name: &str) -> HostResult<()> {
        self.node_mut(id)?.name = name.to_string();
        Ok(())
    }

    fn set_position(&mut self, id: &str, x: f64, y: f64) -> HostResult<()> {
        let node = self.node_mut(id)?;
        if !node.kind.is_layer() {
            return Err(HostError::Unsupported {
                id: id.to_string(),
                capability: "position",
            });
        }
        node.x = x;
        node.y = y;
        Ok(())
    }

    fn resize(&mut self, id: &str, width: f64, height: f64) -> HostResult<()> {
        let node = self.node_mut(id)?;
        if !node.kind.is_layer() {
            return Err(HostError::Unsupported {
                id: id.to_string(),
                capability: "resize",
            });
        }
        node.width = width;
        node.height = height;
        Ok(())
    }

    fn set_visible(&mut self, id: &str, visible: bool) -> HostResult<()> {
        self.node_mut(id)?.visible = visible;
        Ok(())
    }

    fn set_opacity(&mut self, id: &str, opacity: f64) -> HostResult<()> {
        let node = self.node_mut(id)?;
        match node.opacity.as_mut() {
            Some(current) => {
                *current = opacity.clamp(0.0, 1.0);
                Ok(())
            }
            None => Err(HostError::Unsupported {
                id: id.to_string(),
                capability: "opacity",
            }),
        }
    }

    fn set_corner_radius(&mut self, id: &str, radius: f64) -> HostResult<()> {
        let node = self.node_mut(id)?;
        match node.corner_radius.as_mut() {
            Some(current) => {
                *current = radius;
                Ok(())
            }
            None => Err(HostError::Unsupported {
                id: id.to_string(),
                capability: "corner radius",
            }),
        }
    }

    fn set_fills(&mut self, id: &str, fills: Vec<Paint>) -> HostResult<()> {
        let node = self.node_mut(id)?;
        if node.fills.is_none() {
            return Err(HostError::Unsupported {
                id: id.to_string(),
                capability: "fills",
            });
        }
        node.fills = Some(fills);
        node.fill_style_id = None;
        Ok(())
    }

    fn load_font(&mut self, font: &FontRef) -> HostResult<()> {
        if self.file.unavailable_fonts.iter().any(|f| f == &font.family) {
            return Err(HostError::FontUnavailable(font.to_string()));
        }
        self.loaded_fonts.insert(font.clone());
        Ok(())
    }

    fn set_characters(&mut self, id: &str, text: &str) -> HostResult<()> {
        self.editable_text(id)?;
        self.node_mut(id)?.characters = Some(text.to_string());
        Ok(())
    }

    fn set_font_size(&mut self, id: &str, size: f64) -> HostResult<()> {
        self.editable_text(id)?;
        self.node_mut(id)?.font_size = Some(size);
        Ok(())
    }

    fn clone_node(&mut self, id: &str) -> HostResult<String> {
        let mut copy = self
            .resolve_node(id)
            .cloned()
            .ok_or_else(|| HostError::NodeNotFound(id.to_string()))?;
        let mut ids = Vec::new();
        collect_ids(&copy, &mut ids);

        // Copies counted in an earlier session are already in the tree.
        let suffix = loop {
            self.copies += 1;
            let suffix = format!("-copy-{}", self.copies);
            if ids
                .iter()
                .all(|id| find(&self.file.nodes, &format!("{id}{suffix}")).is_none())
            {
                break suffix;
            }
        };
        reassign_ids(&mut copy, &suffix);
        let new_id = copy.id.clone();
        insert_after(&mut self.file.nodes, id, copy)
            .map_err(|_| HostError::NodeNotFound(id.to_string()))?;
        Ok(new_id)
    }

    fn remove_node(&mut self, id: &str) -> HostResult<()> {
        remove_from(&mut self.file.nodes, id)
            .map(|_| ())
            .ok_or_else(|| HostError::NodeNotFound(id.to_string()))?;
        self.file.selection.retain(|s| s != id);
        Ok(())
    }

    fn create_image(&mut self, bytes: &[u8]) -> HostResult<String> {
        if bytes.is_empty() {
            return Err(HostError::Image("empty image data".into()));
        }
        let hash = fingerprint(bytes);
        self.file.images.insert(hash.clone(), bytes.len());
        Ok(hash)
    }

    fn styles(&self) -> Vec<Style> {
        self.file.styles.clone()
    }

    fn style(&self, id: &str) -> Option<Style> {
        self.file.styles.iter().find(|s| s.id == id).cloned()
    }

    fn style_by_name(&self, name: &str) -> Option<Style> {
        self.file.styles.iter().find(|s| s.name == name).cloned()
    }

    fn create_paint_style(&mut self, name: &str, color: Rgb) -> HostResult<Style> {
        let mut n = self.file.styles.len() + 1;
        while self.file.styles.iter().any(|s| s.id == format!("S:{n}")) {
            n += 1;
        }
        let style = Style {
            id: format!("S:{n}"),
            name: name.to_string(),
            kind: StyleKind::Paint,
            color: Some(color),
            font_name: None,
            font_size: None,
        };
        self.file.styles.push(style.clone());
        Ok(style)
    }

    fn bind_paint_style(
        &mut self,
        id: &str,
        target: PaintTarget,
        style_id: &str,
    ) -> HostResult<()> {
        let color = self
            .style(style_id)
            .filter(|s| s.kind == StyleKind::Paint)
            .and_then(|s| s.color)
            .ok_or_else(|| HostError::StyleNotFound(style_id.to_string()))?;
        let node = self.node_mut(id)?;
        let (paints, slot) = match target {
            PaintTarget::Fill => (&mut node.fills, &mut node.fill_style_id),
            PaintTarget::Stroke => (&mut node.strokes, &mut node.stroke_style_id),
        };
        let paints = paints.as_mut().ok_or(HostError::Unsupported {
            id: id.to_string(),
            capability: "paint styles",
        })?;
        for paint in paints.iter_mut() {
            if let Paint::Solid { color: c, .. } = paint {
                *c = color;
            }
        }
        *slot = Some(style_id.to_string());
        Ok(())
    }

    fn bind_text_style(&mut self, id: &str, style_id: &str) -> HostResult<()> {
        let style = self
            .style(style_id)
            .filter(|s| s.kind == StyleKind::Text)
            .ok_or_else(|| HostError::StyleNotFound(style_id.to_string()))?;
        let node = self.node_mut(id)?;
        if node.kind != NodeKind::Text {
            return Err(HostError::Unsupported {
                id: id.to_string(),
                capability: "text styles",
            });
        }
        node.text_style_id = Some(style.id);
        Ok(())
    }
}
