use serde::{Deserialize, Serialize};

use crate::traverse::walker::HasChildren;

// ============================================================================
// Scene-graph node as exposed by the host
// ============================================================================

/// Node kinds the host can report. Container behaviour is NOT derived from
/// this; see `Node::child_nodes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Document,
    Page,
    Frame,
    Group,
    Section,
    Component,
    ComponentSet,
    Instance,
    Text,
    Rectangle,
    Ellipse,
    Polygon,
    Star,
    Line,
    Vector,
    BooleanOperation,
    Slice,
    #[serde(other)]
    Other,
}

impl NodeKind {
    /// Reusable-component mechanism (definitions, variants, instances).
    pub fn is_reusable(self) -> bool {
        matches!(
            self,
            NodeKind::Component | NodeKind::ComponentSet | NodeKind::Instance
        )
    }

    pub fn is_primitive_shape(self) -> bool {
        matches!(
            self,
            NodeKind::Rectangle
                | NodeKind::Ellipse
                | NodeKind::Polygon
                | NodeKind::Star
                | NodeKind::Line
                | NodeKind::Vector
        )
    }

    /// Documents and pages are not layers; they cannot be moved or resized.
    pub fn is_layer(self) -> bool {
        !matches!(self, NodeKind::Document | NodeKind::Page)
    }

    /// Short label used by the layer list.
    pub fn short_label(self) -> &'static str {
        match self {
            NodeKind::Frame => "Frame",
            NodeKind::Group => "Group",
            NodeKind::Text => "Text",
            NodeKind::Rectangle => "Rect",
            NodeKind::Ellipse => "Ellipse",
            NodeKind::Vector => "Vector",
            NodeKind::Component => "Comp",
            NodeKind::Instance => "Inst",
            NodeKind::ComponentSet => "Set",
            NodeKind::Line => "Line",
            NodeKind::Polygon => "Poly",
            NodeKind::Star => "Star",
            NodeKind::BooleanOperation => "Bool",
            NodeKind::Slice => "Slice",
            NodeKind::Section => "Sect",
            NodeKind::Document => "DOCUMENT",
            NodeKind::Page => "PAGE",
            NodeKind::Other => "OTHER",
        }
    }

    /// Upper-case host type name, e.g. `FRAME`.
    pub fn type_name(self) -> &'static str {
        match self {
            NodeKind::Document => "DOCUMENT",
            NodeKind::Page => "PAGE",
            NodeKind::Frame => "FRAME",
            NodeKind::Group => "GROUP",
            NodeKind::Section => "SECTION",
            NodeKind::Component => "COMPONENT",
            NodeKind::ComponentSet => "COMPONENT_SET",
            NodeKind::Instance => "INSTANCE",
            NodeKind::Text => "TEXT",
            NodeKind::Rectangle => "RECTANGLE",
            NodeKind::Ellipse => "ELLIPSE",
            NodeKind::Polygon => "POLYGON",
            NodeKind::Star => "STAR",
            NodeKind::Line => "LINE",
            NodeKind::Vector => "VECTOR",
            NodeKind::BooleanOperation => "BOOLEAN_OPERATION",
            NodeKind::Slice => "SLICE",
            NodeKind::Other => "OTHER",
        }
    }
}

/// Colour channels normalised to 0..=1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaleMode {
    #[default]
    Fill,
    Fit,
    Crop,
    Tile,
}

/// One entry of a node's fill or stroke list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    Solid {
        color: Rgb,
        #[serde(default = "default_opacity")]
        opacity: f64,
        #[serde(default = "default_true")]
        visible: bool,
        /// Design-token variable bound to the colour, if any.
        #[serde(
            rename = "boundVariable",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        bound_variable: Option<String>,
    },
    Image {
        #[serde(rename = "imageHash")]
        image_hash: String,
        #[serde(rename = "scaleMode", default)]
        scale_mode: ScaleMode,
        #[serde(default = "default_true")]
        visible: bool,
        #[serde(default = "default_opacity")]
        opacity: f64,
    },
    GradientLinear,
    GradientRadial,
    #[serde(other)]
    Unsupported,
}

impl Paint {
    pub fn solid(color: Rgb) -> Self {
        Paint::Solid {
            color,
            opacity: 1.0,
            visible: true,
            bound_variable: None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Paint::Image { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontRef {
    pub family: String,
    pub style: String,
}

impl std::fmt::Display for FontRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.family, self.style)
    }
}

/// A text leaf's font: a single font, or one per styled run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontName {
    Single(FontRef),
    Mixed(Vec<FontRef>),
}

impl FontName {
    /// Fonts to load before writing text, duplicates removed, order kept.
    pub fn required_fonts(&self) -> Vec<&FontRef> {
        match self {
            FontName::Single(font) => vec![font],
            FontName::Mixed(runs) => {
                let mut out: Vec<&FontRef> = Vec::new();
                for font in runs {
                    if !out.contains(&font) {
                        out.push(font);
                    }
                }
                out
            }
        }
    }

    pub fn primary(&self) -> Option<&FontRef> {
        match self {
            FontName::Single(font) => Some(font),
            FontName::Mixed(runs) => runs.first(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// A node of the host document. Optional fields model capabilities: a node
/// "has fills" when `fills` is present, "is a container" when `children` is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default = "default_true")]
    pub visible: bool,

    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_mode: Option<LayoutMode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fills: Option<Vec<Paint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strokes: Option<Vec<Paint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_style_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_style_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<FontName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_style_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Bare node with no capabilities beyond identity and geometry.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            visible: true,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            opacity: None,
            corner_radius: None,
            layout_mode: None,
            fills: None,
            strokes: None,
            fill_style_id: None,
            stroke_style_id: None,
            characters: None,
            font_name: None,
            font_size: None,
            text_style_id: None,
            children: None,
        }
    }

    pub fn is_auto_layout(&self) -> bool {
        matches!(
            self.layout_mode,
            Some(LayoutMode::Horizontal) | Some(LayoutMode::Vertical)
        )
    }

    pub fn has_image_fill(&self) -> bool {
        self.fills
            .as_ref()
            .is_some_and(|fills| fills.iter().any(Paint::is_image))
    }

    pub fn first_solid_fill(&self) -> Option<Rgb> {
        match self.fills.as_ref()?.first()? {
            Paint::Solid { color, .. } => Some(*color),
            _ => None,
        }
    }
}

impl HasChildren for Node {
    fn child_nodes(&self) -> Option<&[Node]> {
        self.children.as_deref()
    }
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f64 {
    1.0
}
