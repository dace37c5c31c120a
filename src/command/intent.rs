use serde::Serialize;

use crate::node::node_model::Rgb;

/// A parsed command, ready for the executor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    /// `search>replacement`: replace the first occurrence inside every text
    /// leaf containing `search`.
    ReplaceText { search: String, replacement: String },
    /// `>text` or a quoted replacement: overwrite every text leaf.
    ReplaceAllText { text: String },
    SetColor { hex: String, color: Rgb },
    ResizeWidth { width: u32 },
    ResizeHeight { height: u32 },
    /// `percent` is already clamped to 0..=100.
    SetOpacity { percent: u32 },
    Duplicate,
    Delete,
    SetFontSize { size: u32 },
    Move { dx: i64, dy: i64 },
    Show,
    Hide,
    Rename { name: String },
    SetCornerRadius { radius: u32 },
}

impl Intent {
    /// Stable operation name for logs and the journal.
    pub fn operation(&self) -> &'static str {
        match self {
            Intent::ReplaceText { .. } => "replace_text",
            Intent::ReplaceAllText { .. } => "replace_all_text",
            Intent::SetColor { .. } => "set_color",
            Intent::ResizeWidth { .. } => "resize_width",
            Intent::ResizeHeight { .. } => "resize_height",
            Intent::SetOpacity { .. } => "set_opacity",
            Intent::Duplicate => "duplicate",
            Intent::Delete => "delete",
            Intent::SetFontSize { .. } => "set_font_size",
            Intent::Move { .. } => "move",
            Intent::Show => "show",
            Intent::Hide => "hide",
            Intent::Rename { .. } => "rename",
            Intent::SetCornerRadius { .. } => "set_corner_radius",
        }
    }

    pub fn opacity_fraction(percent: u32) -> f64 {
        f64::from(percent.min(100)) / 100.0
    }
}
