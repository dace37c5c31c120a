use serde::{Deserialize, Serialize};

use crate::error::AssistError;
use crate::node::color::to_hex;
use crate::node::host::DocumentHost;
use crate::node::node_model::{Node, NodeKind};
use crate::traverse::walker::{
    collect_text_nodes, count_name_matches, selection_roots, shallow_collect,
};

/// Row of the layer list shown before renaming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCount {
    pub selection_count: usize,
    pub matching_count: usize,
}

fn describe(node: &Node) -> String {
    let mut info = format!("[{}] {}\n", node.kind.type_name(), node.name);
    info.push_str(&format!("  - ID: {}\n", node.id));
    info.push_str(&format!(
        "  - 위치: ({}, {})\n",
        node.x.round(),
        node.y.round()
    ));
    info.push_str(&format!(
        "  - 크기: {} x {}\n",
        node.width.round(),
        node.height.round()
    ));

    if node.kind == NodeKind::Text {
        info.push_str(&format!(
            "  - 텍스트: \"{}\"\n",
            node.characters.as_deref().unwrap_or("")
        ));
        if let Some(size) = node.font_size {
            info.push_str(&format!("  - 폰트 크기: {size}\n"));
        }
    }

    if let Some(color) = node.first_solid_fill() {
        info.push_str(&format!("  - 배경색: {}\n", to_hex(&color)));
    }

    if let Some(opacity) = node.opacity {
        info.push_str(&format!("  - 투명도: {}%\n", (opacity * 100.0).round()));
    }

    info
}

/// Human-readable description of every selected node.
pub fn selection_info<H: DocumentHost + ?Sized>(host: &H) -> String {
    let roots = selection_roots(host);
    if roots.is_empty() {
        return "선택된 레이어가 없습니다.".to_string();
    }
    roots
        .into_iter()
        .map(describe)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Selected layers and their direct children.
pub fn load_layers<H: DocumentHost + ?Sized>(host: &H) -> Result<Vec<LayerInfo>, AssistError> {
    let roots = selection_roots(host);
    if roots.is_empty() {
        return Err(AssistError::empty_selection());
    }
    Ok(roots
        .into_iter()
        .flat_map(shallow_collect)
        .map(|node| LayerInfo {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.kind.short_label().to_string(),
        })
        .collect())
}

/// How many layers under the selection are named `field_name`.
pub fn count_matching<H: DocumentHost + ?Sized>(host: &H, field_name: &str) -> MatchCount {
    let roots = selection_roots(host);
    MatchCount {
        selection_count: roots.len(),
        matching_count: roots
            .iter()
            .map(|root| count_name_matches(root, field_name))
            .sum(),
    }
}

/// Text of every non-blank text leaf under the selection, for spell checking.
pub fn spell_check_texts<H: DocumentHost + ?Sized>(host: &H) -> Result<Vec<String>, AssistError> {
    let roots = selection_roots(host);
    if roots.is_empty() {
        return Err(AssistError::empty_selection());
    }
    let texts: Vec<String> = roots
        .into_iter()
        .flat_map(collect_text_nodes)
        .filter_map(|node| node.characters.as_deref())
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
        .collect();
    if texts.is_empty() {
        return Err(AssistError::zero("검사할 텍스트가 없습니다."));
    }
    Ok(texts)
}
