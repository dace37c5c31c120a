use serde::{Deserialize, Serialize};

use crate::error::{AssistError, Outcome};
use crate::executor::batch::{for_each_node, selected_ids};
use crate::node::host::DocumentHost;
use crate::node::node_model::{Node, NodeKind};
use crate::traverse::walker::{Visit, selection_roots, walk};

/// One entry of a bulk rename request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRename {
    pub id: String,
    pub name: String,
}

/// Apply explicit renames. Ids that no longer resolve are skipped.
pub fn rename_layers<H: DocumentHost + ?Sized>(
    host: &mut H,
    changes: &[LayerRename],
) -> Result<Outcome, AssistError> {
    let ids: Vec<String> = changes.iter().map(|c| c.id.clone()).collect();
    let mut names = changes.iter().map(|c| c.name.as_str());
    let changed = for_each_node(host, &ids, "rename_layers", |h, id| {
        let name = names.next().unwrap_or_default();
        h.set_name(id, name).map(|_| true)
    });
    if changed == 0 {
        return Err(AssistError::zero("이름을 변경할 레이어가 없습니다."));
    }
    Ok(Outcome::new(
        changed,
        format!("{changed}개의 레이어 이름을 변경했습니다."),
    ))
}

/// Rename every selected layer and its descendants to `naming_type`,
/// leaving component definitions and instances (and their insides) alone.
pub fn rename_selected<H: DocumentHost + ?Sized>(
    host: &mut H,
    naming_type: &str,
) -> Result<Outcome, AssistError> {
    selected_ids(host)?;

    let mut targets = Vec::new();
    for root in selection_roots(host) {
        walk(root, |node, _| {
            if node.kind.is_reusable() {
                return Visit::Prune;
            }
            targets.push(node.id.clone());
            Visit::Descend
        });
    }

    let changed = for_each_node(host, &targets, "rename_selected", |h, id| {
        h.set_name(id, naming_type).map(|_| true)
    });
    if changed == 0 {
        return Err(AssistError::zero("이름을 변경할 레이어가 없습니다."));
    }
    Ok(Outcome::new(
        changed,
        format!("{changed}개의 레이어 이름을 \"{naming_type}\"으로 변경했습니다."),
    ))
}

/// Naming-guide name for a layer, or `None` to leave it alone.
pub fn auto_name(node: &Node, parent_is_auto_layout: bool) -> Option<&'static str> {
    if node.kind.is_reusable() {
        return None;
    }
    if node.kind == NodeKind::Text {
        return Some("Text");
    }
    if node.has_image_fill() {
        return Some("Image");
    }
    match node.kind {
        NodeKind::Frame | NodeKind::Group => Some(if node.is_auto_layout() {
            "Section"
        } else if parent_is_auto_layout {
            "Item"
        } else {
            "Content"
        }),
        kind if kind.is_primitive_shape() => Some("Item"),
        _ => None,
    }
}

pub fn auto_rename<H: DocumentHost + ?Sized>(host: &mut H) -> Result<Outcome, AssistError> {
    selected_ids(host)?;

    let mut plan: Vec<(String, &'static str)> = Vec::new();
    for root in selection_roots(host) {
        walk(root, |node, ancestors| {
            let parent_auto = ancestors.last().is_some_and(|p| p.is_auto_layout());
            if let Some(name) = auto_name(node, parent_auto) {
                plan.push((node.id.clone(), name));
            }
            if node.kind.is_reusable() {
                Visit::Prune
            } else {
                Visit::Descend
            }
        });
    }

    let ids: Vec<String> = plan.iter().map(|(id, _)| id.clone()).collect();
    let mut names = plan.iter().map(|(_, name)| *name);
    let changed = for_each_node(host, &ids, "auto_rename", |h, id| {
        let name = names.next().unwrap_or_default();
        h.set_name(id, name).map(|_| true)
    });
    if changed == 0 {
        return Err(AssistError::zero("이름을 변경할 레이어가 없습니다."));
    }
    Ok(Outcome::new(
        changed,
        format!("{changed}개의 레이어를 자동으로 네이밍했습니다."),
    ))
}
