use crate::node::host::DocumentHost;
use crate::node::node_model::{Node, NodeKind};

/// Hard cap on recursion depth for every walk; roots are depth 0.
pub const MAX_DEPTH: usize = 10;

/// Layer-name fragments that mark a node as an image slot.
pub const IMAGE_NAME_HINTS: [&str; 6] = ["avatar", "profile", "image", "photo", "thumbnail", "img"];

/// Structural container capability. Anything exposing children is walked,
/// whatever its kind.
pub trait HasChildren: Sized {
    fn child_nodes(&self) -> Option<&[Self]>;
}

/// Visitor verdict for the node just seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Descend,
    Prune,
}

/// Depth-first pre-order walk preserving child order. The visitor receives
/// the node and its ancestors (outermost first).
pub fn walk<'a, N, F>(root: &'a N, mut visit: F)
where
    N: HasChildren,
    F: FnMut(&'a N, &[&'a N]) -> Visit,
{
    let mut ancestors = Vec::new();
    walk_inner(root, 0, &mut ancestors, &mut visit);
}

fn walk_inner<'a, N, F>(node: &'a N, depth: usize, ancestors: &mut Vec<&'a N>, visit: &mut F)
where
    N: HasChildren,
    F: FnMut(&'a N, &[&'a N]) -> Visit,
{
    if depth > MAX_DEPTH {
        return;
    }
    if visit(node, ancestors) == Visit::Prune {
        return;
    }
    if let Some(children) = node.child_nodes() {
        ancestors.push(node);
        for child in children {
            walk_inner(child, depth + 1, ancestors, visit);
        }
        ancestors.pop();
    }
}

/// Resolve the host's current selection, dropping ids that no longer resolve.
pub fn selection_roots<H: DocumentHost + ?Sized>(host: &H) -> Vec<&Node> {
    host.current_selection()
        .iter()
        .filter_map(|id| host.resolve_node(id))
        .collect()
}

/// Every text leaf under `root`. A text node ends its own subtree.
pub fn collect_text_nodes<'a>(root: &'a Node) -> Vec<&'a Node> {
    let mut found = Vec::new();
    walk(root, |node: &'a Node, _| {
        if node.kind == NodeKind::Text {
            found.push(node);
            Visit::Prune
        } else {
            Visit::Descend
        }
    });
    found
}

pub fn find_text_containing<'a>(root: &'a Node, needle: &str) -> Vec<&'a Node> {
    collect_text_nodes(root)
        .into_iter()
        .filter(|node| {
            node.characters
                .as_deref()
                .is_some_and(|text| text.contains(needle))
        })
        .collect()
}

/// Nodes whose name equals `target` ignoring case. Matching nodes are still
/// descended into.
pub fn collect_name_matches<'a>(root: &'a Node, target: &str) -> Vec<&'a Node> {
    let target = target.to_lowercase();
    let mut found = Vec::new();
    walk(root, |node: &'a Node, _| {
        if node.name.to_lowercase() == target {
            found.push(node);
        }
        Visit::Descend
    });
    found
}

pub fn count_name_matches(root: &Node, target: &str) -> usize {
    collect_name_matches(root, target).len()
}

fn has_image_name(node: &Node) -> bool {
    let name = node.name.to_lowercase();
    IMAGE_NAME_HINTS.iter().any(|hint| name.contains(hint))
}

fn is_fillable(node: &Node) -> bool {
    if node.fills.is_some() {
        if node.has_image_fill() {
            return true;
        }
        let image_slot_kind = matches!(
            node.kind,
            NodeKind::Rectangle
                | NodeKind::Ellipse
                | NodeKind::Frame
                | NodeKind::Polygon
                | NodeKind::Vector
        );
        if image_slot_kind && has_image_name(node) {
            return true;
        }
    }
    matches!(node.kind, NodeKind::Rectangle | NodeKind::Ellipse)
}

/// Nodes that can take an image fill. Qualifying containers are still
/// descended into, so a frame and a nested shape may both be returned.
pub fn find_fillable<'a>(roots: &[&'a Node]) -> Vec<&'a Node> {
    let mut found = Vec::new();
    for root in roots {
        walk(*root, |node: &'a Node, _| {
            if is_fillable(node) {
                found.push(node);
            }
            Visit::Descend
        });
    }
    found
}

/// The root plus its direct children.
pub fn shallow_collect(root: &Node) -> Vec<&Node> {
    let mut found = vec![root];
    if let Some(children) = root.child_nodes() {
        found.extend(children.iter());
    }
    found
}
