use canvas_assist::node::node_model::{Node, NodeKind, Paint, ScaleMode};
use canvas_assist::traverse::walker::{
    HasChildren, MAX_DEPTH, Visit, collect_name_matches, collect_text_nodes, count_name_matches,
    find_fillable, selection_roots, shallow_collect, walk,
};

use crate::common::fixtures::{doc, frame, group, rect, text};

mod common;

fn names(nodes: &[&Node]) -> Vec<String> {
    nodes.iter().map(|n| n.name.clone()).collect()
}

fn sample_tree() -> Node {
    frame(
        "root",
        "Root",
        vec![
            text("t1", "Title", "Hello"),
            group(
                "g1",
                "Group",
                vec![text("t2", "Body", "World"), rect("r1", "Box", "#ff0000")],
            ),
            text("t3", "Footer", "Bye"),
        ],
    )
}

// =========================================================================
// walk
// =========================================================================

#[test]
fn walk_is_preorder_and_keeps_child_order() {
    let tree = sample_tree();
    let mut seen = Vec::new();
    walk(&tree, |node: &Node, _| {
        seen.push(node.id.clone());
        Visit::Descend
    });
    assert_eq!(seen, vec!["root", "t1", "g1", "t2", "r1", "t3"]);
}

#[test]
fn walk_passes_ancestors_outermost_first() {
    let tree = sample_tree();
    let mut path_of_t2 = Vec::new();
    walk(&tree, |node: &Node, ancestors| {
        if node.id == "t2" {
            path_of_t2 = ancestors.iter().map(|a| a.id.clone()).collect();
        }
        Visit::Descend
    });
    assert_eq!(path_of_t2, vec!["root", "g1"]);
}

#[test]
fn prune_skips_the_subtree_only() {
    let tree = sample_tree();
    let mut seen = Vec::new();
    walk(&tree, |node: &Node, _| {
        seen.push(node.id.clone());
        if node.kind == NodeKind::Group {
            Visit::Prune
        } else {
            Visit::Descend
        }
    });
    assert_eq!(seen, vec!["root", "t1", "g1", "t3"]);
}

#[test]
fn walk_stops_at_the_depth_cap() {
    let mut chain = frame("f15", "Leaf", Vec::new());
    for depth in (0..15).rev() {
        chain = frame(&format!("f{depth}"), "Level", vec![chain]);
    }

    let mut visited = 0;
    walk(&chain, |_: &Node, _| {
        visited += 1;
        Visit::Descend
    });
    assert_eq!(visited, MAX_DEPTH + 1, "Depths 0 through MAX_DEPTH are visited");
}

/// Any type exposing children can be walked.
struct Outline {
    title: &'static str,
    sections: Vec<Outline>,
}

impl HasChildren for Outline {
    fn child_nodes(&self) -> Option<&[Self]> {
        if self.sections.is_empty() {
            None
        } else {
            Some(self.sections.as_slice())
        }
    }
}

#[test]
fn walk_works_for_any_container_type() {
    let outline = Outline {
        title: "a",
        sections: vec![
            Outline {
                title: "b",
                sections: vec![Outline {
                    title: "c",
                    sections: Vec::new(),
                }],
            },
            Outline {
                title: "d",
                sections: Vec::new(),
            },
        ],
    };

    let mut titles = Vec::new();
    walk(&outline, |node: &Outline, _| {
        titles.push(node.title);
        Visit::Descend
    });
    assert_eq!(titles, vec!["a", "b", "c", "d"]);
}

// =========================================================================
// Searches
// =========================================================================

#[test]
fn text_nodes_are_collected_in_tree_order() {
    let tree = sample_tree();
    assert_eq!(
        names(&collect_text_nodes(&tree)),
        vec!["Title", "Body", "Footer"]
    );
}

#[test]
fn name_matches_ignore_case_and_include_nested_matches() {
    let tree = frame(
        "root",
        "name",
        vec![text("t1", "Name", "a"), group("g", "NAME", vec![text("t2", "name", "b")])],
    );
    assert_eq!(collect_name_matches(&tree, "Name").len(), 4);
    assert_eq!(count_name_matches(&tree, "missing"), 0);
}

#[test]
fn fillable_nodes_follow_image_slot_rules() {
    let mut avatar = frame("avatar", "Avatar", Vec::new());
    avatar.children = None;
    let plain_frame = frame("card", "Card", vec![rect("shape", "Shape", "#00ff00")]);
    let mut with_image = Node::new("pic", "Anything", NodeKind::Vector);
    with_image.fills = Some(vec![Paint::Image {
        image_hash: "abc".into(),
        scale_mode: ScaleMode::Fit,
        visible: true,
        opacity: 1.0,
    }]);
    let mut ellipse = Node::new("dot", "Dot", NodeKind::Ellipse);
    ellipse.fills = Some(Vec::new());
    let label = text("label", "Photo caption", "hi");

    let root = group(
        "root",
        "Root",
        vec![avatar, plain_frame, with_image, ellipse, label],
    );
    let found: Vec<String> = find_fillable(&[&root])
        .iter()
        .map(|n| n.id.clone())
        .collect();
    assert_eq!(found, vec!["avatar", "shape", "pic", "dot"]);
}

#[test]
fn shallow_collect_is_root_and_direct_children() {
    let tree = sample_tree();
    assert_eq!(
        names(&shallow_collect(&tree)),
        vec!["Root", "Title", "Group", "Footer"]
    );
}

#[test]
fn selection_roots_drop_unresolvable_ids() {
    let document = doc(vec![sample_tree()], &["g1", "gone", "t3"]);
    let roots = selection_roots(&document);
    assert_eq!(names(&roots), vec!["Group", "Footer"]);
}
