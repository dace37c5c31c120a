use std::fmt::Display;

use tracing::warn;

use crate::error::AssistError;
use crate::node::host::{DocumentHost, HostError, HostResult};
use crate::node::node_model::Node;
use crate::traverse::walker::{collect_text_nodes, find_text_containing, selection_roots};

/// Apply `apply` to each id in order. A node counts as changed when the
/// closure returns `Ok(true)`; errors are logged and skipped so one bad node
/// never stops the batch.
pub fn for_each_node<H, E, F>(host: &mut H, ids: &[String], operation: &str, mut apply: F) -> usize
where
    H: DocumentHost + ?Sized,
    E: Display,
    F: FnMut(&mut H, &str) -> Result<bool, E>,
{
    let mut changed = 0;
    for id in ids {
        match apply(host, id) {
            Ok(true) => changed += 1,
            Ok(false) => {}
            Err(e) => warn!(operation, node = %id, error = %e, "skipping node"),
        }
    }
    changed
}

/// Resolve `id`, failing with `NodeNotFound` when it has disappeared.
pub fn resolve<'h, H: DocumentHost + ?Sized>(host: &'h H, id: &str) -> HostResult<&'h Node> {
    host.resolve_node(id)
        .ok_or_else(|| HostError::NodeNotFound(id.to_string()))
}

/// Ids of the selected roots, failing when nothing is selected.
pub fn selected_ids<H: DocumentHost + ?Sized>(host: &H) -> Result<Vec<String>, AssistError> {
    let ids: Vec<String> = selection_roots(host)
        .into_iter()
        .map(|node| node.id.clone())
        .collect();
    if ids.is_empty() {
        return Err(AssistError::empty_selection());
    }
    Ok(ids)
}

/// Text leaves under the selection in traversal order, optionally only those
/// containing `needle`.
pub fn text_targets<H: DocumentHost + ?Sized>(host: &H, needle: Option<&str>) -> Vec<String> {
    selection_roots(host)
        .into_iter()
        .flat_map(|root| match needle {
            Some(needle) => find_text_containing(root, needle),
            None => collect_text_nodes(root),
        })
        .map(|node| node.id.clone())
        .collect()
}

/// Load every font of a text leaf, then write the content produced by
/// `edit` from the current content.
pub fn write_text<H, F>(host: &mut H, id: &str, edit: F) -> HostResult<()>
where
    H: DocumentHost + ?Sized,
    F: FnOnce(&str) -> String,
{
    let node = resolve(host, id)?;
    let fonts: Vec<_> = node
        .font_name
        .as_ref()
        .map(|f| f.required_fonts().into_iter().cloned().collect())
        .unwrap_or_default();
    let next = edit(node.characters.as_deref().unwrap_or(""));

    for font in &fonts {
        host.load_font(font)?;
    }
    host.set_characters(id, &next)
}
