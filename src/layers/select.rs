use crate::error::{AssistError, Outcome};
use crate::node::host::DocumentHost;

/// Replace the selection with the given ids, keeping only those that still
/// resolve.
pub fn select_nodes<H: DocumentHost + ?Sized>(
    host: &mut H,
    ids: &[String],
) -> Result<Outcome, AssistError> {
    let found: Vec<String> = ids
        .iter()
        .filter(|id| host.resolve_node(id).is_some())
        .cloned()
        .collect();

    if found.is_empty() {
        return Err(AssistError::zero("선택할 레이어를 찾을 수 없습니다."));
    }

    let count = found.len();
    host.set_selection(found);
    Ok(Outcome::new(count, format!("{count}개의 레이어를 선택했습니다.")))
}

pub fn select_node<H: DocumentHost + ?Sized>(host: &mut H, id: &str) -> Result<Outcome, AssistError> {
    select_nodes(host, &[id.to_string()])
}
