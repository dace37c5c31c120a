use tracing::{info, warn};

use crate::command::intent::Intent;
use crate::error::{AssistError, Outcome};
use crate::executor::batch::{for_each_node, resolve, selected_ids, text_targets, write_text};
use crate::node::host::{DocumentHost, HostError};
use crate::node::node_model::{NodeKind, Paint, Rgb};

/// Offset applied to duplicates so they do not sit exactly on the original.
pub const DUPLICATE_OFFSET: f64 = 20.0;

/// Apply one parsed intent to the host's current selection.
pub fn execute<H: DocumentHost + ?Sized>(
    host: &mut H,
    intent: &Intent,
) -> Result<Outcome, AssistError> {
    let selection = selected_ids(host)?;

    let outcome = match intent {
        Intent::ReplaceText {
            search,
            replacement,
        } => replace_text(host, search, replacement)?,
        Intent::ReplaceAllText { text } => replace_all_text(host, text)?,
        Intent::SetColor { hex, color } => set_color(host, &selection, hex, *color)?,
        Intent::ResizeWidth { width } => {
            let width = f64::from(*width);
            let changed = for_each_node(host, &selection, "resize_width", |h, id| {
                let node = resolve(h, id)?;
                if !node.kind.is_layer() {
                    return Ok::<_, HostError>(false);
                }
                let height = node.height;
                h.resize(id, width, height).map(|_| true)
            });
            require(changed, "크기를 변경할 수 있는 레이어가 없습니다.")?;
            Outcome::new(changed, format!("너비를 {width}px로 변경했습니다."))
        }
        Intent::ResizeHeight { height } => {
            let height = f64::from(*height);
            let changed = for_each_node(host, &selection, "resize_height", |h, id| {
                let node = resolve(h, id)?;
                if !node.kind.is_layer() {
                    return Ok::<_, HostError>(false);
                }
                let width = node.width;
                h.resize(id, width, height).map(|_| true)
            });
            require(changed, "크기를 변경할 수 있는 레이어가 없습니다.")?;
            Outcome::new(changed, format!("높이를 {height}px로 변경했습니다."))
        }
        Intent::SetOpacity { percent } => {
            let fraction = Intent::opacity_fraction(*percent);
            let changed = for_each_node(host, &selection, "set_opacity", |h, id| {
                if resolve(h, id)?.opacity.is_none() {
                    return Ok::<_, HostError>(false);
                }
                h.set_opacity(id, fraction).map(|_| true)
            });
            require(changed, "투명도를 변경할 수 있는 레이어가 없습니다.")?;
            Outcome::new(changed, format!("투명도를 {percent}%로 변경했습니다."))
        }
        Intent::Duplicate => duplicate(host, &selection)?,
        Intent::Delete => {
            let changed = for_each_node(host, &selection, "delete", |h, id| {
                h.remove_node(id).map(|_| true)
            });
            require(changed, "삭제할 레이어가 없습니다.")?;
            Outcome::new(changed, format!("{changed}개의 레이어를 삭제했습니다."))
        }
        Intent::SetFontSize { size } => {
            let size = f64::from(*size);
            let changed = for_each_node(host, &selection, "set_font_size", |h, id| {
                let node = resolve(h, id)?;
                if node.kind != NodeKind::Text {
                    return Ok::<_, HostError>(false);
                }
                let fonts: Vec<_> = node
                    .font_name
                    .as_ref()
                    .map(|f| f.required_fonts().into_iter().cloned().collect())
                    .unwrap_or_default();
                for font in &fonts {
                    h.load_font(font)?;
                }
                h.set_font_size(id, size).map(|_| true)
            });
            require(changed, "선택된 레이어 중 텍스트가 없습니다.")?;
            Outcome::new(changed, format!("폰트 크기를 {size}px로 변경했습니다."))
        }
        Intent::Move { dx, dy } => {
            let (fx, fy) = (*dx as f64, *dy as f64);
            let changed = for_each_node(host, &selection, "move", |h, id| {
                let node = resolve(h, id)?;
                let (x, y) = (node.x + fx, node.y + fy);
                h.set_position(id, x, y).map(|_| true)
            });
            require(changed, "이동할 레이어가 없습니다.")?;
            Outcome::new(changed, format!("레이어를 ({dx}, {dy})만큼 이동했습니다."))
        }
        Intent::Show => {
            let changed = set_visibility(host, &selection, true);
            require(changed, "표시할 레이어가 없습니다.")?;
            Outcome::new(changed, format!("{changed}개의 레이어를 표시했습니다."))
        }
        Intent::Hide => {
            let changed = set_visibility(host, &selection, false);
            require(changed, "숨길 레이어가 없습니다.")?;
            Outcome::new(changed, format!("{changed}개의 레이어를 숨겼습니다."))
        }
        Intent::Rename { name } => {
            let changed = for_each_node(host, &selection, "rename", |h, id| {
                h.set_name(id, name).map(|_| true)
            });
            require(changed, "이름을 변경할 레이어가 없습니다.")?;
            Outcome::new(changed, format!("레이어 이름을 \"{name}\"으로 변경했습니다."))
        }
        Intent::SetCornerRadius { radius } => {
            let value = f64::from(*radius);
            let changed = for_each_node(host, &selection, "set_corner_radius", |h, id| {
                if resolve(h, id)?.corner_radius.is_none() {
                    return Ok::<_, HostError>(false);
                }
                h.set_corner_radius(id, value).map(|_| true)
            });
            require(changed, "모서리 둥글기를 적용할 수 있는 레이어가 없습니다.")?;
            Outcome::new(changed, format!("모서리 둥글기를 {radius}px로 변경했습니다."))
        }
    };

    info!(
        operation = intent.operation(),
        changed = outcome.changed,
        "command applied"
    );
    Ok(outcome)
}

fn require(changed: usize, message: &str) -> Result<(), AssistError> {
    if changed == 0 {
        return Err(AssistError::zero(message));
    }
    Ok(())
}

pub fn replace_text<H: DocumentHost + ?Sized>(
    host: &mut H,
    search: &str,
    replacement: &str,
) -> Result<Outcome, AssistError> {
    let targets = text_targets(host, Some(search));
    let changed = for_each_node(host, &targets, "replace_text", |h, id| {
        write_text(h, id, |current| current.replacen(search, replacement, 1)).map(|_| true)
    });
    require(changed, &format!("\"{search}\" 텍스트를 찾을 수 없습니다."))?;
    Ok(Outcome::new(
        changed,
        format!("\"{search}\"를 \"{replacement}\"로 {changed}개 변경했습니다."),
    ))
}

/// Overwrite every text leaf under the selection with `text`.
pub fn replace_all_text<H: DocumentHost + ?Sized>(
    host: &mut H,
    text: &str,
) -> Result<Outcome, AssistError> {
    let changed = fill_all_text(host, text, "replace_all_text");
    require(changed, "선택된 영역에 텍스트가 없습니다.")?;
    Ok(Outcome::new(
        changed,
        format!("{changed}개의 텍스트를 \"{text}\"로 변경했습니다."),
    ))
}

pub(crate) fn fill_all_text<H: DocumentHost + ?Sized>(
    host: &mut H,
    text: &str,
    operation: &str,
) -> usize {
    let targets = text_targets(host, None);
    for_each_node(host, &targets, operation, |h, id| {
        write_text(h, id, |_| text.to_string()).map(|_| true)
    })
}

fn set_color<H: DocumentHost + ?Sized>(
    host: &mut H,
    selection: &[String],
    hex: &str,
    color: Rgb,
) -> Result<Outcome, AssistError> {
    let changed = for_each_node(host, selection, "set_color", |h, id| {
        let Some(fills) = resolve(h, id)?.fills.clone() else {
            return Ok::<_, HostError>(false);
        };
        let next = match fills.first() {
            Some(Paint::Solid {
                opacity, visible, ..
            }) => {
                let mut next = fills.clone();
                next[0] = Paint::Solid {
                    color,
                    opacity: *opacity,
                    visible: *visible,
                    bound_variable: None,
                };
                next
            }
            _ => vec![Paint::solid(color)],
        };
        h.set_fills(id, next).map(|_| true)
    });
    require(changed, "색상을 변경할 수 없는 레이어입니다.")?;
    Ok(Outcome::new(
        changed,
        format!("{changed}개의 레이어 색상을 {hex}로 변경했습니다."),
    ))
}

fn duplicate<H: DocumentHost + ?Sized>(
    host: &mut H,
    selection: &[String],
) -> Result<Outcome, AssistError> {
    let mut copies = Vec::new();
    let changed = for_each_node(host, selection, "duplicate", |h, id| {
        let copy = h.clone_node(id)?;
        let placed = resolve(h, &copy)
            .map(|node| (node.x + DUPLICATE_OFFSET, node.y + DUPLICATE_OFFSET))
            .and_then(|(x, y)| h.set_position(&copy, x, y));
        if let Err(e) = placed {
            // A copy that cannot be placed is not kept.
            if let Err(remove_err) = h.remove_node(&copy) {
                warn!(node = %copy, error = %remove_err, "could not remove unplaced copy");
            }
            return Err(e);
        }
        copies.push(copy);
        Ok::<_, HostError>(true)
    });
    require(changed, "복제할 레이어가 없습니다.")?;
    host.set_selection(copies);
    Ok(Outcome::new(
        changed,
        format!("{changed}개의 레이어를 복제했습니다."),
    ))
}

fn set_visibility<H: DocumentHost + ?Sized>(
    host: &mut H,
    selection: &[String],
    visible: bool,
) -> usize {
    let operation = if visible { "show" } else { "hide" };
    for_each_node(host, selection, operation, |h, id| {
        h.set_visible(id, visible).map(|_| true)
    })
}
