use tracing::{info, warn};

use crate::audit::audit_model::{AuditFinding, AuditKind, AuditOptions, Severity};
use crate::error::AssistError;
use crate::node::color::{same_color, to_hex};
use crate::node::host::{DocumentHost, HostResult, PaintTarget, StyleKind};
use crate::node::node_model::{Node, NodeKind, Paint, Rgb};
use crate::traverse::walker::{Visit, selection_roots, walk};

#[derive(Debug, Clone)]
enum Fix {
    Paint { target: PaintTarget, color: Rgb },
    Text { family: String, size: f64 },
}

struct Planned {
    finding: AuditFinding,
    fixes: Vec<Fix>,
}

impl Planned {
    fn report(finding: AuditFinding) -> Self {
        Self {
            finding,
            fixes: Vec::new(),
        }
    }
}

/// Walk the selection with one audit predicate, emitting one finding per
/// inspected node. With `fix`, unstyled nodes are bound to matching tokens.
pub fn scan_design_system<H: DocumentHost + ?Sized>(
    host: &mut H,
    kind: AuditKind,
    options: AuditOptions,
) -> Result<Vec<AuditFinding>, AssistError> {
    let mut planned = {
        let view: &H = host;
        let roots = selection_roots(view);
        if roots.is_empty() {
            return Err(AssistError::empty_selection());
        }

        let mut planned = Vec::new();
        for root in roots {
            match kind {
                AuditKind::Components => scan_components(root, &mut planned),
                AuditKind::Styles => scan_paints(view, root, &mut planned),
                AuditKind::TextStyles => scan_text_styles(view, root, &mut planned),
            }
        }
        planned
    };

    if options.fix {
        for entry in planned.iter_mut().filter(|p| !p.fixes.is_empty()) {
            apply_fixes(host, entry);
        }
    }

    let findings: Vec<AuditFinding> = planned.into_iter().map(|p| p.finding).collect();
    info!(
        kind = %kind,
        findings = findings.len(),
        warnings = findings.iter().filter(|f| f.needs_attention()).count(),
        "design audit finished"
    );
    Ok(findings)
}

fn scan_components(root: &Node, out: &mut Vec<Planned>) {
    walk(root, |node, _| {
        let (detail, severity, verdict) = match node.kind {
            NodeKind::Instance => ("컴포넌트 인스턴스".to_string(), Severity::Ok, Visit::Prune),
            NodeKind::Component | NodeKind::ComponentSet => {
                ("컴포넌트 정의".to_string(), Severity::Ok, Visit::Prune)
            }
            _ => match node.children.as_deref() {
                Some(children) => (
                    format!(
                        "컴포넌트를 사용하지 않는 컨테이너 (하위 레이어 {}개)",
                        children.len()
                    ),
                    Severity::Warning,
                    Visit::Descend,
                ),
                None => (
                    "컴포넌트 밖의 레이어".to_string(),
                    Severity::Info,
                    Visit::Descend,
                ),
            },
        };
        out.push(Planned::report(AuditFinding::new(
            &node.id, &node.name, "component", detail, severity,
        )));
        verdict
    });
}

fn visible_solids(paints: Option<&Vec<Paint>>) -> Vec<(Rgb, Option<&str>)> {
    paints
        .map(|paints| {
            paints
                .iter()
                .filter_map(|paint| match paint {
                    Paint::Solid {
                        color,
                        visible: true,
                        bound_variable,
                        ..
                    } => Some((*color, bound_variable.as_deref())),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

fn scan_paints<H: DocumentHost + ?Sized>(host: &H, root: &Node, out: &mut Vec<Planned>) {
    walk(root, |node, _| {
        let slots = [
            ("fill", PaintTarget::Fill, node.fills.as_ref(), node.fill_style_id.as_deref()),
            ("stroke", PaintTarget::Stroke, node.strokes.as_ref(), node.stroke_style_id.as_deref()),
        ];

        let mut parts = Vec::new();
        let mut fixes = Vec::new();
        for (label, target, paints, style_id) in slots {
            let solids = visible_solids(paints);
            let Some(&(_, first_variable)) = solids.first() else {
                continue;
            };
            if let Some(id) = style_id {
                let name = host.style(id).map(|s| s.name).unwrap_or_else(|| id.to_string());
                parts.push(format!("{label} {name}"));
                continue;
            }
            // Any solid without a variable leaves the slot unbound.
            match solids.iter().find(|(_, variable)| variable.is_none()) {
                Some(&(color, _)) => {
                    parts.push(format!("{label} {} (토큰 미적용)", to_hex(&color)));
                    fixes.push(Fix::Paint { target, color });
                }
                None => {
                    let variable = first_variable.unwrap_or_default();
                    parts.push(format!("{label} var({variable})"));
                }
            }
        }

        if !parts.is_empty() {
            let severity = if fixes.is_empty() {
                Severity::Ok
            } else {
                Severity::Warning
            };
            out.push(Planned {
                finding: AuditFinding::new(&node.id, &node.name, "paint", parts.join("; "), severity),
                fixes,
            });
        }
        Visit::Descend
    });
}

fn scan_text_styles<H: DocumentHost + ?Sized>(host: &H, root: &Node, out: &mut Vec<Planned>) {
    walk(root, |node, _| {
        if node.kind != NodeKind::Text {
            return Visit::Descend;
        }

        let family = node
            .font_name
            .as_ref()
            .and_then(|f| f.primary())
            .map(|f| f.family.clone());
        let font = match (&family, node.font_size) {
            (Some(family), Some(size)) => format!("{family} {size}"),
            (Some(family), None) => family.clone(),
            (None, Some(size)) => format!("{size}"),
            (None, None) => "폰트 정보 없음".to_string(),
        };

        let planned = match node.text_style_id.as_deref() {
            Some(id) => {
                let name = host.style(id).map(|s| s.name).unwrap_or_else(|| id.to_string());
                Planned::report(AuditFinding::new(
                    &node.id,
                    &node.name,
                    "text-style",
                    format!("{name} ({font})"),
                    Severity::Ok,
                ))
            }
            None => Planned {
                finding: AuditFinding::new(
                    &node.id,
                    &node.name,
                    "text-style",
                    format!("텍스트 스타일 없음 ({font})"),
                    Severity::Warning,
                ),
                fixes: family
                    .zip(node.font_size)
                    .map(|(family, size)| Fix::Text { family, size })
                    .into_iter()
                    .collect(),
            },
        };
        out.push(planned);
        Visit::Prune
    });
}

fn apply_fixes<H: DocumentHost + ?Sized>(host: &mut H, entry: &mut Planned) {
    let id = entry.finding.node_id.clone();
    let mut bound = Vec::new();

    for fix in &entry.fixes {
        let result = match fix {
            Fix::Paint { target, color } => bind_paint(host, &id, *target, *color).map(Some),
            Fix::Text { family, size } => bind_text(host, &id, family, *size),
        };
        match result {
            Ok(Some(style_name)) => bound.push(style_name),
            Ok(None) => {}
            Err(e) => warn!(node = %id, error = %e, "audit fix failed"),
        }
    }

    if bound.len() == entry.fixes.len() {
        entry.finding.applied = true;
        entry.finding.detail = format!("{} → {}", entry.finding.detail, bound.join(", "));
    }
}

/// Bind to a paint style of the same colour, creating `color/<hex>` if none exists.
fn bind_paint<H: DocumentHost + ?Sized>(
    host: &mut H,
    id: &str,
    target: PaintTarget,
    color: Rgb,
) -> HostResult<String> {
    let existing = host.styles().into_iter().find(|s| {
        s.kind == StyleKind::Paint && s.color.is_some_and(|c| same_color(&c, &color))
    });
    let style = match existing {
        Some(style) => style,
        None => {
            let name = format!("color/{}", to_hex(&color).trim_start_matches('#'));
            host.create_paint_style(&name, color)?
        }
    };
    host.bind_paint_style(id, target, &style.id)?;
    Ok(style.name)
}

/// Bind to a text style with the same family and size, if one exists.
fn bind_text<H: DocumentHost + ?Sized>(
    host: &mut H,
    id: &str,
    family: &str,
    size: f64,
) -> HostResult<Option<String>> {
    let existing = host.styles().into_iter().find(|s| {
        s.kind == StyleKind::Text
            && s.font_name.as_ref().is_some_and(|f| f.family == family)
            && s.font_size.is_some_and(|px| (px - size).abs() < f64::EPSILON)
    });
    match existing {
        Some(style) => {
            host.bind_text_style(id, &style.id)?;
            Ok(Some(style.name))
        }
        None => Ok(None),
    }
}
