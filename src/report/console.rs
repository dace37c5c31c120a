use crate::audit::audit_model::{AuditFinding, Severity};
use crate::layers::info::LayerInfo;
use crate::reconcile::matcher::{MatchResult, MatchStatus, MatchSummary};

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// Format reconciliation results for terminal output.
///
/// Produces output like:
/// ```text
/// ✓ MATCH     이름: 홍길동
/// ~ MISMATCH  직업: 개발자 (실제: "개발팀", 0.50) @ Card > Body
/// ✗ MISSING   소개: 안녕하세요
///
/// === 일치 1, 불일치 1, 누락 1 (3 total) ===
/// ```
pub fn format_match_report(results: &[MatchResult]) -> String {
    let mut out = String::new();

    for result in results {
        let marker = match result.status {
            MatchStatus::Match => "\u{2713} MATCH   ",
            MatchStatus::Mismatch => "~ MISMATCH",
            MatchStatus::Missing => "\u{2717} MISSING ",
        };
        out.push_str(&format!("{}  {}: {}", marker, result.label, result.expected));

        if result.status == MatchStatus::Mismatch {
            if let Some(actual) = &result.actual {
                out.push_str(&format!(
                    " (실제: \"{}\", {:.2})",
                    actual,
                    result.similarity.unwrap_or_default()
                ));
            }
        }
        if let Some(path) = result.path.as_deref().filter(|p| !p.is_empty()) {
            out.push_str(&format!(" @ {}", path));
        }
        out.push('\n');
    }

    let summary = MatchSummary::from_results(results);
    out.push_str(&format!(
        "\n=== 일치 {}, 불일치 {}, 누락 {} ({} total) ===\n",
        summary.matched,
        summary.mismatched,
        summary.missing,
        summary.total()
    ));

    out
}

/// Format audit findings, one line per node.
pub fn format_findings(findings: &[AuditFinding]) -> String {
    let mut out = String::new();

    for finding in findings {
        let marker = match (finding.severity, finding.applied) {
            (_, true) => "\u{2713} FIXED",
            (Severity::Ok, _) => "\u{2713} OK   ",
            (Severity::Info, _) => "- INFO ",
            (Severity::Warning, _) => "! WARN ",
        };
        out.push_str(&format!(
            "{}  [{}] {} ({}): {}\n",
            marker, finding.category, finding.name, finding.node_id, finding.detail
        ));
    }

    let flagged = findings.iter().filter(|f| f.needs_attention()).count();
    let fixed = findings.iter().filter(|f| f.applied).count();
    out.push_str(&format!(
        "\n=== {} inspected, {} need attention, {} fixed ===\n",
        findings.len(),
        flagged,
        fixed
    ));

    out
}

pub fn format_layers(layers: &[LayerInfo]) -> String {
    layers
        .iter()
        .map(|layer| format!("{:<6} {}  ({})\n", layer.kind, layer.name, layer.id))
        .collect()
}

/// Numbered list of texts, one line each.
pub fn format_texts(texts: &[String]) -> String {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| format!("{:>3}. {}\n", i + 1, text.replace('\n', " ")))
        .collect()
}
