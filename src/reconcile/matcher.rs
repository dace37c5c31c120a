use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::AssistError;
use crate::node::host::DocumentHost;
use crate::node::node_model::{Node, NodeKind};
use crate::reconcile::outline::{KeywordItem, parse_outline};
use crate::traverse::walker::{Visit, selection_roots, walk};

/// Scores above this pair an expected item with a differing text.
pub const SIMILARITY_THRESHOLD: f64 = 0.3;

/// Score given when one string contains the other.
pub const CONTAINMENT_SCORE: f64 = 0.8;

/// Text actually present in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRecord {
    pub node_id: String,
    pub name: String,
    pub text: String,
    /// Ancestor names, outermost first, joined with " > ".
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Match,
    Mismatch,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub status: MatchStatus,
    pub label: String,
    pub expected: String,
    pub actual: Option<String>,
    pub node_id: Option<String>,
    pub path: Option<String>,
    pub similarity: Option<f64>,
}

impl MatchResult {
    fn claimed(status: MatchStatus, item: &KeywordItem, record: &TextRecord, score: f64) -> Self {
        Self {
            status,
            label: item.label.clone(),
            expected: item.text.clone(),
            actual: Some(record.text.clone()),
            node_id: Some(record.node_id.clone()),
            path: Some(record.path.clone()),
            similarity: Some(score),
        }
    }

    fn missing(item: &KeywordItem) -> Self {
        Self {
            status: MatchStatus::Missing,
            label: item.label.clone(),
            expected: item.text.clone(),
            actual: None,
            node_id: None,
            path: None,
            similarity: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub matched: usize,
    pub mismatched: usize,
    pub missing: usize,
}

impl MatchSummary {
    pub fn from_results(results: &[MatchResult]) -> Self {
        let mut summary = Self::default();
        for r in results {
            match r.status {
                MatchStatus::Match => summary.matched += 1,
                MatchStatus::Mismatch => summary.mismatched += 1,
                MatchStatus::Missing => summary.missing += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.matched + self.mismatched + self.missing
    }
}

/// Text records for every non-blank text leaf under `root`, in tree order.
pub fn collect_text_records(root: &Node) -> Vec<TextRecord> {
    let mut records = Vec::new();
    walk(root, |node, ancestors| {
        if node.kind != NodeKind::Text {
            return Visit::Descend;
        }
        let text = node.characters.as_deref().unwrap_or("");
        if !text.trim().is_empty() {
            records.push(TextRecord {
                node_id: node.id.clone(),
                name: node.name.clone(),
                text: text.to_string(),
                path: ancestors
                    .iter()
                    .map(|a| a.name.as_str())
                    .collect::<Vec<_>>()
                    .join(" > "),
            });
        }
        Visit::Prune
    });
    records
}

pub fn selection_text_records<H: DocumentHost + ?Sized>(host: &H) -> Vec<TextRecord> {
    selection_roots(host)
        .into_iter()
        .flat_map(collect_text_records)
        .collect()
}

/// Symmetric similarity in 0..=1: containment either way scores a flat 0.8,
/// otherwise the Jaccard ratio of the lower-cased character sets.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a.contains(&b) || b.contains(&a) {
        return CONTAINMENT_SCORE;
    }

    let set_a: HashSet<char> = a.chars().collect();
    let set_b: HashSet<char> = b.chars().collect();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    set_a.intersection(&set_b).count() as f64 / union as f64
}

/// Align expected items with tree text: exact matches first, then the best
/// similarity above the threshold, then the rest are missing. Results follow
/// outline order and each record is claimed at most once.
pub fn reconcile(items: &[KeywordItem], records: &[TextRecord]) -> Vec<MatchResult> {
    let mut results: Vec<Option<MatchResult>> = vec![None; items.len()];
    let mut claimed = vec![false; records.len()];

    for (i, item) in items.iter().enumerate() {
        let exact = records
            .iter()
            .enumerate()
            .find(|(j, record)| !claimed[*j] && record.text == item.text);
        if let Some((j, record)) = exact {
            claimed[j] = true;
            results[i] = Some(MatchResult::claimed(MatchStatus::Match, item, record, 1.0));
        }
    }

    for (i, item) in items.iter().enumerate() {
        if results[i].is_some() {
            continue;
        }
        let mut best: Option<(usize, f64)> = None;
        for (j, record) in records.iter().enumerate() {
            if claimed[j] {
                continue;
            }
            let score = similarity(&item.text, &record.text);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((j, score));
            }
        }
        if let Some((j, score)) = best.filter(|(_, score)| *score > SIMILARITY_THRESHOLD) {
            claimed[j] = true;
            results[i] = Some(MatchResult::claimed(
                MatchStatus::Mismatch,
                item,
                &records[j],
                score,
            ));
        }
    }

    items
        .iter()
        .zip(results)
        .map(|(item, result)| result.unwrap_or_else(|| MatchResult::missing(item)))
        .collect()
}

/// Compare an outline against the text under the current selection.
pub fn compare_with_outline<H: DocumentHost + ?Sized>(
    host: &H,
    outline: &str,
    default_label: &str,
) -> Result<Vec<MatchResult>, AssistError> {
    if selection_roots(host).is_empty() {
        return Err(AssistError::empty_selection());
    }
    let items = parse_outline(outline, default_label);
    if items.is_empty() {
        return Err(AssistError::zero("비교할 내용이 없습니다."));
    }
    let records = selection_text_records(host);
    Ok(reconcile(&items, &records))
}
