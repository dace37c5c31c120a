use serde::{Deserialize, Serialize};

/// Label given to outline lines without a `label:` prefix.
pub const DEFAULT_LABEL: &str = "내용";

/// One expected text value taken from an outline line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordItem {
    pub label: String,
    pub text: String,
    /// The outline line the item came from.
    pub original: String,
}

const BULLETS: [&str; 4] = ["- ", "* ", "• ", "· "];

fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    // Only a run of `#` followed by a space is a heading marker.
    let rest = line.trim_start_matches('#');
    let line = if rest.len() < line.len() && (rest.is_empty() || rest.starts_with(char::is_whitespace)) {
        rest.trim_start()
    } else {
        line
    };
    BULLETS
        .iter()
        .find_map(|b| line.strip_prefix(b))
        .unwrap_or(line)
        .trim()
}

/// Parse `label: a, b` lines into one item per value. Lines without a
/// delimiter become a single item under `default_label`.
pub fn parse_outline(text: &str, default_label: &str) -> Vec<KeywordItem> {
    let mut items = Vec::new();

    for raw in text.lines() {
        let line = strip_bullet(raw);
        if line.is_empty() {
            continue;
        }

        match line.split_once(':') {
            Some((label, values)) => {
                let label = label.trim();
                let label = if label.is_empty() { default_label } else { label };
                for value in values.split(',').map(str::trim).filter(|v| !v.is_empty()) {
                    items.push(KeywordItem {
                        label: label.to_string(),
                        text: value.to_string(),
                        original: raw.trim().to_string(),
                    });
                }
            }
            None => items.push(KeywordItem {
                label: default_label.to_string(),
                text: line.to_string(),
                original: raw.trim().to_string(),
            }),
        }
    }

    items
}
