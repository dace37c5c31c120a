use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditKind {
    Components,
    Styles,
    TextStyles,
}

impl FromStr for AuditKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "components" | "component" => Ok(AuditKind::Components),
            "styles" | "colors" | "color" => Ok(AuditKind::Styles),
            "text-styles" | "text_styles" | "typography" => Ok(AuditKind::TextStyles),
            other => Err(format!(
                "unknown audit kind '{other}' (expected components, styles or text-styles)"
            )),
        }
    }
}

impl fmt::Display for AuditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuditKind::Components => "components",
            AuditKind::Styles => "styles",
            AuditKind::TextStyles => "text-styles",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Info,
    Warning,
}

/// One compliance observation about a single node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditFinding {
    pub node_id: String,
    pub name: String,
    pub category: String,
    pub detail: String,
    /// Whether an automatic fix was applied during this scan.
    pub applied: bool,
    pub severity: Severity,
}

impl AuditFinding {
    pub fn new(
        node_id: &str,
        name: &str,
        category: &str,
        detail: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            node_id: node_id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            detail: detail.into(),
            applied: false,
            severity,
        }
    }

    pub fn needs_attention(&self) -> bool {
        self.severity == Severity::Warning && !self.applied
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditOptions {
    /// Bind unstyled nodes to matching design tokens.
    #[serde(default)]
    pub fix: bool,
}
