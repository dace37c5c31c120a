use serde::{Deserialize, Serialize};

use crate::audit::audit_model::{AuditFinding, AuditKind};
use crate::fill::field_spec::FieldSpec;
use crate::layers::info::{LayerInfo, MatchCount};
use crate::layers::naming::LayerRename;
use crate::reconcile::matcher::MatchResult;

/// Requests accepted from the UI layer, one JSON object per message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Request {
    ExecuteCommand {
        command: String,
    },
    GetSelectionInfo,
    LoadLayers,
    RenameLayers {
        changes: Vec<LayerRename>,
    },
    RenameSelected {
        #[serde(rename = "namingType")]
        naming_type: String,
    },
    AutoRename,
    ApplyDummyData {
        value: String,
    },
    RandomFill {
        fields: Vec<FieldSpec>,
    },
    ApplyImageFill {
        /// Unknown kinds fall back to a generic photo.
        kind: String,
    },
    CountMatching {
        #[serde(rename = "fieldName")]
        field_name: String,
    },
    ScanDesignSystem {
        kind: AuditKind,
        #[serde(default)]
        fix: bool,
    },
    CompareWithNotion {
        outline: String,
    },
    SelectNode {
        id: String,
    },
    SelectMultiple {
        ids: Vec<String>,
    },
    SpellCheck,
}

impl Request {
    pub fn operation(&self) -> &'static str {
        match self {
            Request::ExecuteCommand { .. } => "execute-command",
            Request::GetSelectionInfo => "get-selection-info",
            Request::LoadLayers => "load-layers",
            Request::RenameLayers { .. } => "rename-layers",
            Request::RenameSelected { .. } => "rename-selected",
            Request::AutoRename => "auto-rename",
            Request::ApplyDummyData { .. } => "apply-dummy-data",
            Request::RandomFill { .. } => "random-fill",
            Request::ApplyImageFill { .. } => "apply-image-fill",
            Request::CountMatching { .. } => "count-matching",
            Request::ScanDesignSystem { .. } => "scan-design-system",
            Request::CompareWithNotion { .. } => "compare-with-notion",
            Request::SelectNode { .. } => "select-node",
            Request::SelectMultiple { .. } => "select-multiple",
            Request::SpellCheck => "spell-check",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Structured result data attached to a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "kebab-case")]
pub enum Payload {
    Layers(Vec<LayerInfo>),
    Count(MatchCount),
    Findings(Vec<AuditFinding>),
    Matches(Vec<MatchResult>),
    /// Texts handed to an external spell checker.
    Texts(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub operation: String,
    pub status: Status,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
}

impl Response {
    pub fn success(operation: &str, message: impl Into<String>) -> Self {
        Self {
            operation: operation.to_string(),
            status: Status::Success,
            message: message.into(),
            changed: None,
            data: None,
        }
    }

    pub fn error(operation: &str, message: impl Into<String>) -> Self {
        Self {
            operation: operation.to_string(),
            status: Status::Error,
            message: message.into(),
            changed: None,
            data: None,
        }
    }

    pub fn with_changed(mut self, changed: usize) -> Self {
        self.changed = Some(changed);
        self
    }

    pub fn with_data(mut self, data: Payload) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}
