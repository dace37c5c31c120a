use std::path::PathBuf;

use tracing::{info, warn};

use crate::audit::audit_model::AuditOptions;
use crate::audit::scanner::scan_design_system;
use crate::command::parser::parse_command;
use crate::error::{AssistError, Outcome};
use crate::executor::executor::execute;
use crate::fill::field_spec::{apply_dummy_data, round_robin_fill};
use crate::fill::image::{ImageKind, ImageSource, MIN_IMAGE_SIZE, apply_image_fill};
use crate::layers::info::{count_matching, load_layers, selection_info, spell_check_texts};
use crate::layers::naming::{auto_rename, rename_layers, rename_selected};
use crate::layers::select::{select_node, select_nodes};
use crate::node::host::DocumentHost;
use crate::reconcile::matcher::{MatchSummary, compare_with_outline};
use crate::reconcile::outline::DEFAULT_LABEL;
use crate::service::message::{Payload, Request, Response};
use crate::service::session::SessionState;
use crate::trace::logger::Journal;
use crate::trace::trace::JournalEntry;

/// Dispatches UI requests against a document host. Every failure is turned
/// into an error response; nothing propagates past `handle`.
pub struct Assistant<H, S> {
    host: H,
    images: S,
    session: SessionState,
    session_path: Option<PathBuf>,
    journal: Option<Journal>,
    outline_label: String,
    image_min_size: u32,
}

impl<H: DocumentHost, S: ImageSource> Assistant<H, S> {
    pub fn new(host: H, images: S) -> Self {
        Self {
            host,
            images,
            session: SessionState::default(),
            session_path: None,
            journal: None,
            outline_label: DEFAULT_LABEL.to_string(),
            image_min_size: MIN_IMAGE_SIZE,
        }
    }

    /// Load session state from `path` and save it back there on change.
    pub fn with_session(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.session = SessionState::load(&path);
        self.session_path = Some(path);
        self
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn with_outline_label(mut self, label: impl Into<String>) -> Self {
        self.outline_label = label.into();
        self
    }

    pub fn with_image_min_size(mut self, min_size: u32) -> Self {
        self.image_min_size = min_size;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn handle(&mut self, request: Request) -> Response {
        let operation = request.operation();
        let is_command = matches!(request, Request::ExecuteCommand { .. });

        let response = match self.dispatch(request) {
            Ok(response) => response,
            Err(e) if is_command => Response::error(operation, format!("오류: {e}")),
            Err(e) => Response::error(operation, e.to_string()),
        };

        info!(
            operation,
            status = ?response.status,
            changed = response.changed,
            "request handled"
        );
        if let Some(journal) = &self.journal {
            journal.record(&JournalEntry::from_response(&response));
        }
        response
    }

    fn dispatch(&mut self, request: Request) -> Result<Response, AssistError> {
        let operation = request.operation();
        let outcome = |o: Outcome| Response::success(operation, o.message).with_changed(o.changed);

        match request {
            Request::ExecuteCommand { command } => {
                let intent = parse_command(&command)?;
                execute(&mut self.host, &intent).map(outcome)
            }
            Request::GetSelectionInfo => {
                Ok(Response::success(operation, selection_info(&self.host)))
            }
            Request::LoadLayers => {
                let layers = load_layers(&self.host)?;
                Ok(
                    Response::success(operation, format!("{}개의 레이어를 불러왔습니다.", layers.len()))
                        .with_data(Payload::Layers(layers)),
                )
            }
            Request::RenameLayers { changes } => rename_layers(&mut self.host, &changes).map(outcome),
            Request::RenameSelected { naming_type } => {
                rename_selected(&mut self.host, &naming_type).map(outcome)
            }
            Request::AutoRename => auto_rename(&mut self.host).map(outcome),
            Request::ApplyDummyData { value } => apply_dummy_data(&mut self.host, &value).map(outcome),
            Request::RandomFill { mut fields } => {
                round_robin_fill(&mut self.host, &mut fields).map(outcome)
            }
            Request::ApplyImageFill { kind } => {
                let kind: ImageKind = kind.parse().unwrap_or(ImageKind::Other);
                apply_image_fill(&mut self.host, &self.images, kind, self.image_min_size)
                    .map(outcome)
            }
            Request::CountMatching { field_name } => {
                let count = count_matching(&self.host, &field_name);
                self.remember_field(field_name);
                Ok(Response::success(
                    operation,
                    format!(
                        "선택된 {}개 중 {}개의 레이어가 일치합니다.",
                        count.selection_count, count.matching_count
                    ),
                )
                .with_data(Payload::Count(count)))
            }
            Request::ScanDesignSystem { kind, fix } => {
                let findings = scan_design_system(&mut self.host, kind, AuditOptions { fix })?;
                let flagged = findings.iter().filter(|f| f.needs_attention()).count();
                let applied = findings.iter().filter(|f| f.applied).count();
                Ok(Response::success(
                    operation,
                    format!(
                        "{}개 레이어 검사: 확인 필요 {flagged}개, 자동 수정 {applied}개",
                        findings.len()
                    ),
                )
                .with_changed(applied)
                .with_data(Payload::Findings(findings)))
            }
            Request::CompareWithNotion { outline } => {
                let results = compare_with_outline(&self.host, &outline, &self.outline_label)?;
                let summary = MatchSummary::from_results(&results);
                Ok(Response::success(
                    operation,
                    format!(
                        "일치 {}개, 불일치 {}개, 누락 {}개",
                        summary.matched, summary.mismatched, summary.missing
                    ),
                )
                .with_data(Payload::Matches(results)))
            }
            Request::SelectNode { id } => select_node(&mut self.host, &id).map(outcome),
            Request::SelectMultiple { ids } => select_nodes(&mut self.host, &ids).map(outcome),
            Request::SpellCheck => {
                let texts = spell_check_texts(&self.host)?;
                Ok(
                    Response::success(operation, format!("검사할 텍스트 {}개를 수집했습니다.", texts.len()))
                        .with_data(Payload::Texts(texts)),
                )
            }
        }
    }

    fn remember_field(&mut self, field_name: String) {
        self.session.last_focused_field = Some(field_name);
        if let Some(path) = &self.session_path {
            if let Err(e) = self.session.save(path) {
                warn!(error = %e, "could not persist session state");
            }
        }
    }
}
