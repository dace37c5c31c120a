use std::io::Cursor;

use canvas_assist::cli::commands::cmd_serve;
use canvas_assist::node::memory::MemoryDocument;
use canvas_assist::service::assistant::Assistant;
use canvas_assist::service::message::{Payload, Request, Response, Status};
use canvas_assist::service::session::SessionState;
use canvas_assist::trace::logger::Journal;
use canvas_assist::trace::trace::JournalEntry;

use crate::common::fixtures::{StubImages, doc, frame, rect, text};

mod common;

fn assistant(document: MemoryDocument) -> Assistant<MemoryDocument, StubImages> {
    Assistant::new(document, StubImages::default())
}

fn profile_card() -> MemoryDocument {
    let tree = frame(
        "card",
        "Card",
        vec![
            text("name", "name", "홍길동"),
            text("job", "job", "개발팀"),
            rect("photo", "Photo", "#cccccc"),
        ],
    );
    doc(vec![tree], &["card"])
}

// =========================================================================
// Message format
// =========================================================================

#[test]
fn requests_deserialize_from_tagged_json() {
    let request: Request =
        serde_json::from_str(r#"{"type":"execute-command","command":"복제"}"#).unwrap();
    assert_eq!(
        request,
        Request::ExecuteCommand {
            command: "복제".into()
        }
    );

    let request: Request =
        serde_json::from_str(r#"{"type":"count-matching","fieldName":"name"}"#).unwrap();
    assert_eq!(request.operation(), "count-matching");

    let request: Request =
        serde_json::from_str(r#"{"type":"scan-design-system","kind":"text-styles"}"#).unwrap();
    assert!(matches!(request, Request::ScanDesignSystem { fix: false, .. }));
}

#[test]
fn responses_serialize_status_in_lowercase() {
    let json = serde_json::to_value(Response::success("auto-rename", "ok").with_changed(2)).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["changed"], 2);
    assert!(json.get("data").is_none());
}

// =========================================================================
// Dispatch
// =========================================================================

#[test]
fn execute_command_errors_are_prefixed() {
    let mut assistant = assistant(profile_card());
    let response = assistant.handle(Request::ExecuteCommand {
        command: "asdf1234".into(),
    });
    assert_eq!(response.status, Status::Error);
    assert!(response.message.starts_with("오류: "));
    assert!(response.message.contains("asdf1234"));
}

#[test]
fn other_errors_are_plain_messages() {
    let mut assistant = assistant(doc(vec![rect("a", "A", "#000000")], &[]));
    let response = assistant.handle(Request::AutoRename);
    assert_eq!(response.status, Status::Error);
    assert_eq!(response.message, "먼저 레이어를 선택해주세요.");
}

#[test]
fn execute_command_success_reports_count() {
    let mut assistant = assistant(profile_card());
    let response = assistant.handle(Request::ExecuteCommand {
        command: ">X".into(),
    });
    assert!(response.is_success());
    assert_eq!(response.changed, Some(2));
}

#[test]
fn compare_returns_match_results() {
    let mut assistant = assistant(profile_card());
    let response = assistant.handle(Request::CompareWithNotion {
        outline: "이름: 홍길동\n직무: 개발자".into(),
    });
    assert!(response.is_success());
    assert_eq!(response.message, "일치 1개, 불일치 1개, 누락 0개");
    match response.data {
        Some(Payload::Matches(results)) => assert_eq!(results.len(), 2),
        other => panic!("Expected matches, got {other:?}"),
    }
}

#[test]
fn image_fill_uses_the_configured_source() {
    let mut assistant = assistant(profile_card()).with_image_min_size(300);
    let response = assistant.handle(Request::ApplyImageFill {
        kind: "mystery".into(),
    });
    assert!(response.is_success(), "{}", response.message);
    assert!(assistant.host().file().images.len() == 1);
}

#[test]
fn scan_reports_findings() {
    let mut assistant = assistant(profile_card());
    let response = assistant.handle(Request::ScanDesignSystem {
        kind: "styles".parse().unwrap(),
        fix: true,
    });
    assert!(response.is_success());
    match response.data {
        Some(Payload::Findings(findings)) => assert_eq!(findings.len(), 3),
        other => panic!("Expected findings, got {other:?}"),
    }
    assert_eq!(response.changed, Some(3));
}

#[test]
fn spell_check_returns_the_texts() {
    let mut assistant = assistant(profile_card());
    let response = assistant.handle(Request::SpellCheck);
    assert!(response.is_success());
    assert_eq!(response.operation, "spell-check");
    assert_eq!(
        response.data,
        Some(Payload::Texts(vec!["홍길동".into(), "개발팀".into()]))
    );

    let request: Request = serde_json::from_str(r#"{"type":"spell-check"}"#).unwrap();
    assert_eq!(request, Request::SpellCheck);
}

#[test]
fn spell_check_without_text_is_an_error() {
    let mut assistant = assistant(doc(vec![rect("a", "A", "#000000")], &["a"]));
    let response = assistant.handle(Request::SpellCheck);
    assert_eq!(response.status, Status::Error);
    assert_eq!(response.message, "검사할 텍스트가 없습니다.");
    assert!(response.data.is_none());
}

#[test]
fn select_node_with_unknown_id_fails() {
    let mut assistant = assistant(profile_card());
    let response = assistant.handle(Request::SelectNode { id: "nope".into() });
    assert_eq!(response.status, Status::Error);

    let response = assistant.handle(Request::SelectMultiple {
        ids: vec!["name".into(), "job".into()],
    });
    assert_eq!(response.changed, Some(2));
}

// =========================================================================
// Session and journal
// =========================================================================

#[test]
fn count_matching_remembers_the_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut assistant = assistant(profile_card()).with_session(&path);
    let response = assistant.handle(Request::CountMatching {
        field_name: "Name".into(),
    });
    match response.data {
        Some(Payload::Count(count)) => {
            assert_eq!(count.selection_count, 1);
            assert_eq!(count.matching_count, 1);
        }
        other => panic!("Expected count, got {other:?}"),
    }

    assert_eq!(assistant.session().last_focused_field.as_deref(), Some("Name"));
    assert_eq!(
        SessionState::load(&path).last_focused_field.as_deref(),
        Some("Name")
    );
}

#[test]
fn missing_or_malformed_session_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(SessionState::load(&dir.path().join("absent.json")), SessionState::default());

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{not json").unwrap();
    assert_eq!(SessionState::load(&bad), SessionState::default());
}

#[test]
fn journal_gets_one_line_per_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.jsonl");

    let journal = Journal::open(&path);
    assert!(journal.is_enabled());
    assert_eq!(journal.path(), path.as_path());

    let mut assistant = assistant(profile_card()).with_journal(journal);
    assistant.handle(Request::GetSelectionInfo);
    assistant.handle(Request::ExecuteCommand {
        command: "asdf".into(),
    });

    let content = std::fs::read_to_string(&path).unwrap();
    let entries: Vec<JournalEntry> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].operation, "get-selection-info");
    assert_eq!(entries[0].status, Status::Success);
    assert_eq!(entries[1].status, Status::Error);
}

#[test]
fn unwritable_journal_never_fails_requests() {
    let dir = tempfile::tempdir().unwrap();
    let journal = Journal::open(dir.path().join("missing").join("journal.jsonl"));
    assert!(!journal.is_enabled());

    let mut assistant = assistant(profile_card()).with_journal(journal);
    assert!(assistant.handle(Request::GetSelectionInfo).is_success());
}

// =========================================================================
// serve loop
// =========================================================================

#[test]
fn serve_answers_each_line() {
    let mut assistant = assistant(profile_card());
    let input = Cursor::new(
        "{\"type\":\"get-selection-info\"}\n\n{\"type\":\"apply-dummy-data\",\"value\":\"-\"}\nnot json\n",
    );
    let mut output = Vec::new();

    let handled = cmd_serve(&mut assistant, input, &mut output).unwrap();
    assert_eq!(handled, 3);

    let responses: Vec<Response> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert!(responses[0].is_success());
    assert_eq!(responses[1].changed, Some(2));
    assert_eq!(responses[2].operation, "invalid-request");
    assert_eq!(responses[2].status, Status::Error);
}
