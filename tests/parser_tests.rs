use canvas_assist::command::intent::Intent;
use canvas_assist::command::parser::{ParseError, parse_command};
use canvas_assist::node::color::{parse_hex, same_color, to_hex};

use crate::common::fixtures::close;

mod common;

fn parsed(input: &str) -> Intent {
    parse_command(input).unwrap_or_else(|e| panic!("'{input}' should parse: {e}"))
}

fn invalid_message(input: &str) -> String {
    match parse_command(input) {
        Err(ParseError::InvalidArgument { message, .. }) => message,
        other => panic!("'{input}' should be an invalid argument, got {other:?}"),
    }
}

// =========================================================================
// Text rules
// =========================================================================

#[test]
fn search_replace_splits_on_arrow() {
    assert_eq!(
        parsed("팔로워(전체)>전체 메시지"),
        Intent::ReplaceText {
            search: "팔로워(전체)".into(),
            replacement: "전체 메시지".into(),
        }
    );
}

#[test]
fn leading_arrow_replaces_all_text() {
    assert_eq!(
        parsed(">새 텍스트"),
        Intent::ReplaceAllText {
            text: "새 텍스트".into()
        }
    );
}

#[test]
fn quoted_text_with_trigger_words() {
    assert_eq!(
        parsed("텍스트 변경 \"안녕하세요\""),
        Intent::ReplaceAllText {
            text: "안녕하세요".into()
        }
    );
    assert_eq!(
        parsed("change text to 'Hello'"),
        Intent::ReplaceAllText {
            text: "Hello".into()
        }
    );
}

#[test]
fn text_trigger_without_quotes_is_a_usage_error() {
    let message = invalid_message("텍스트 변경 안녕");
    assert!(message.contains("예:"), "Usage example included: {message}");
}

#[test]
fn arrow_rule_wins_over_quoted_text() {
    assert_eq!(
        parsed("text \"a\" > b"),
        Intent::ReplaceText {
            search: "text \"a\"".into(),
            replacement: "b".into(),
        }
    );
}

#[test]
fn more_than_one_arrow_is_rejected() {
    let message = invalid_message("a>b>c");
    assert!(message.contains("'>'"));
}

#[test]
fn input_is_trimmed_before_matching() {
    assert_eq!(parsed("   > x  "), Intent::ReplaceAllText { text: "x".into() });
}

// =========================================================================
// Property rules
// =========================================================================

#[test]
fn color_command_parses_hex() {
    match parsed("색상 변경 #FF5733") {
        Intent::SetColor { hex, color } => {
            assert_eq!(hex, "#FF5733");
            assert!(close(color.r, 1.0));
            assert!(close(color.g, 0.341));
            assert!(close(color.b, 0.2));
        }
        other => panic!("Expected SetColor, got {other:?}"),
    }
    assert!(matches!(parsed("color #abc"), Intent::SetColor { .. }));
}

#[test]
fn color_without_hex_asks_for_hex() {
    let message = invalid_message("색상 변경 빨강");
    assert!(message.contains("#FF5733"));
}

#[test]
fn size_rules() {
    assert_eq!(parsed("너비 300"), Intent::ResizeWidth { width: 300 });
    assert_eq!(parsed("width 120"), Intent::ResizeWidth { width: 120 });
    assert_eq!(parsed("높이를 50"), Intent::ResizeHeight { height: 50 });
}

#[test]
fn opacity_is_clamped_to_one_hundred() {
    assert_eq!(parsed("투명도 50%"), Intent::SetOpacity { percent: 50 });
    assert_eq!(parsed("opacity 150%"), Intent::SetOpacity { percent: 100 });
    assert!(close(Intent::opacity_fraction(50), 0.5));
}

#[test]
fn keyword_only_rules() {
    assert_eq!(parsed("복제"), Intent::Duplicate);
    assert_eq!(parsed("duplicate this"), Intent::Duplicate);
    assert_eq!(parsed("삭제"), Intent::Delete);
    assert_eq!(parsed("remove"), Intent::Delete);
    assert_eq!(parsed("보이기"), Intent::Show);
    assert_eq!(parsed("숨기기"), Intent::Hide);
    assert_eq!(parsed("hide"), Intent::Hide);
}

#[test]
fn font_size_rules() {
    assert_eq!(parsed("폰트 크기 24"), Intent::SetFontSize { size: 24 });
    assert_eq!(parsed("font size 18"), Intent::SetFontSize { size: 18 });
}

#[test]
fn move_accepts_negative_offsets() {
    assert_eq!(parsed("이동 (10, -20)"), Intent::Move { dx: 10, dy: -20 });
    assert_eq!(parsed("move 5,5"), Intent::Move { dx: 5, dy: 5 });
}

#[test]
fn rename_and_corner_radius() {
    assert_eq!(
        parsed("이름 'Header'"),
        Intent::Rename {
            name: "Header".into()
        }
    );
    assert_eq!(parsed("모서리 8"), Intent::SetCornerRadius { radius: 8 });
}

// =========================================================================
// Failures
// =========================================================================

#[test]
fn unrecognized_input_is_reported_verbatim() {
    let err = parse_command("asdf1234").unwrap_err();
    assert_eq!(
        err,
        ParseError::Unrecognized {
            input: "asdf1234".into()
        }
    );
    assert!(err.to_string().contains("asdf1234"));
}

#[test]
fn blank_input_is_unrecognized() {
    assert!(matches!(
        parse_command("   "),
        Err(ParseError::Unrecognized { .. })
    ));
}

// =========================================================================
// Hex colours
// =========================================================================

#[test]
fn hex_parsing_accepts_short_and_long_forms() {
    let long = parse_hex("#FFFFFF").unwrap();
    let short = parse_hex("fff").unwrap();
    assert!(same_color(&long, &short));
    assert_eq!(to_hex(&parse_hex("#FF5733").unwrap()), "#ff5733");
}

#[test]
fn hex_parsing_rejects_malformed_input() {
    assert!(parse_hex("#12345").is_none());
    assert!(parse_hex("#GGGGGG").is_none());
    assert!(parse_hex("").is_none());
}
