use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::command::intent::Intent;
use crate::node::color::parse_hex;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// No rule recognised the input.
    #[error("명령어를 이해하지 못했습니다: \"{input}\"\n예시 명령어를 참고해주세요.")]
    Unrecognized { input: String },

    /// A rule matched but its argument was missing or malformed.
    #[error("{message}")]
    InvalidArgument { rule: &'static str, message: String },
}

fn invalid(rule: &'static str, message: impl Into<String>) -> ParseError {
    ParseError::InvalidArgument {
        rule,
        message: message.into(),
    }
}

const QUOTE: &str = r#"['"‘’“”]"#;

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("{QUOTE}(.+?){QUOTE}")).expect("quoted pattern"));
static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#([0-9A-Fa-f]{6}|[0-9A-Fa-f]{3})").expect("hex pattern")
});
static WIDTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:너비|width)[를을]?\s*(\d+)").expect("width pattern"));
static HEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:높이|height)[를을]?\s*(\d+)").expect("height pattern"));
static PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*%").expect("percent pattern"));
static FONT_SIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"폰트\s*(?:크기)?[를을]?\s*(\d+)").expect("font size pattern")
});
static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)").expect("number pattern"));
static MOVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:이동|움직|move).*?\(?\s*(-?\d+)\s*,\s*(-?\d+)\s*\)?").expect("move pattern")
});
static RENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?i)(?:이름|rename)[을를]?\\s*{QUOTE}(.+?){QUOTE}"))
        .expect("rename pattern")
});
static RADIUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:모서리|라운드|radius|corner)[를을]?\s*(\d+)").expect("radius pattern")
});

/// Trigger vocabulary: the input triggers when every word of any one group
/// occurs in the lower-cased command.
struct Triggers(&'static [&'static [&'static str]]);

impl Triggers {
    fn fire(&self, lower: &str) -> bool {
        self.0
            .iter()
            .any(|group| group.iter().all(|word| lower.contains(word)))
    }
}

const TEXT_TRIGGERS: Triggers = Triggers(&[&["텍스트", "변경"], &["text"]]);
const COLOR_TRIGGERS: Triggers = Triggers(&[&["색", "변경"], &["color"]]);
const OPACITY_TRIGGERS: Triggers = Triggers(&[&["투명도"], &["opacity"]]);
const DUPLICATE_TRIGGERS: Triggers = Triggers(&[&["복제"], &["복사"], &["duplicate"]]);
const DELETE_TRIGGERS: Triggers = Triggers(&[&["삭제"], &["delete"], &["remove"]]);
const FONT_SIZE_TRIGGERS: Triggers = Triggers(&[&["font", "size"]]);
const SHOW_TRIGGERS: Triggers = Triggers(&[&["보이"], &["show"], &["표시"]]);
const HIDE_TRIGGERS: Triggers = Triggers(&[&["숨기"], &["hide"]]);

struct CommandText<'a> {
    raw: &'a str,
    lower: String,
}

type RuleOutcome = Option<Result<Intent, ParseError>>;

struct Rule {
    name: &'static str,
    apply: fn(&CommandText) -> RuleOutcome,
}

/// Evaluated top to bottom; the first rule returning `Some` decides.
const RULES: &[Rule] = &[
    Rule { name: "search_replace", apply: search_replace },
    Rule { name: "replace_all", apply: replace_all },
    Rule { name: "quoted_text", apply: quoted_text },
    Rule { name: "color", apply: color },
    Rule { name: "width", apply: width },
    Rule { name: "height", apply: height },
    Rule { name: "opacity", apply: opacity },
    Rule { name: "duplicate", apply: duplicate },
    Rule { name: "delete", apply: delete },
    Rule { name: "font_size", apply: font_size },
    Rule { name: "move", apply: move_by },
    Rule { name: "show", apply: show },
    Rule { name: "hide", apply: hide },
    Rule { name: "rename", apply: rename },
    Rule { name: "corner_radius", apply: corner_radius },
];

/// Parse one free-text command into exactly one `Intent`.
pub fn parse_command(input: &str) -> Result<Intent, ParseError> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(ParseError::Unrecognized {
            input: input.to_string(),
        });
    }

    let text = CommandText {
        raw,
        lower: raw.to_lowercase(),
    };

    for rule in RULES {
        if let Some(outcome) = (rule.apply)(&text) {
            debug!(rule = rule.name, ok = outcome.is_ok(), "command rule matched");
            return outcome;
        }
    }

    Err(ParseError::Unrecognized {
        input: input.to_string(),
    })
}

fn parse_unsigned(rule: &'static str, digits: &str) -> Result<u32, ParseError> {
    digits
        .parse::<u32>()
        .map_err(|_| invalid(rule, format!("숫자가 너무 큽니다: {digits}")))
}

fn capture_unsigned(
    rule: &'static str,
    pattern: &Regex,
    text: &str,
) -> Option<Result<u32, ParseError>> {
    let caps = pattern.captures(text)?;
    Some(parse_unsigned(rule, &caps[1]))
}

fn search_replace(cmd: &CommandText) -> RuleOutcome {
    if !cmd.raw.contains('>') || cmd.raw.starts_with('>') {
        return None;
    }

    let parts: Vec<&str> = cmd.raw.split('>').collect();
    let [search, replacement] = parts.as_slice() else {
        return Some(Err(invalid(
            "search_replace",
            "'>'는 한 번만 사용할 수 있습니다.\n예: 팔로워(전체)>전체 메시지",
        )));
    };

    let search = search.trim();
    if search.is_empty() {
        return Some(Err(invalid(
            "search_replace",
            "찾을 텍스트를 입력해주세요.\n예: 팔로워(전체)>전체 메시지",
        )));
    }

    Some(Ok(Intent::ReplaceText {
        search: search.to_string(),
        replacement: replacement.trim().to_string(),
    }))
}

fn replace_all(cmd: &CommandText) -> RuleOutcome {
    let rest = cmd.raw.strip_prefix('>')?;
    Some(Ok(Intent::ReplaceAllText {
        text: rest.trim().to_string(),
    }))
}

fn quoted_text(cmd: &CommandText) -> RuleOutcome {
    if !TEXT_TRIGGERS.fire(&cmd.lower) {
        return None;
    }
    Some(match QUOTED.captures(cmd.raw) {
        Some(caps) => Ok(Intent::ReplaceAllText {
            text: caps[1].to_string(),
        }),
        None => Err(invalid(
            "quoted_text",
            "변경할 텍스트를 입력해주세요.\n예: 팔로워(전체)>전체 메시지",
        )),
    })
}

fn color(cmd: &CommandText) -> RuleOutcome {
    if !COLOR_TRIGGERS.fire(&cmd.lower) {
        return None;
    }
    let hex = HEX_COLOR.find(cmd.raw).map(|m| m.as_str());
    Some(match hex.and_then(|h| parse_hex(h).map(|rgb| (h, rgb))) {
        Some((hex, rgb)) => Ok(Intent::SetColor {
            hex: hex.to_string(),
            color: rgb,
        }),
        None => Err(invalid(
            "color",
            "색상을 HEX 코드로 입력해주세요. 예: #FF5733",
        )),
    })
}

fn width(cmd: &CommandText) -> RuleOutcome {
    capture_unsigned("width", &WIDTH, &cmd.lower)
        .map(|r| r.map(|width| Intent::ResizeWidth { width }))
}

fn height(cmd: &CommandText) -> RuleOutcome {
    capture_unsigned("height", &HEIGHT, &cmd.lower)
        .map(|r| r.map(|height| Intent::ResizeHeight { height }))
}

fn opacity(cmd: &CommandText) -> RuleOutcome {
    if !OPACITY_TRIGGERS.fire(&cmd.lower) {
        return None;
    }
    let caps = PERCENT.captures(&cmd.lower)?;
    // Out-of-range values clamp instead of failing.
    let percent = caps[1].parse::<u64>().map_or(100, |v| v.min(100)) as u32;
    Some(Ok(Intent::SetOpacity { percent }))
}

fn duplicate(cmd: &CommandText) -> RuleOutcome {
    DUPLICATE_TRIGGERS.fire(&cmd.lower).then_some(Ok(Intent::Duplicate))
}

fn delete(cmd: &CommandText) -> RuleOutcome {
    DELETE_TRIGGERS.fire(&cmd.lower).then_some(Ok(Intent::Delete))
}

fn font_size(cmd: &CommandText) -> RuleOutcome {
    let digits = match FONT_SIZE.captures(&cmd.lower) {
        Some(caps) => Some(caps[1].to_string()),
        None if FONT_SIZE_TRIGGERS.fire(&cmd.lower) => {
            FIRST_NUMBER.captures(cmd.raw).map(|caps| caps[1].to_string())
        }
        None => return None,
    };
    Some(match digits {
        Some(digits) => parse_unsigned("font_size", &digits).map(|size| Intent::SetFontSize { size }),
        None => Err(invalid("font_size", "폰트 크기를 숫자로 입력해주세요.")),
    })
}

fn move_by(cmd: &CommandText) -> RuleOutcome {
    let caps = MOVE.captures(&cmd.lower)?;
    let parse = |s: &str| {
        s.parse::<i64>()
            .map_err(|_| invalid("move", format!("이동 값이 올바르지 않습니다: {s}")))
    };
    Some(parse(&caps[1]).and_then(|dx| parse(&caps[2]).map(|dy| Intent::Move { dx, dy })))
}

fn show(cmd: &CommandText) -> RuleOutcome {
    SHOW_TRIGGERS.fire(&cmd.lower).then_some(Ok(Intent::Show))
}

fn hide(cmd: &CommandText) -> RuleOutcome {
    HIDE_TRIGGERS.fire(&cmd.lower).then_some(Ok(Intent::Hide))
}

fn rename(cmd: &CommandText) -> RuleOutcome {
    let caps = RENAME.captures(cmd.raw)?;
    Some(Ok(Intent::Rename {
        name: caps[1].to_string(),
    }))
}

fn corner_radius(cmd: &CommandText) -> RuleOutcome {
    capture_unsigned("corner_radius", &RADIUS, &cmd.lower)
        .map(|r| r.map(|radius| Intent::SetCornerRadius { radius }))
}
