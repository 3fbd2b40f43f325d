//! Class-label pattern table shared by the header locator and the
//! class-column extractor, plus the room-column sentinel.

use regex::Regex;
use std::sync::LazyLock;

/// Cyrillic letters, Kazakh extensions included.
const LETTER: &str = "[а-яА-ЯёЁәіңғүұқөһӘІҢҒҮҰҚӨҺ]";
const OPEN_QUOTE: &str = r#"[«"'“”„]?"#;
const CLOSE_QUOTE: &str = r#"[»"'“”]?"#;

/// One accepted shape of a class label.
pub struct ClassPattern {
    pub name: &'static str,
    pub regex: Regex,
}

fn build(name: &'static str, pattern: String) -> ClassPattern {
    ClassPattern {
        name,
        regex: Regex::new(&pattern).expect("class label pattern must compile"),
    }
}

/// `5А`, `5 А`, `5«А»`, `7 «Б»`, `5"А"`, `5 класс А`, `5 сынып А`.
pub static CLASS_PATTERNS: LazyLock<Vec<ClassPattern>> = LazyLock::new(|| {
    vec![
        build("compact", format!(r"^\d{{1,2}}{}$", LETTER)),
        build("spaced", format!(r"^\d{{1,2}}\s+{}$", LETTER)),
        build(
            "quoted",
            format!(r"^\d{{1,2}}\s*{}\s*{}\s*{}$", OPEN_QUOTE, LETTER, CLOSE_QUOTE),
        ),
        build(
            "worded",
            format!(
                r"(?i)^\d{{1,2}}\s*(?:класс|сынып)\s*{}\s*{}\s*{}$",
                OPEN_QUOTE, LETTER, CLOSE_QUOTE
            ),
        ),
    ]
});

static GRADE_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)класс|сынып|[«»"'“”„\s]"#).expect("grade noise pattern must compile")
});

const ROOM_SENTINELS: [&str; 4] = ["каб", "каб.", "cab", "cab."];

/// True when the text mentions a room column ("каб", "кабинет", "cab").
pub fn contains_room_sentinel(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("каб") || lower.contains("cab")
}

/// True when the whole cell is the room-column marker.
pub fn is_room_sentinel(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    ROOM_SENTINELS.contains(&lower.as_str())
}

/// Name of the first pattern matching `text`, if any.
pub fn matching_pattern(text: &str) -> Option<&'static str> {
    let t = text.trim();
    CLASS_PATTERNS
        .iter()
        .find(|p| p.regex.is_match(t))
        .map(|p| p.name)
}

/// A header cell that names a class section.
pub fn is_class_label(text: &str) -> bool {
    matching_pattern(text).is_some() && !contains_room_sentinel(text)
}

/// Canonical grade (`7 «б»` -> `7Б`), or `None` for non-class text.
pub fn normalize_grade(text: &str) -> Option<String> {
    if !is_class_label(text) {
        return None;
    }
    Some(GRADE_NOISE.replace_all(text.trim(), "").to_uppercase())
}
