use std::sync::LazyLock;

use regex::Regex;

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Character cap on preprocessed text, sized to the scorer's input window.
pub const MAX_TEXT_CHARS: usize = 512;

/// Collapse whitespace runs to single spaces and cap the length.
/// Truncation counts characters, not bytes, so multibyte text stays valid.
pub fn preprocess(text: &str) -> String {
    let collapsed = WS_RE.replace_all(text.trim(), " ");
    if collapsed.chars().count() <= MAX_TEXT_CHARS {
        collapsed.into_owned()
    } else {
        collapsed.chars().take(MAX_TEXT_CHARS).collect()
    }
}
