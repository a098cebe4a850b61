//! Changelog cleanup: HTML to capped plain text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Longest description shown before it is cut and marked with `...`
pub const MAX_DESCRIPTION_CHARS: usize = 1500;

static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>").expect("valid script block regex")
});
static STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style\b.*?</style\s*>").expect("valid style block regex")
});
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid html comment regex"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid html tag regex"));
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("valid html entity regex")
});
static SPACES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\x{A0}]+").expect("valid spaces regex"));
static NEWLINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ?\n\s*").expect("valid newlines regex"));

/// Convert an HTML changelog into collapsed, length-capped plain text.
///
/// Every text node is trimmed and the non-empty ones joined with a space.
/// Runs of spaces collapse to one, runs of blank lines to a single newline.
pub fn clean_description(html: &str) -> String {
    let html = SCRIPT_RE.replace_all(html, "");
    let html = STYLE_RE.replace_all(&html, "");
    let html = COMMENT_RE.replace_all(&html, "");

    let joined = TAG_RE
        .split(&html)
        .map(|node| decode_entities(node).trim().to_string())
        .filter(|node| !node.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let text = joined.replace("\r\n", "\n").replace('\r', "\n");
    let text = SPACES_RE.replace_all(&text, " ");
    let text = NEWLINES_RE.replace_all(&text, "\n");

    truncate(text.trim())
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_DESCRIPTION_CHARS {
        return text.to_string();
    }

    let mut cut: String = text.chars().take(MAX_DESCRIPTION_CHARS).collect();
    cut.push_str("...");
    cut
}

fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    _ => None,
                }
            };

            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
