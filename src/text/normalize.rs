//! Name, tag and filename normalization.

use std::sync::LazyLock;

use regex::Regex;

use super::ARCHIVE_EXTENSION;

/// Characters that separate a resource's real name from decorative noise
const NAME_SEPARATORS: &[char] = &[
    '-', '|', '/', '!', '[', ']', '<', '>', '~', '•', '·', '×', '✘', '»', '«', '│', '┃',
];

static PICTOGRAPHIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Extended_Pictographic}\p{Emoji_Modifier}\p{Regional_Indicator}\x{FE0F}\x{200D}\x{20E3}]")
        .expect("valid pictographic regex")
});

/// Split a camel/Pascal-case word into spaced words.
///
/// `"EssentialsX"` becomes `"Essentials X"` and `"HTTPServer"` becomes
/// `"HTTP Server"`. Lower-case runs that do not follow a capital are dropped,
/// so input without any capitalized run yields an empty string.
pub fn split_title_case(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_uppercase() {
            i += 1;
            continue;
        }

        let lower_run = chars[i + 1..]
            .iter()
            .take_while(|c| c.is_ascii_lowercase())
            .count();
        if lower_run > 0 {
            words.push(chars[i..=i + lower_run].iter().collect());
            i += lower_run + 1;
            continue;
        }

        // An acronym runs until the capital that starts the next word
        let upper_run = chars[i + 1..]
            .iter()
            .take_while(|c| c.is_ascii_uppercase())
            .count();
        let end = i + 1 + upper_run;
        if end == chars.len() {
            words.push(chars[i..end].iter().collect());
            i = end;
        } else if upper_run > 0 {
            words.push(chars[i..end - 1].iter().collect());
            i = end - 1;
        } else {
            i += 1;
        }
    }

    words.join(" ")
}

/// Reduce a decorated resource name to its real name.
///
/// The name is split on [`NAME_SEPARATORS`] and the first segment containing
/// an ASCII letter is kept; everything before it (usually version ranges) and
/// after it is dropped. Pictographs are then removed and whitespace trimmed.
/// A name with no letter-bearing segment becomes empty.
pub fn sanitize_name(name: &str) -> String {
    let segment = name
        .split(NAME_SEPARATORS)
        .find(|segment| segment.chars().any(|c| c.is_ascii_alphabetic()))
        .unwrap_or("");

    PICTOGRAPHIC_RE
        .replace_all(segment, "")
        .trim()
        .to_string()
}

/// Replace `|` so a tag can't break `|`-separated table columns
pub fn sanitize_tag(tag: &str) -> String {
    tag.replace('|', "-")
}

/// Remove all whitespace and append the archive extension
pub fn to_filename(name: &str) -> String {
    let mut filename: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    filename.push_str(ARCHIVE_EXTENSION);
    filename
}

/// Turn an artifact filename back into a search query
pub fn filename_to_query(filename: &str) -> String {
    filename
        .strip_suffix(ARCHIVE_EXTENSION)
        .unwrap_or(filename)
        .to_string()
}
