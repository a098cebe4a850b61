//! Console formatting.
//!
//! Stateless: every call returns the styled string, nothing is initialised.

use crate::domain::Candidate;

/// Semantic style of a console line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Bright, for headings and progress
    Status,
    /// Low emphasis detail
    Dimmed,
    Success,
    Warning,
    Error,
}

impl Level {
    fn ansi(self) -> &'static str {
        match self {
            Self::Status => "\x1b[1m\x1b[37m",
            Self::Dimmed => "\x1b[22m\x1b[37m",
            Self::Success => "\x1b[32m",
            Self::Warning => "\x1b[33m",
            Self::Error => "\x1b[31m",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// Wrap `text` in the colour of `level`
pub fn format_text(text: &str, level: Level) -> String {
    format!("{}{}{}", level.ansi(), text, RESET)
}

/// A dimmed horizontal rule
pub fn separator() -> String {
    format_text(&"-".repeat(20), Level::Dimmed)
}

/// Numbered candidate list, `|` separated
pub fn candidate_table(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!(
                "{:>3} | {} | {} | by {} | {} downloads",
                i + 1,
                format_text(&c.name, Level::Status),
                c.tag,
                c.author_name.as_deref().unwrap_or("unknown"),
                c.download_count
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
