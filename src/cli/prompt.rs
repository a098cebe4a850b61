//! Line-based prompts on a terminal.

use std::io::{self, BufRead, Stderr, StdinLock, Write};

use super::console::{candidate_table, format_text, separator, Level};
use crate::core::Prompt;
use crate::domain::{Candidate, InstalledMetadata, UpdateInfo};

/// Prompts read from `input` and written to `output`.
///
/// End of input ends the current question with no answer.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<StdinLock<'static>, Stderr> {
    /// Prompt on stdin, writing questions to stderr
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: &str) {
        // A closed terminal shows up as end of input on the next read
        let _ = writeln!(self.output, "{text}");
    }

    /// Ask for one line; `None` at end of input
    fn ask(&mut self, question: &str) -> Option<String> {
        let _ = write!(
            self.output,
            "{}",
            format_text(&format!("{question}: "), Level::Warning)
        );
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn interactive(&self) -> bool {
        true
    }

    fn choose(&mut self, query: &str, candidates: &[Candidate]) -> Option<usize> {
        self.say(&format_text(&format!("Results for '{query}':"), Level::Status));
        self.say(&candidate_table(candidates));

        loop {
            let answer = self.ask(&format!("Choose a plugin [1-{}]", candidates.len()))?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=candidates.len()).contains(&n) => return Some(n - 1),
                _ => self.say(&format_text(
                    &format!("Answer must be a number from 1 to {}", candidates.len()),
                    Level::Error,
                )),
            }
        }
    }

    fn confirm(&mut self, question: &str) -> Option<bool> {
        loop {
            let answer = self.ask(&format!("{question} (y/n)"))?.to_lowercase();
            match answer.as_str() {
                "y" => return Some(true),
                "n" => return Some(false),
                _ => self.say(&format_text("Answer must be 'y' or 'n'", Level::Error)),
            }
        }
    }

    fn confirm_update(
        &mut self,
        installed: &InstalledMetadata,
        latest: &Candidate,
        info: Option<&UpdateInfo>,
    ) -> Option<bool> {
        self.say(&separator());
        self.say(&format_text(
            &format!(
                "Update available for {} (version {} -> {})",
                installed.search_name, installed.version_id, latest.latest_version_id
            ),
            Level::Status,
        ));

        if let Some(info) = info {
            let released = info
                .date
                .map(|d| format!(" ({})", d.format("%Y-%m-%d")))
                .unwrap_or_default();
            self.say(&format_text(&format!("{}{}", info.title, released), Level::Status));
            if !info.description.is_empty() {
                self.say(&format_text(&info.description, Level::Dimmed));
            }
        }
        self.say(&separator());

        self.confirm(&format!("Update {}?", installed.search_name))
    }
}
