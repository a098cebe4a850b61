//! Decisions the pipeline asks of the user.

use crate::domain::{Candidate, InstalledMetadata, UpdateInfo};

/// Interactive decisions during install and update.
///
/// `None` from any method means input ended without an answer; the pipeline
/// treats that as the user skipping the current plugin.
pub trait Prompt {
    /// Whether a human is answering
    fn interactive(&self) -> bool;

    /// Pick one of `candidates` (never empty) for `query`
    fn choose(&mut self, query: &str, candidates: &[Candidate]) -> Option<usize>;

    /// Ask a yes/no question
    fn confirm(&mut self, question: &str) -> Option<bool>;

    /// Offer an available update, with its changelog when known
    fn confirm_update(
        &mut self,
        installed: &InstalledMetadata,
        latest: &Candidate,
        info: Option<&UpdateInfo>,
    ) -> Option<bool>;
}

/// Non-interactive answers: always the top candidate, always yes
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoPrompt;

impl Prompt for AutoPrompt {
    fn interactive(&self) -> bool {
        false
    }

    fn choose(&mut self, _query: &str, _candidates: &[Candidate]) -> Option<usize> {
        Some(0)
    }

    fn confirm(&mut self, _question: &str) -> Option<bool> {
        Some(true)
    }

    fn confirm_update(
        &mut self,
        _installed: &InstalledMetadata,
        _latest: &Candidate,
        _info: Option<&UpdateInfo>,
    ) -> Option<bool> {
        Some(true)
    }
}
