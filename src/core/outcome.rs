//! Results of per-plugin operations.

use std::path::PathBuf;

use thiserror::Error;

use super::artifact::MetadataError;
use crate::adapters::DirectoryError;
use crate::domain::{Candidate, UntrackedReason};

/// A lookup that may legitimately find nothing.
///
/// Wrapped in a `Result`, this keeps "no results" apart from a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    Empty,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Empty => None,
        }
    }
}

/// Why a single plugin could not be processed.
///
/// None of these abort a batch; each becomes one status line.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("No plugins found for '{query}'")]
    NotFound { query: String },

    #[error("{} is not tracked ({reason}), reinstall it with `spud install`", file.display())]
    Untracked {
        file: PathBuf,
        reason: UntrackedReason,
    },

    #[error("Skipped")]
    UserSkipped,

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("Could not record install metadata: {0}")]
    Metadata(#[from] MetadataError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PluginError {
    /// The directory failed server-side or could not be reached
    pub fn is_service(&self) -> bool {
        matches!(self, Self::Directory(e) if e.is_service())
    }
}

/// A freshly downloaded and tracked artifact
#[derive(Debug, Clone)]
pub struct Installed {
    pub file: PathBuf,
    pub candidate: Candidate,
    /// SHA-256 of the downloaded payload, hex encoded
    pub digest: String,
}

/// Outcome of an update check on one artifact
#[derive(Debug, Clone)]
pub enum UpdateStatus {
    UpToDate { name: String, version_id: i64 },
    Updated { installed: Installed, from_version: i64 },
    /// The user chose not to apply an available update
    Declined { name: String, version_id: i64 },
    /// An untracked artifact was replaced by a fresh install
    Reinstalled(Installed),
}

/// Tally of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn record<T>(&mut self, result: &Result<T, PluginError>) {
        match result {
            Ok(_) => self.succeeded += 1,
            Err(PluginError::UserSkipped) => self.skipped += 1,
            Err(_) => self.failed += 1,
        }
    }
}
