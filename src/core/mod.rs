//! Resolution and update pipeline.
//!
//! This module contains:
//! - Ranker: merging and ordering of search pages
//! - Search: query variants and candidate resolution
//! - Artifact: install metadata embedded in downloaded archives
//! - PluginManager: per-plugin install/update orchestration

pub mod artifact;
pub mod manager;
pub mod outcome;
pub mod prompt;
pub mod ranker;
pub mod search;

// Re-export commonly used types
pub use artifact::{artifact_digest, read_metadata, write_metadata, MetadataError, METADATA_ENTRY};
pub use manager::PluginManager;
pub use outcome::{BatchSummary, Installed, Lookup, PluginError, UpdateStatus};
pub use prompt::{AutoPrompt, Prompt};
pub use ranker::{rank, surface_matches};
pub use search::{query_variants, search};
