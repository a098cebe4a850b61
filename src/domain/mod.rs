//! Domain types for spud.
//!
//! This module contains the core data structures:
//! - Candidate: a directory resource offered for installation
//! - InstalledMetadata: install provenance embedded in an artifact
//! - UpdateInfo: the latest changelog of a resource

pub mod candidate;
pub mod metadata;
pub mod update;

// Re-export commonly used types
pub use candidate::{Author, Candidate};
pub use metadata::{InstalledMetadata, MetadataRead, UntrackedReason};
pub use update::UpdateInfo;
