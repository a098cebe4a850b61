//! spud - Spigot plugin manager
//!
//! Searches the Spiget resource directory, resolves a typed name to a
//! resource, downloads its artifact, and records install metadata inside the
//! artifact so later runs can detect and apply updates.
//!
//! # Modules
//!
//! - `adapters`: Remote directory access (Spiget)
//! - `core`: Ranking, search, artifact metadata, install/update pipeline
//! - `domain`: Data structures (Candidate, InstalledMetadata, UpdateInfo)
//! - `text`: Name, tag and changelog normalization
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Install plugins into ./plugins
//! spud -d plugins install LuckPerms EssentialsX
//!
//! # Update everything without prompting
//! spud -n -d plugins update
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod text;

// Re-export main types at crate root for convenience
pub use adapters::{Directory, DirectoryError, SortKey, SpigetClient};
pub use core::{Lookup, PluginError, PluginManager};
pub use domain::{Candidate, InstalledMetadata, MetadataRead, UpdateInfo};
