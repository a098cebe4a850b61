//! Text normalization for directory names, tags and changelogs.
//!
//! Resource names on the directory are noisy ("1.13-1.17 | Foo - The best
//! plugin!!"). These helpers turn them into something that can be shown in a
//! table, used as a filename, and searched for again later.

pub mod description;
pub mod normalize;

pub use description::{clean_description, MAX_DESCRIPTION_CHARS};
pub use normalize::{filename_to_query, sanitize_name, sanitize_tag, split_title_case, to_filename};

/// Extension of installed artifacts
pub const ARCHIVE_EXTENSION: &str = ".jar";
