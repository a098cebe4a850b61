//! Resources returned by a directory search.

use serde::{Deserialize, Serialize};

use crate::text;

/// A searchable resource, pre-selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Directory resource id
    pub id: i64,

    /// Display name (sanitized once ranked)
    pub name: String,

    /// One-line tagline
    pub tag: String,

    /// Total downloads, the primary ranking signal
    pub download_count: i64,

    /// Author id
    pub author_id: i64,

    /// Author display name, resolved after ranking
    pub author_name: Option<String>,

    /// Id of the latest released version
    pub latest_version_id: i64,
}

impl Candidate {
    /// Return a copy with name and tag cleaned for display and storage
    pub fn sanitized(&self) -> Self {
        Self {
            name: text::sanitize_name(&self.name),
            tag: text::sanitize_tag(&self.tag),
            ..self.clone()
        }
    }

    /// Return a copy with the author's display name attached
    pub fn with_author(&self, author_name: impl Into<String>) -> Self {
        Self {
            author_name: Some(author_name.into()),
            ..self.clone()
        }
    }

    /// Artifact filename this candidate installs to
    pub fn filename(&self) -> String {
        text::to_filename(&self.name)
    }
}

/// A resource author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
}
