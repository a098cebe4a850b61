//! Install provenance stored inside downloaded artifacts.

use serde::{Deserialize, Serialize};

use super::Candidate;

/// The record embedded in each artifact under the reserved entry.
///
/// Field names on the wire match what earlier releases wrote, so artifacts
/// installed by them stay tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledMetadata {
    /// Name the resource was installed under
    pub search_name: String,

    /// Directory resource id
    #[serde(rename = "plugin_id")]
    pub resource_id: i64,

    /// Installed version id
    #[serde(rename = "plugin_version_id")]
    pub version_id: i64,
}

impl InstalledMetadata {
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            search_name: candidate.name.clone(),
            resource_id: candidate.id,
            version_id: candidate.latest_version_id,
        }
    }

    /// Whether `remote_version_id` supersedes the installed version
    pub fn is_stale(&self, remote_version_id: i64) -> bool {
        is_stale(self.version_id, remote_version_id)
    }
}

/// Installed version is strictly older than the remote one.
///
/// Equal or newer installs are never stale, so a downgrade or a second pass
/// over the same artifact is a no-op.
pub fn is_stale(installed_version_id: i64, remote_version_id: i64) -> bool {
    installed_version_id < remote_version_id
}

/// Result of reading an artifact's metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataRead {
    Tracked(InstalledMetadata),
    Untracked(UntrackedReason),
}

impl MetadataRead {
    pub fn tracked(self) -> Option<InstalledMetadata> {
        match self {
            Self::Tracked(metadata) => Some(metadata),
            Self::Untracked(_) => None,
        }
    }
}

/// Why an artifact carries no usable metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UntrackedReason {
    /// The file does not exist
    Missing,

    /// The file exists but could not be opened
    Unreadable,

    /// The file is not a readable archive
    NotArchive,

    /// The archive has no reserved entry
    NoEntry,

    /// The entry is not valid metadata JSON
    Invalid,
}

impl std::fmt::Display for UntrackedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::Missing => "file not found",
            Self::Unreadable => "file could not be opened",
            Self::NotArchive => "not a valid archive",
            Self::NoEntry => "no install metadata",
            Self::Invalid => "corrupt install metadata",
        };
        f.write_str(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_stale() {
        assert!(is_stale(3, 5));
        assert!(!is_stale(5, 5));
        assert!(!is_stale(6, 5));
    }

    #[test]
    fn test_wire_field_names() {
        let metadata = InstalledMetadata {
            search_name: "LuckPerms".to_string(),
            resource_id: 28140,
            version_id: 7,
        };

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "search_name": "LuckPerms",
                "plugin_id": 28140,
                "plugin_version_id": 7,
            })
        );
    }

    #[test]
    fn test_rejects_wrong_scalar_types() {
        let bad = r#"{"search_name": "X", "plugin_id": "28140", "plugin_version_id": 7}"#;
        assert!(serde_json::from_str::<InstalledMetadata>(bad).is_err());

        let missing = r#"{"search_name": "X", "plugin_id": 1}"#;
        assert!(serde_json::from_str::<InstalledMetadata>(missing).is_err());
    }
}
