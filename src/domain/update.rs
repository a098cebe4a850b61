//! Changelog of a resource's latest release.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The latest update of a resource, description already cleaned to plain text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInfo {
    pub title: String,

    /// Plain text, capped at `text::MAX_DESCRIPTION_CHARS` plus an ellipsis
    pub description: String,

    /// Release time, if the directory reported one
    pub date: Option<DateTime<Utc>>,

    pub likes: Option<i64>,
}
