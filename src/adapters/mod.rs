//! Adapter interfaces for the remote resource directory.
//!
//! All network access goes through the [`Directory`] trait. The production
//! implementation is [`SpigetClient`]; tests substitute an in-memory directory.

pub mod spiget;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Author, Candidate, UpdateInfo};

// Re-export the Spiget client
pub use spiget::{SpigetClient, DEFAULT_API_URL};

/// Errors from a directory call
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The directory answered with a 5xx
    #[error("Directory service error (status {status})")]
    Service { status: u16 },

    /// The directory could not be reached
    #[error("Directory unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// Any other non-2xx answer
    #[error("{message} (status {status})")]
    Unsuccessful { status: u16, message: String },

    #[error("Malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid update description encoding: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Invalid directory URL: {0}")]
    InvalidBaseUrl(String),
}

impl DirectoryError {
    /// Server-side failure or unreachable service
    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service { .. } | Self::Transport(_))
    }

    /// Map a response status to an error, if it is not a success.
    ///
    /// 5xx is a service failure; every other non-2xx becomes a status/message
    /// pair built from `message`.
    pub fn check_status(status: StatusCode, message: &str) -> Result<(), Self> {
        if status.is_server_error() {
            Err(Self::Service {
                status: status.as_u16(),
            })
        } else if !status.is_success() {
            Err(Self::Unsuccessful {
                status: status.as_u16(),
                message: message.to_string(),
            })
        } else {
            Ok(())
        }
    }
}

/// Sort order for directory searches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Most downloaded first
    #[default]
    Downloads,

    /// Best rated first
    Rating,

    /// Most recently updated first
    Updated,

    /// Alphabetical
    Name,
}

impl SortKey {
    /// Value of the directory's `sort` query parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Downloads => "-downloads",
            Self::Rating => "-rating",
            Self::Updated => "-updateDate",
            Self::Name => "name",
        }
    }
}

/// Trait for a remote resource directory
#[async_trait]
pub trait Directory: Send + Sync {
    /// Search resources by name.
    ///
    /// No match is an empty list, not an error.
    async fn search_resources(
        &self,
        query: &str,
        size: usize,
        sort: SortKey,
    ) -> Result<Vec<Candidate>, DirectoryError>;

    /// Fetch a single resource
    async fn get_by_id(&self, id: i64) -> Result<Candidate, DirectoryError>;

    /// Resolve an author id to its display name
    async fn get_author(&self, id: i64) -> Result<Author, DirectoryError>;

    /// Fetch a resource's artifact bytes
    async fn download(&self, id: i64) -> Result<Vec<u8>, DirectoryError>;

    /// Fetch the latest changelog of a resource, cleaned to plain text
    async fn latest_update(&self, id: i64) -> Result<UpdateInfo, DirectoryError>;
}
