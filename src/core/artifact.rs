//! Install metadata embedded in downloaded artifacts.
//!
//! Each artifact carries one JSON record under [`METADATA_ENTRY`]. Reading is
//! permissive: anything short of a well-formed record is reported as
//! untracked rather than an error, so one foreign or corrupt archive cannot
//! stop a batch update.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;
use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::domain::{Candidate, InstalledMetadata, MetadataRead, UntrackedReason};

/// Reserved archive entry holding the install metadata
pub const METADATA_ENTRY: &str = ".spud_meta.json";

/// Errors writing install metadata
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] ZipError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Record `candidate` as the installed resource of the archive at `path`.
///
/// The record is appended as a new entry; existing entries are left as they
/// are. An archive that already holds a record is first rebuilt without it,
/// so there is never more than one.
pub fn write_metadata(candidate: &Candidate, path: &Path) -> Result<(), MetadataError> {
    let metadata = InstalledMetadata::from_candidate(candidate);
    let json = serde_json::to_vec(&metadata)?;

    if has_metadata_entry(path)? {
        debug!(path = %path.display(), "Replacing existing install metadata");
        rebuild_without_metadata(path)?;
    }

    let file = OpenOptions::new().read(true).write(true).open(path)?;
    let mut archive = ZipWriter::new_append(file)?;
    archive.start_file(METADATA_ENTRY, FileOptions::default())?;
    archive.write_all(&json)?;
    archive.finish()?;

    Ok(())
}

/// Read the install metadata of the archive at `path`. Never fails.
pub fn read_metadata(path: &Path) -> MetadataRead {
    match try_read_metadata(path) {
        Ok(metadata) => MetadataRead::Tracked(metadata),
        Err(reason) => {
            debug!(path = %path.display(), %reason, "Artifact is untracked");
            MetadataRead::Untracked(reason)
        }
    }
}

fn try_read_metadata(path: &Path) -> Result<InstalledMetadata, UntrackedReason> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => UntrackedReason::Missing,
        _ => UntrackedReason::Unreadable,
    })?;

    let mut archive = ZipArchive::new(file).map_err(|_| UntrackedReason::NotArchive)?;
    let mut entry = archive.by_name(METADATA_ENTRY).map_err(|e| match e {
        ZipError::FileNotFound => UntrackedReason::NoEntry,
        _ => UntrackedReason::Invalid,
    })?;

    let mut json = String::new();
    entry
        .read_to_string(&mut json)
        .map_err(|_| UntrackedReason::Invalid)?;

    serde_json::from_str(&json).map_err(|_| UntrackedReason::Invalid)
}

fn has_metadata_entry(path: &Path) -> Result<bool, MetadataError> {
    let archive = ZipArchive::new(File::open(path)?)?;
    let found = archive.file_names().any(|name| name == METADATA_ENTRY);
    Ok(found)
}

/// Copy every entry except the metadata record into a sibling temp file,
/// then move it over the original.
fn rebuild_without_metadata(path: &Path) -> Result<(), MetadataError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut source = ZipArchive::new(File::open(path)?)?;
    let mut rebuilt = ZipWriter::new(NamedTempFile::new_in(dir)?);

    for i in 0..source.len() {
        let entry = source.by_index_raw(i)?;
        if entry.name() == METADATA_ENTRY {
            continue;
        }
        rebuilt.raw_copy_file(entry)?;
    }

    let temp = rebuilt.finish()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

/// SHA-256 of an artifact payload, lowercase hex
pub fn artifact_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
