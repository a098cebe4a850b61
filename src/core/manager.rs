//! Install and update pipeline for a directory of plugin artifacts.
//!
//! One plugin is processed to completion before the next. A failure on one
//! plugin is returned to the caller and never stops the rest of a batch.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::{info, instrument, warn};

use super::artifact::{artifact_digest, read_metadata, write_metadata};
use super::outcome::{BatchSummary, Installed, Lookup, PluginError, UpdateStatus};
use super::prompt::Prompt;
use super::search::search;
use crate::adapters::Directory;
use crate::config::SearchSettings;
use crate::domain::{Candidate, MetadataRead, UntrackedReason};
use crate::text::{filename_to_query, to_filename, ARCHIVE_EXTENSION};

/// Installs and updates plugins in one directory
pub struct PluginManager<D, P> {
    directory: D,
    prompt: P,
    plugins_dir: PathBuf,
    search: SearchSettings,
}

impl<D: Directory, P: Prompt> PluginManager<D, P> {
    pub fn new(directory: D, prompt: P, plugins_dir: impl Into<PathBuf>, search: SearchSettings) -> Self {
        Self {
            directory,
            prompt,
            plugins_dir: plugins_dir.into(),
            search,
        }
    }

    pub fn plugins_dir(&self) -> &Path {
        &self.plugins_dir
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Artifact path a plugin name installs to.
    ///
    /// A name already carrying the archive extension maps to itself.
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.plugins_dir.join(to_filename(&filename_to_query(name)))
    }

    /// Every artifact in the plugins directory, sorted
    pub fn discover_artifacts(&self) -> Result<Vec<PathBuf>> {
        let pattern = format!(
            "{}/*{}",
            glob::Pattern::escape(&self.plugins_dir.to_string_lossy()),
            ARCHIVE_EXTENSION
        );

        let mut artifacts = glob::glob(&pattern)
            .with_context(|| format!("Invalid artifact pattern: {pattern}"))?
            .filter_map(|entry| match entry {
                Ok(path) if path.is_file() => Some(path),
                Ok(_) => None,
                Err(e) => {
                    warn!("Skipping unreadable path: {}", e);
                    None
                }
            })
            .collect::<Vec<_>>();

        artifacts.sort();
        Ok(artifacts)
    }

    /// Search for `query`, let the prompt pick, then download and track it
    #[instrument(skip(self))]
    pub async fn install(&mut self, query: &str) -> Result<Installed, PluginError> {
        self.install_into(query, None).await
    }

    async fn install_into(
        &mut self,
        query: &str,
        target: Option<&Path>,
    ) -> Result<Installed, PluginError> {
        let mut candidates = match search(&self.directory, query, &self.search).await? {
            Lookup::Found(candidates) => candidates,
            Lookup::Empty => {
                return Err(PluginError::NotFound {
                    query: query.to_string(),
                })
            }
        };

        loop {
            let index = self
                .prompt
                .choose(query, &candidates)
                .filter(|&i| i < candidates.len())
                .ok_or(PluginError::UserSkipped)?;
            let candidate = candidates[index].clone();

            let file = match target {
                Some(path) => path.to_path_buf(),
                None if candidate.name.is_empty() => self.artifact_path(query),
                None => self.artifact_path(&candidate.name),
            };

            match self.fetch(&candidate, &file).await {
                Err(PluginError::Directory(e))
                    if !e.is_service() && self.prompt.interactive() && candidates.len() > 1 =>
                {
                    warn!(plugin = %candidate.name, error = %e, "Download failed, offering the remaining candidates");
                    candidates.remove(index);
                }
                result => return result,
            }
        }
    }

    /// Download `candidate` to `file` and embed its metadata.
    ///
    /// The payload is staged next to `file` and only moved over it once the
    /// metadata is in place, so a download that is not an archive leaves any
    /// existing artifact untouched.
    async fn fetch(&self, candidate: &Candidate, file: &Path) -> Result<Installed, PluginError> {
        let bytes = self.directory.download(candidate.id).await?;
        let digest = artifact_digest(&bytes);

        let dir = match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let staged = NamedTempFile::new_in(dir)?;
        tokio::fs::write(staged.path(), &bytes).await?;
        write_metadata(candidate, staged.path())?;
        staged.persist(file).map_err(|e| e.error)?;

        info!(
            plugin = %candidate.name,
            file = %file.display(),
            version = candidate.latest_version_id,
            sha256 = %digest,
            "Installed"
        );

        Ok(Installed {
            file: file.to_path_buf(),
            candidate: candidate.clone(),
            digest,
        })
    }

    /// Check one artifact against the directory and apply a newer version
    #[instrument(skip(self, file), fields(file = %file.display()))]
    pub async fn update(&mut self, file: &Path) -> Result<UpdateStatus, PluginError> {
        let installed = match read_metadata(file) {
            MetadataRead::Tracked(metadata) => metadata,
            MetadataRead::Untracked(reason) => return self.reinstall_untracked(file, reason).await,
        };

        let latest = self.directory.get_by_id(installed.resource_id).await?.sanitized();
        if !installed.is_stale(latest.latest_version_id) {
            return Ok(UpdateStatus::UpToDate {
                name: installed.search_name,
                version_id: installed.version_id,
            });
        }

        let info = match self.directory.latest_update(latest.id).await {
            Ok(info) => Some(info),
            Err(e) => {
                warn!(plugin = %latest.name, error = %e, "No changelog available");
                None
            }
        };

        match self.prompt.confirm_update(&installed, &latest, info.as_ref()) {
            None => Err(PluginError::UserSkipped),
            Some(false) => Ok(UpdateStatus::Declined {
                name: installed.search_name,
                version_id: installed.version_id,
            }),
            Some(true) => {
                let updated = self.fetch(&latest, file).await?;
                Ok(UpdateStatus::Updated {
                    installed: updated,
                    from_version: installed.version_id,
                })
            }
        }
    }

    /// Offer to replace an untracked artifact with a fresh install.
    ///
    /// Only asked interactively; the query comes from the filename.
    async fn reinstall_untracked(
        &mut self,
        file: &Path,
        reason: UntrackedReason,
    ) -> Result<UpdateStatus, PluginError> {
        let untracked = || PluginError::Untracked {
            file: file.to_path_buf(),
            reason,
        };

        if reason == UntrackedReason::Missing || !self.prompt.interactive() {
            return Err(untracked());
        }

        let filename = file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let query = filename_to_query(&filename);
        if query.is_empty() {
            return Err(untracked());
        }

        warn!(%reason, "Artifact is not tracked");
        let question = format!("{filename} is not tracked ({reason}). Reinstall it as '{query}'?");
        match self.prompt.confirm(&question) {
            None => Err(PluginError::UserSkipped),
            Some(false) => Err(untracked()),
            Some(true) => Ok(UpdateStatus::Reinstalled(
                self.install_into(&query, Some(file)).await?,
            )),
        }
    }

    /// Install every name in turn, reporting each result as it completes
    pub async fn install_all<F>(&mut self, names: &[String], mut report: F) -> BatchSummary
    where
        F: FnMut(&str, &Result<Installed, PluginError>),
    {
        let mut summary = BatchSummary::default();
        for name in names {
            let result = self.install(name).await;
            if let Err(e) = &result {
                warn!(plugin = %name, error = %e, "Install failed");
            }
            summary.record(&result);
            report(name, &result);
        }
        summary
    }

    /// Update every artifact in turn, reporting each result as it completes
    pub async fn update_all<F>(&mut self, files: &[PathBuf], mut report: F) -> BatchSummary
    where
        F: FnMut(&Path, &Result<UpdateStatus, PluginError>),
    {
        let mut summary = BatchSummary::default();
        for file in files {
            let result = self.update(file).await;
            if let Err(e) = &result {
                warn!(file = %file.display(), error = %e, "Update failed");
            }
            summary.record(&result);
            report(file, &result);
        }
        summary
    }
}
