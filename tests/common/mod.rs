//! Shared fixtures: an in-memory directory, a scripted prompt, and jar builders.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::io::{Cursor, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use spud::adapters::{Directory, DirectoryError, SortKey};
use spud::core::Prompt;
use spud::domain::{Author, Candidate, InstalledMetadata, UpdateInfo};
use zip::write::FileOptions;
use zip::ZipWriter;

pub fn candidate(id: i64, name: &str, downloads: i64) -> Candidate {
    Candidate {
        id,
        name: name.to_string(),
        tag: format!("{name} | tagline"),
        download_count: downloads,
        author_id: id * 10,
        author_name: None,
        latest_version_id: 1,
    }
}

/// Build an in-memory jar holding the given entries
pub fn jar_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// A directory answering from fixed tables
#[derive(Default)]
pub struct FakeDirectory {
    /// Search results by exact query string
    pub pages: HashMap<String, Vec<Candidate>>,
    pub resources: HashMap<i64, Candidate>,
    pub authors: HashMap<i64, String>,
    /// Artifact bytes, or the status to fail the download with
    pub artifacts: HashMap<i64, Result<Vec<u8>, u16>>,
    pub updates: HashMap<i64, UpdateInfo>,
    /// Status every search fails with
    pub search_status: Option<u16>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, query: &str, page: Vec<Candidate>) -> Self {
        for c in &page {
            self.authors
                .entry(c.author_id)
                .or_insert_with(|| format!("author{}", c.author_id));
        }
        self.pages.insert(query.to_string(), page);
        self
    }

    pub fn with_resource(mut self, resource: Candidate) -> Self {
        self.resources.insert(resource.id, resource);
        self
    }

    pub fn with_artifact(mut self, id: i64, bytes: Vec<u8>) -> Self {
        self.artifacts.insert(id, Ok(bytes));
        self
    }

    pub fn with_failed_artifact(mut self, id: i64, status: u16) -> Self {
        self.artifacts.insert(id, Err(status));
        self
    }

    pub fn with_update(mut self, id: i64, update: UpdateInfo) -> Self {
        self.updates.insert(id, update);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn failure(status: u16) -> DirectoryError {
    if status >= 500 {
        DirectoryError::Service { status }
    } else {
        DirectoryError::Unsuccessful {
            status,
            message: "request failed".to_string(),
        }
    }
}

#[async_trait]
impl Directory for FakeDirectory {
    async fn search_resources(
        &self,
        query: &str,
        size: usize,
        _sort: SortKey,
    ) -> Result<Vec<Candidate>, DirectoryError> {
        self.record(format!("search:{query}"));
        if let Some(status) = self.search_status {
            return Err(failure(status));
        }

        let mut page = self.pages.get(query).cloned().unwrap_or_default();
        page.truncate(size);
        Ok(page)
    }

    async fn get_by_id(&self, id: i64) -> Result<Candidate, DirectoryError> {
        self.record(format!("resource:{id}"));
        self.resources.get(&id).cloned().ok_or_else(|| failure(404))
    }

    async fn get_author(&self, id: i64) -> Result<Author, DirectoryError> {
        self.record(format!("author:{id}"));
        let name = self.authors.get(&id).cloned().ok_or_else(|| failure(404))?;
        Ok(Author { id, name })
    }

    async fn download(&self, id: i64) -> Result<Vec<u8>, DirectoryError> {
        self.record(format!("download:{id}"));
        match self.artifacts.get(&id) {
            Some(Ok(bytes)) => Ok(bytes.clone()),
            Some(Err(status)) => Err(failure(*status)),
            None => Err(failure(404)),
        }
    }

    async fn latest_update(&self, id: i64) -> Result<UpdateInfo, DirectoryError> {
        self.record(format!("update:{id}"));
        self.updates.get(&id).cloned().ok_or_else(|| failure(404))
    }
}

/// A prompt answering from queues; an empty queue behaves like end of input
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    pub interactive: bool,
    pub choices: VecDeque<usize>,
    pub confirms: VecDeque<bool>,
    /// Candidate ids offered on each `choose`
    pub offered: Vec<Vec<i64>>,
    pub questions: Vec<String>,
}

impl ScriptedPrompt {
    pub fn interactive() -> Self {
        Self {
            interactive: true,
            ..Default::default()
        }
    }

    pub fn choosing(mut self, choices: &[usize]) -> Self {
        self.choices.extend(choices);
        self
    }

    pub fn confirming(mut self, answers: &[bool]) -> Self {
        self.confirms.extend(answers);
        self
    }
}

impl Prompt for ScriptedPrompt {
    fn interactive(&self) -> bool {
        self.interactive
    }

    fn choose(&mut self, _query: &str, candidates: &[Candidate]) -> Option<usize> {
        self.offered.push(candidates.iter().map(|c| c.id).collect());
        self.choices.pop_front()
    }

    fn confirm(&mut self, question: &str) -> Option<bool> {
        self.questions.push(question.to_string());
        self.confirms.pop_front()
    }

    fn confirm_update(
        &mut self,
        installed: &InstalledMetadata,
        latest: &Candidate,
        info: Option<&UpdateInfo>,
    ) -> Option<bool> {
        self.questions.push(format!(
            "update {} {}->{} changelog:{}",
            installed.search_name,
            installed.version_id,
            latest.latest_version_id,
            info.map(|i| i.title.as_str()).unwrap_or("none")
        ));
        self.confirms.pop_front()
    }
}
