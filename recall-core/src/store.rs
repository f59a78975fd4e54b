//! The boundary to the document store that owns entries.
//!
//! [`EntryStore`] is the only contract the rest of the crate relies on.
//! [`MemoryStore`] backs tests; [`FileStore`] is a local stand-in that keeps the
//! collection in a single JSON Lines file.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::entry::{Entry, EntryDraft, EntryId, EntryPatch};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no entry with id `{0}`")]
    NotFound(EntryId),
}

pub trait EntryStore {
    /// All entries, newest `created_at` first.
    fn list(&self) -> Result<Vec<Entry>>;

    fn get(&self, id: &EntryId) -> Result<Option<Entry>>;

    /// Stores a new entry and assigns its id.
    fn add(&mut self, draft: EntryDraft, created_at: DateTime<Utc>) -> Result<Entry>;

    fn update(&mut self, id: &EntryId, patch: EntryPatch) -> Result<Entry>;

    /// Sets or (with `None`) clears the review timestamp.
    fn set_review(&mut self, id: &EntryId, review_at: Option<DateTime<Utc>>) -> Result<Entry>;

    fn delete(&mut self, id: &EntryId) -> Result<()>;
}

fn new_entry(draft: EntryDraft, created_at: DateTime<Utc>) -> Entry {
    Entry {
        id: EntryId::new(Uuid::now_v7().to_string()),
        topic: draft.topic,
        body: draft.body,
        created_at,
        review_at: None,
        related: draft.related,
    }
}

fn newest_first(mut entries: Vec<Entry>) -> Vec<Entry> {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    entries
}

fn modify(
    entries: &mut [Entry],
    id: &EntryId,
    change: impl FnOnce(&mut Entry),
) -> Result<Entry> {
    let entry = entries
        .iter_mut()
        .find(|e| &e.id == id)
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;
    change(entry);
    Ok(entry.clone())
}

fn remove(entries: &mut Vec<Entry>, id: &EntryId) -> Result<()> {
    let before = entries.len();
    entries.retain(|e| &e.id != id);
    if entries.len() == before {
        return Err(StoreError::NotFound(id.clone()).into());
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Vec<Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

impl EntryStore for MemoryStore {
    fn list(&self) -> Result<Vec<Entry>> {
        Ok(newest_first(self.entries.clone()))
    }

    fn get(&self, id: &EntryId) -> Result<Option<Entry>> {
        Ok(self.entries.iter().find(|e| &e.id == id).cloned())
    }

    fn add(&mut self, draft: EntryDraft, created_at: DateTime<Utc>) -> Result<Entry> {
        let entry = new_entry(draft, created_at);
        self.entries.push(entry.clone());
        Ok(entry)
    }

    fn update(&mut self, id: &EntryId, patch: EntryPatch) -> Result<Entry> {
        modify(&mut self.entries, id, |e| patch.apply(e))
    }

    fn set_review(&mut self, id: &EntryId, review_at: Option<DateTime<Utc>>) -> Result<Entry> {
        modify(&mut self.entries, id, |e| e.review_at = review_at)
    }

    fn delete(&mut self, id: &EntryId) -> Result<()> {
        remove(&mut self.entries, id)
    }
}

/// Entries in one JSON Lines file. Every call reads the file; every mutation
/// rewrites it through a temporary file and a rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Opens (without reading) the store at `path`, creating its parent directory.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating store directory {}", parent.display()))?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Entry>> {
        Ok(self.load_lines()?.entries)
    }

    fn load_lines(&self) -> Result<StoredLines> {
        let mut stored = StoredLines::default();
        if !self.path.exists() {
            return Ok(stored);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;

        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Entry>(line) {
                Ok(entry) => stored.entries.push(entry),
                Err(error) => {
                    warn!(
                        path = %self.path.display(),
                        line_number = idx + 1,
                        %error,
                        "skipping corrupt entry line"
                    );
                    stored.unparsed.push(line.to_string());
                }
            }
        }
        debug!(
            path = %self.path.display(),
            count = stored.entries.len(),
            unparsed = stored.unparsed.len(),
            "loaded entries"
        );
        Ok(stored)
    }

    /// Rewrites the file with `stored.entries` followed by the lines that did not parse.
    fn save(&self, stored: &StoredLines) -> Result<()> {
        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp_path)
            .with_context(|| format!("opening {}", tmp_path.display()))?;
        let mut writer = BufWriter::new(file);
        for entry in &stored.entries {
            let line = serde_json::to_string(entry).context("serializing entry")?;
            writeln!(writer, "{line}")
                .with_context(|| format!("writing {}", tmp_path.display()))?;
        }
        for line in &stored.unparsed {
            writeln!(writer, "{line}")
                .with_context(|| format!("writing {}", tmp_path.display()))?;
        }
        writer
            .flush()
            .with_context(|| format!("flushing {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }

    fn mutate<T>(&mut self, change: impl FnOnce(&mut Vec<Entry>) -> Result<T>) -> Result<T> {
        let mut stored = self.load_lines()?;
        let out = change(&mut stored.entries)?;
        self.save(&stored)?;
        Ok(out)
    }
}

/// File content split into entries and lines kept verbatim because they did not parse.
#[derive(Debug, Default)]
struct StoredLines {
    entries: Vec<Entry>,
    unparsed: Vec<String>,
}

impl EntryStore for FileStore {
    fn list(&self) -> Result<Vec<Entry>> {
        Ok(newest_first(self.load()?))
    }

    fn get(&self, id: &EntryId) -> Result<Option<Entry>> {
        Ok(self.load()?.into_iter().find(|e| &e.id == id))
    }

    fn add(&mut self, draft: EntryDraft, created_at: DateTime<Utc>) -> Result<Entry> {
        let entry = new_entry(draft, created_at);
        self.mutate(|entries| {
            entries.push(entry.clone());
            Ok(())
        })?;
        info!(id = %entry.id, path = %self.path.display(), "added entry");
        Ok(entry)
    }

    fn update(&mut self, id: &EntryId, patch: EntryPatch) -> Result<Entry> {
        self.mutate(|entries| modify(entries, id, |e| patch.apply(e)))
    }

    fn set_review(&mut self, id: &EntryId, review_at: Option<DateTime<Utc>>) -> Result<Entry> {
        self.mutate(|entries| modify(entries, id, |e| e.review_at = review_at))
    }

    fn delete(&mut self, id: &EntryId) -> Result<()> {
        self.mutate(|entries| remove(entries, id))?;
        info!(%id, path = %self.path.display(), "deleted entry");
        Ok(())
    }
}
