//! JSON-file history store.
//!
//! The file holds a single JSON array, most recent entry first. Reads are
//! forgiving: a missing, unreadable or malformed file opens as an empty
//! history. Writes are not, and surface [`HistoryError`].

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

/// Number of entries kept; older ones fall off the end on insert.
pub const MAX_ENTRIES: usize = 50;

/// One persisted submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_buyer: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentile: Option<f64>,
    pub date: DateTime<Utc>,
}

/// A submission that has not been timestamped yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewHistoryEntry {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_buyer: bool,
    pub percentile: Option<f64>,
}

impl NewHistoryEntry {
    fn stamp(self, date: DateTime<Utc>) -> HistoryEntry {
        HistoryEntry {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            is_buyer: self.is_buyer,
            percentile: self.percentile,
            date,
        }
    }
}

#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    rows: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Loads the history stored at `path`.
    ///
    /// Never fails: anything that cannot be read back as a list of entries
    /// is logged and replaced by an empty history.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let rows = load_rows(&path);
        Self { path, rows }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries, most recent first.
    #[must_use]
    pub fn rows(&self) -> &[HistoryEntry] {
        &self.rows
    }

    /// Stamps `entry` with the current time, prepends it and persists.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if the file cannot be written.
    pub fn add(&mut self, entry: NewHistoryEntry) -> Result<&HistoryEntry, HistoryError> {
        self.add_at(entry, Utc::now())
    }

    /// Like [`HistoryStore::add`] with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if the file cannot be written.
    pub fn add_at(
        &mut self,
        entry: NewHistoryEntry,
        date: DateTime<Utc>,
    ) -> Result<&HistoryEntry, HistoryError> {
        let mut rows = Vec::with_capacity(MAX_ENTRIES);
        rows.push(entry.stamp(date));
        rows.extend(self.rows.iter().take(MAX_ENTRIES - 1).cloned());
        self.commit(rows)?;
        Ok(&self.rows[0])
    }

    /// Removes the entry at `index`. An out-of-range index changes nothing
    /// and returns `Ok(None)` without touching the file.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if the file cannot be written.
    pub fn remove(&mut self, index: usize) -> Result<Option<HistoryEntry>, HistoryError> {
        if index >= self.rows.len() {
            return Ok(None);
        }
        let mut rows = self.rows.clone();
        let removed = rows.remove(index);
        self.commit(rows)?;
        Ok(Some(removed))
    }

    /// Drops every entry.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if the file cannot be written.
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.commit(Vec::new())
    }

    /// Writes `rows` to disk, then adopts them. On a failed write the
    /// in-memory rows are left as they were.
    fn commit(&mut self, rows: Vec<HistoryEntry>) -> Result<(), HistoryError> {
        self.persist(&rows)?;
        self.rows = rows;
        Ok(())
    }

    fn persist(&self, rows: &[HistoryEntry]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_vec_pretty(rows)?;

        // Write then rename so a crash mid-write leaves the previous file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), entries = rows.len(), "history saved");
        Ok(())
    }
}

fn load_rows(path: &Path) -> Vec<HistoryEntry> {
    let body = match fs::read(path) {
        Ok(body) => body,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "history unreadable, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_slice::<Vec<HistoryEntry>>(&body) {
        Ok(mut rows) => {
            rows.truncate(MAX_ENTRIES);
            rows
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "history corrupt, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
