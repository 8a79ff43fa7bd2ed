//! # File Storage
//!
//! Single-document JSON backend.
//!
//! ## Write Path
//! ```text
//! set("cart_u1", "[...]")
//!      │
//!      ▼
//! next = entries.clone() + change
//!      │
//!      ▼
//! write next → .tmpXXXX (fsync) ──► persist → storage.json
//!      │                               │
//!      │ error                         │ ok
//!      ▼                               ▼
//! entries unchanged              entries = next
//! ```
//!
//! The temp file lives next to the document and is renamed over it, so
//! `set_many` is all-or-nothing: a reader sees either the old document or
//! the new one. A temp file left by a failed write is deleted on drop.
//!
//! ## Corrupt Documents
//! If the document on disk isn't a JSON object of strings, it is moved to
//! `<name>.corrupt` and the store starts empty.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::Storage;
use crate::error::{StorageError, StorageResult};

/// JSON-file-backed storage.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens (or starts) the document at `path`.
    ///
    /// A missing file is not an error; it is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let contents =
                fs::read_to_string(&path).map_err(|e| StorageError::io(&path, e))?;

            match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
                Ok(entries) => {
                    info!(path = %path.display(), keys = entries.len(), "Storage file loaded");
                    entries
                }
                Err(err) => {
                    let aside = sibling(&path, ".corrupt");
                    warn!(
                        path = %path.display(),
                        moved_to = %aside.display(),
                        error = %err,
                        "Storage file is corrupt, starting empty"
                    );
                    fs::rename(&path, &aside).map_err(|e| StorageError::io(&path, e))?;
                    BTreeMap::new()
                }
            }
        } else {
            debug!(path = %path.display(), "Storage file not found, starting empty");
            BTreeMap::new()
        };

        Ok(FileStorage { path, entries })
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `next` to disk and, on success, makes it current.
    fn commit(&mut self, next: BTreeMap<String, String>) -> StorageResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;

        let contents = serde_json::to_string_pretty(&next)?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(dir, e))?;
        tmp.write_all(contents.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| StorageError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StorageError::io(&self.path, e.error))?;

        self.entries = next;
        Ok(())
    }
}

/// `storage.json` + `.corrupt` → `storage.json.corrupt`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.commit(next)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.commit(next)
    }

    fn set_many(&mut self, entries: &[(String, String)]) -> StorageResult<()> {
        let mut next = self.entries.clone();
        for (key, value) in entries {
            next.insert(key.clone(), value.clone());
        }
        self.commit(next)
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
