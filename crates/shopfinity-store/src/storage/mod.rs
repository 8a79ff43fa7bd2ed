//! # Storage Module
//!
//! The key-value substrate the session store persists into.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storage trait                                   │
//! │                                                                         │
//! │   get / set / remove / set_many / keys                                 │
//! │        │                              │                                 │
//! │        ▼                              ▼                                 │
//! │  ┌──────────────────┐        ┌──────────────────────────────┐          │
//! │  │  MemoryStorage   │        │  FileStorage                 │          │
//! │  │  BTreeMap        │        │  one JSON object on disk     │          │
//! │  │  tests, :memory: │        │  temp file + rename per write│          │
//! │  └──────────────────┘        └──────────────────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are opaque strings; the repositories decide what goes in them.
//! Reads never fail: a backend loads its contents up front.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageResult;

/// Synchronous, process-local key-value storage.
pub trait Storage {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    /// Stores several entries.
    ///
    /// Backends that can make this all-or-nothing override it. The default
    /// writes the entries one by one and stops at the first failure.
    fn set_many(&mut self, entries: &[(String, String)]) -> StorageResult<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Every key currently stored, sorted.
    fn keys(&self) -> Vec<String>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn set_many(&mut self, entries: &[(String, String)]) -> StorageResult<()> {
        (**self).set_many(entries)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}
