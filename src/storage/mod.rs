//! Durable key-value persistence for chat history
//!
//! The chat store serializes the entire chat collection as a single text
//! blob under one fixed key. This module provides the key-value seam it
//! writes through: a [`KvStore`] trait, an embedded `sled` implementation
//! for real use, and an in-memory implementation for tests.

use crate::error::{BanterError, Result};
use anyhow::Context;
use directories::ProjectDirs;
use sled::Db;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Fixed key the chat collection is stored under
pub const CHATS_KEY: &str = "chats";

/// Minimal key-value persistence contract consumed by the chat store
///
/// Implementations must treat `load` of a never-saved key as `Ok(None)`,
/// not an error. Errors are reserved for real storage failures.
pub trait KvStore: Send + Sync {
    /// Load the value stored under `key`, or `None` if absent
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Save `value` under `key`, replacing any previous value
    fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// Durable storage backed by an embedded `sled` database
pub struct SledStore {
    db: Db,
}

impl SledStore {
    /// Open or create the store at the default data directory
    ///
    /// The location can be overridden with the `BANTER_STORE_PATH`
    /// environment variable, which makes it easy to point the binary at a
    /// test database or alternate file without changing the user's
    /// application data dir.
    pub fn new() -> Result<Self> {
        if let Ok(override_path) = std::env::var("BANTER_STORE_PATH") {
            return Self::new_with_path(override_path);
        }

        let proj_dirs = ProjectDirs::from("com", "xbcsmith", "banter")
            .ok_or_else(|| BanterError::Storage("Could not determine data directory".into()))?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .context("Failed to create data directory")
            .map_err(|e| BanterError::Storage(e.to_string()))?;

        Self::new_with_path(data_dir.join("chats.db"))
    }

    /// Open or create the store at the specified path
    ///
    /// This is primarily useful for tests where the default application
    /// data directory is not desirable (for example, a temporary directory).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use banter::storage::SledStore;
    ///
    /// let store = SledStore::new_with_path("/tmp/test_chats.db").unwrap();
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create parent directory for database")
                .map_err(|e| BanterError::Storage(e.to_string()))?;
        }

        let db = sled::open(&path)
            .context("Failed to open database")
            .map_err(|e| BanterError::Storage(e.to_string()))?;

        Ok(Self { db })
    }
}

impl KvStore for SledStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .db
            .get(key)
            .map_err(|e| BanterError::Storage(e.to_string()))?;

        match value {
            Some(bytes) => {
                let text = String::from_utf8(bytes.to_vec())
                    .map_err(|e| BanterError::Storage(format!("Invalid UTF-8 in store: {}", e)))?;
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .insert(key, value.as_bytes())
            .map_err(|e| BanterError::Storage(e.to_string()))?;
        self.db
            .flush()
            .map_err(|e| BanterError::Storage(e.to_string()))?;
        Ok(())
    }
}

/// Volatile storage used in tests and as a fallback when no durable
/// location is available
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| BanterError::Storage("store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| BanterError::Storage("store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
