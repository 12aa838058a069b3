//! In-memory data source for tests and fixtures.

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::Serialize;

use crate::{DataSource, StoreError, StoreKey};

/// Keeps every document in a map. Nothing touches the filesystem.
#[derive(Debug, Default)]
pub struct MemorySource {
    documents: Mutex<BTreeMap<StoreKey, Vec<u8>>>,
}

impl MemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`Self::insert_json`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] if `value` cannot be serialized.
    pub fn with_json<T: Serialize>(self, key: StoreKey, value: &T) -> Result<Self, StoreError> {
        self.insert_json(key, value)?;
        Ok(self)
    }

    /// Stores `value` serialized as JSON under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] if `value` cannot be serialized.
    pub fn insert_json<T: Serialize>(&self, key: StoreKey, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value).map_err(|source| StoreError::Json { key, source })?;
        self.insert_raw(key, bytes);
        Ok(())
    }

    /// Stores raw bytes under `key`.
    pub fn insert_raw(&self, key: StoreKey, bytes: Vec<u8>) {
        if let Ok(mut documents) = self.documents.lock() {
            documents.insert(key, bytes);
        }
    }

    /// Returns a copy of the current bytes for `key`.
    #[must_use]
    pub fn contents(&self, key: StoreKey) -> Option<Vec<u8>> {
        self.documents
            .lock()
            .ok()
            .and_then(|documents| documents.get(&key).cloned())
    }
}

impl DataSource for MemorySource {
    fn read(&self, key: StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        let documents = self
            .documents
            .lock()
            .map_err(|_| StoreError::LockPoisoned { key })?;
        Ok(documents.get(&key).cloned())
    }

    fn write(&self, key: StoreKey, contents: &[u8]) -> Result<(), StoreError> {
        let mut documents = self
            .documents
            .lock()
            .map_err(|_| StoreError::LockPoisoned { key })?;
        documents.insert(key, contents.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory store".to_string()
    }
}
