#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Repository over pluggable data sources for the city explorer.
//!
//! Every dataset and writable store is a single JSON document addressed by
//! a [`StoreKey`]. A [`DataSource`] moves raw bytes in and out (a directory
//! of JSON files in production, an in-memory map in tests), and the
//! [`Repository`] layers typed loading, pretty-printed saving, and
//! per-store locked read-modify-write on top.
//!
//! Datasets are reloaded from the source on every call; nothing is cached.

pub mod file;
pub mod memory;
pub mod paths;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

pub use file::JsonFileSource;
pub use memory::MemorySource;

/// Identifies one JSON document in the data source.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum StoreKey {
    /// City population table (read-only).
    Population,
    /// Cost-of-living index table (read-only).
    CostOfLiving,
    /// City guide book (read-only).
    Cities,
    /// Trips (created and replaced by the API).
    Trips,
    /// Traveler safety reports (append-only).
    SafetyReports,
    /// Trip safety assessments (append-only).
    SafetyTrips,
}

impl StoreKey {
    /// Returns all store keys.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Population,
            Self::CostOfLiving,
            Self::Cities,
            Self::Trips,
            Self::SafetyReports,
            Self::SafetyTrips,
        ]
    }

    /// File name used by [`JsonFileSource`] for this store.
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{self}.json")
    }
}

/// Errors that can occur while reading or writing a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Stored document could not be parsed or serialized.
    #[error("Invalid JSON in {key} store: {source}")]
    Json {
        /// Store that failed.
        key: StoreKey,
        /// Underlying serde error.
        source: serde_json::Error,
    },

    /// A required dataset has never been written.
    #[error("The {key} store has no data")]
    Missing {
        /// Store that is missing.
        key: StoreKey,
    },

    /// A writer panicked while holding the store lock.
    #[error("The {key} store lock is poisoned")]
    LockPoisoned {
        /// Store whose lock is poisoned.
        key: StoreKey,
    },
}

/// A raw byte store addressed by [`StoreKey`].
pub trait DataSource: Send + Sync {
    /// Reads the document for `key`, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the underlying storage fails.
    fn read(&self, key: StoreKey) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replaces the document for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the underlying storage fails.
    fn write(&self, key: StoreKey, contents: &[u8]) -> Result<(), StoreError>;

    /// Human-readable description for log lines.
    fn describe(&self) -> String;
}

/// Typed access to a [`DataSource`].
///
/// Cloning is cheap and clones share the same source and locks.
#[derive(Clone)]
pub struct Repository {
    source: Arc<dyn DataSource>,
    locks: Arc<BTreeMap<StoreKey, Mutex<()>>>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("source", &self.source.describe())
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Wraps a data source.
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        let locks = StoreKey::all()
            .iter()
            .map(|key| (*key, Mutex::new(())))
            .collect();
        Self {
            source,
            locks: Arc::new(locks),
        }
    }

    /// Convenience constructor for a directory of JSON files.
    #[must_use]
    pub fn from_dir(dir: impl Into<std::path::PathBuf>) -> Self {
        Self::new(Arc::new(JsonFileSource::new(dir)))
    }

    /// Description of the underlying source.
    #[must_use]
    pub fn describe(&self) -> String {
        self.source.describe()
    }

    /// Loads a document that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Missing`] if the store was never written, or
    /// another [`StoreError`] if reading or parsing fails.
    pub fn load<T: DeserializeOwned>(&self, key: StoreKey) -> Result<T, StoreError> {
        let bytes = self.source.read(key)?.ok_or(StoreError::Missing { key })?;
        parse(key, &bytes)
    }

    /// Loads a document, falling back to `T::default()` if it was never
    /// written. Used for the writable stores, which start out empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if reading or parsing fails.
    pub fn load_or_default<T: DeserializeOwned + Default>(
        &self,
        key: StoreKey,
    ) -> Result<T, StoreError> {
        self.source
            .read(key)?
            .map_or_else(|| Ok(T::default()), |bytes| parse(key, &bytes))
    }

    /// Replaces a document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if serialization or writing fails.
    pub fn save<T: Serialize>(&self, key: StoreKey, value: &T) -> Result<(), StoreError> {
        let _guard = self.lock(key)?;
        self.write_unlocked(key, value)
    }

    /// Runs a read-modify-write cycle while holding the store lock.
    ///
    /// The document is loaded (or defaulted), handed to `f`, and written
    /// back only if `f` succeeds. If `f` fails the store is untouched.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or a [`StoreError`] (converted into
    /// `E`) if loading or saving fails.
    pub fn update<T, R, E, F>(&self, key: StoreKey, f: F) -> Result<R, E>
    where
        T: DeserializeOwned + Serialize + Default,
        E: From<StoreError>,
        F: FnOnce(&mut T) -> Result<R, E>,
    {
        let _guard = self.lock(key)?;
        let mut value: T = self.load_or_default(key)?;
        let result = f(&mut value)?;
        self.write_unlocked(key, &value)?;
        log::debug!("Rewrote {key} store in {}", self.source.describe());
        Ok(result)
    }

    fn lock(&self, key: StoreKey) -> Result<std::sync::MutexGuard<'_, ()>, StoreError> {
        self.locks
            .get(&key)
            .ok_or(StoreError::LockPoisoned { key })?
            .lock()
            .map_err(|_| StoreError::LockPoisoned { key })
    }

    fn write_unlocked<T: Serialize>(&self, key: StoreKey, value: &T) -> Result<(), StoreError> {
        let bytes = to_pretty_json(value).map_err(|source| StoreError::Json { key, source })?;
        self.source.write(key, &bytes)
    }
}

fn parse<T: DeserializeOwned>(key: StoreKey, bytes: &[u8]) -> Result<T, StoreError> {
    serde_json::from_slice(bytes).map_err(|source| StoreError::Json { key, source })
}

/// Serializes with four-space indentation, the layout the hand-edited data
/// files use.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> (Arc<MemorySource>, Repository) {
        let source = Arc::new(MemorySource::new());
        let repo = Repository::new(source.clone());
        (source, repo)
    }

    #[test]
    fn missing_dataset_is_an_error() {
        let (_, repo) = repo();
        let err = repo.load::<Vec<u32>>(StoreKey::Population).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Missing {
                key: StoreKey::Population
            }
        ));
    }

    #[test]
    fn missing_writable_store_defaults_to_empty() {
        let (_, repo) = repo();
        let trips: Vec<u32> = repo.load_or_default(StoreKey::Trips).unwrap();
        assert!(trips.is_empty());
    }

    #[test]
    fn update_appends_and_persists() {
        let (_, repo) = repo();
        for n in 1..=3u32 {
            repo.update(StoreKey::SafetyReports, |items: &mut Vec<u32>| {
                items.push(n);
                Ok::<_, StoreError>(())
            })
            .unwrap();
        }
        let items: Vec<u32> = repo.load(StoreKey::SafetyReports).unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn failed_update_leaves_store_untouched() {
        let (source, repo) = repo();
        repo.save(StoreKey::Trips, &vec![1u32, 2]).unwrap();
        let before = source.contents(StoreKey::Trips).unwrap();

        let result = repo.update(StoreKey::Trips, |items: &mut Vec<u32>| {
            items.clear();
            Err::<(), _>(StoreError::Missing {
                key: StoreKey::Trips,
            })
        });

        assert!(result.is_err());
        assert_eq!(source.contents(StoreKey::Trips).unwrap(), before);
    }

    #[test]
    fn invalid_json_reports_store() {
        let (source, repo) = repo();
        source.insert_raw(StoreKey::Cities, b"{not json".to_vec());
        let err = repo.load::<serde_json::Value>(StoreKey::Cities).unwrap_err();
        assert!(err.to_string().contains("cities"), "{err}");
    }

    #[test]
    fn saves_with_four_space_indent() {
        let (source, repo) = repo();
        repo.save(StoreKey::Trips, &vec![serde_json::json!({"a": 1})])
            .unwrap();
        let text = String::from_utf8(source.contents(StoreKey::Trips).unwrap()).unwrap();
        assert!(text.contains("\n        \"a\": 1"), "{text}");
    }

    #[test]
    fn file_names_follow_key_names() {
        assert_eq!(StoreKey::CostOfLiving.file_name(), "cost_of_living.json");
        assert_eq!(StoreKey::SafetyTrips.file_name(), "safety_trips.json");
        assert_eq!("safety_reports".parse::<StoreKey>().unwrap(), StoreKey::SafetyReports);
    }
}
