//! Directory-of-JSON-files data source.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{DataSource, StoreError, StoreKey, paths};

/// Stores each [`StoreKey`] as `<dir>/<key>.json`.
///
/// Writes go to a sibling `.tmp` file that is then renamed over the
/// target, so readers never observe a half-written document.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    /// Creates a source rooted at `dir`. The directory is created on the
    /// first write if it does not exist.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file backing `key`.
    #[must_use]
    pub fn path_for(&self, key: StoreKey) -> PathBuf {
        self.dir.join(key.file_name())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

impl DataSource for JsonFileSource {
    fn read(&self, key: StoreKey) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No file for {key} store at {}", path.display());
                Ok(None)
            }
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn write(&self, key: StoreKey, contents: &[u8]) -> Result<(), StoreError> {
        paths::ensure_dir(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, contents).map_err(|e| io_error(&tmp, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| io_error(&path, e))?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("JSON files in {}", self.dir.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Repository;
    use std::fs;
    use std::sync::Arc;

    #[test]
    fn missing_file_reads_as_none() {
        let tmp = std::env::temp_dir().join("city_explorer_store_missing");
        let _ = fs::remove_dir_all(&tmp);

        let source = JsonFileSource::new(&tmp);
        assert!(source.read(StoreKey::Trips).unwrap().is_none());
    }

    #[test]
    fn write_creates_dir_and_replaces_atomically() {
        let tmp = std::env::temp_dir().join("city_explorer_store_write");
        let _ = fs::remove_dir_all(&tmp);

        let source = JsonFileSource::new(tmp.join("nested"));
        source.write(StoreKey::Trips, b"[1]").unwrap();
        source.write(StoreKey::Trips, b"[1, 2]").unwrap();

        assert_eq!(
            fs::read_to_string(source.path_for(StoreKey::Trips)).unwrap(),
            "[1, 2]"
        );
        assert!(!source.path_for(StoreKey::Trips).with_extension("json.tmp").exists());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn repository_reads_hand_written_files() {
        let tmp = std::env::temp_dir().join("city_explorer_store_repo");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        fs::write(tmp.join("population.json"), r#"[{"city": "Pune"}]"#).unwrap();

        let repo = Repository::new(Arc::new(JsonFileSource::new(&tmp)));
        let rows: Vec<serde_json::Value> = repo.load(StoreKey::Population).unwrap();
        assert_eq!(rows[0]["city"], "Pune");

        let _ = fs::remove_dir_all(&tmp);
    }
}
