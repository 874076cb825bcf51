use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::store::{SettingsBackend, StoreError};

pub const SETTINGS_FILE: &str = "settings.json";

/// Files under the application data directory (`<data_dir>/numdr`).
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("numdr");
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn read_file(&self, name: &str) -> Result<Option<String>, StoreError> {
        let path = self.file_path(name);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    /// Write to a sibling `.tmp` file and rename it over the target so a
    /// crash never leaves a half-written record behind.
    fn write_file(&self, name: &str, contents: &str) -> Result<(), StoreError> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

impl SettingsBackend for JsonStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        self.read_file(SETTINGS_FILE)
    }

    fn write(&self, record: &str) -> Result<(), StoreError> {
        self.write_file(SETTINGS_FILE, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_file_reads_none() {
        let (_dir, store) = make_test_store();
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn test_write_then_read() {
        let (_dir, store) = make_test_store();
        store.write("{\"a\":1}").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(store.file_path(SETTINGS_FILE).exists());
    }

    #[test]
    fn test_write_leaves_no_tmp_file() {
        let (dir, store) = make_test_store();
        store.write("{}").unwrap();
        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty(), "no residual .tmp files");
    }

    #[test]
    fn test_with_base_dir_creates_nested_dirs() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = JsonStore::with_base_dir(nested.clone()).unwrap();
        assert!(nested.exists());
        assert_eq!(store.base_dir(), nested.as_path());
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore {
            base_dir: dir.path().join("gone"),
        };
        assert!(matches!(store.write("{}"), Err(StoreError::Io(_))));
    }
}
