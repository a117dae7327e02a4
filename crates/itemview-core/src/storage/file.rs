use super::PreferenceStorage;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Preferences kept in a single JSON object on disk.
///
/// The whole document is rewritten on every change. A file that cannot be
/// parsed is treated as empty and replaced by the next write.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "Discarding unreadable preference file"
                    );
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| Error::Storage("file storage lock poisoned".to_string()))?;
        change(&mut entries);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&*entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PreferenceStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| Error::Storage("file storage lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_values_survive_reopen() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("preferences.json");

        let storage = FileStorage::open(&path)?;
        storage.set("pageSize", "20")?;
        storage.set("widgetsColumnOrder", r#"["b","a"]"#)?;
        storage.remove("pageSize")?;
        assert!(path.exists());

        let reopened = FileStorage::open(&path)?;
        assert_eq!(reopened.get("pageSize")?, None);
        assert_eq!(
            reopened.get("widgetsColumnOrder")?,
            Some(r#"["b","a"]"#.to_string())
        );
        Ok(())
    }

    #[test]
    fn test_corrupt_file_reads_as_empty_and_is_replaced() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("preferences.json");
        std::fs::write(&path, "{not json")?;

        let storage = FileStorage::open(&path)?;
        assert_eq!(storage.get("darkMode")?, None);

        storage.set("darkMode", "1")?;
        let reopened = FileStorage::open(&path)?;
        assert_eq!(reopened.get("darkMode")?, Some("1".to_string()));
        Ok(())
    }
}
