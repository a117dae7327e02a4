use crate::stores::DEFAULT_PAGE_SIZE;
use crate::Result;
use itemview_client::HttpWarehouseApi;
use itemview_core::{
    FileStorage, MemoryStorage, PreferenceStorage, SqliteStorage, expand_tilde, resolve_data_path,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Overrides the backend's file inside the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl StorageConfig {
    fn resolve_path(&self, data_dir: &Path, file_name: &str) -> PathBuf {
        match &self.path {
            Some(path) => expand_tilde(path),
            None => data_dir.join(file_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(resolve_data_path(None)?.join(CONFIG_FILE))
    }

    /// Open the configured preference backend, creating files under
    /// `data_dir` unless `storage.path` points elsewhere.
    pub fn open_storage(&self, data_dir: &Path) -> Result<Arc<dyn PreferenceStorage>> {
        let storage: Arc<dyn PreferenceStorage> = match self.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
            StorageBackend::File => Arc::new(FileStorage::open(
                self.storage.resolve_path(data_dir, "preferences.json"),
            )?),
            StorageBackend::Sqlite => {
                let path = self.storage.resolve_path(data_dir, "preferences.db");
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                Arc::new(SqliteStorage::open(&path)?)
            }
        };
        tracing::debug!(backend = ?self.storage.backend, "Opened preference storage");
        Ok(storage)
    }

    pub fn connect_api(&self) -> Result<HttpWarehouseApi> {
        let api = match self.api.timeout_secs {
            Some(secs) => {
                HttpWarehouseApi::with_timeout(&self.api.base_url, Duration::from_secs(secs))?
            }
            None => HttpWarehouseApi::new(&self.api.base_url)?,
        };
        Ok(api)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.view.default_page_size, 10);
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.api.base_url = "http://warehouse.internal:9000".to_string();
        config.storage.backend = StorageBackend::Sqlite;
        config.view.default_page_size = 20;

        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load_from(&temp_dir.path().join("nonexistent.toml"))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[storage]\nbackend = \"memory\"\n")?;

        let config = Config::load_from(&config_path)?;
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.view.default_page_size, 10);
        Ok(())
    }

    #[test]
    fn test_invalid_toml_is_config_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[storage]\nbackend = \"floppy\"\n")?;

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        Ok(())
    }

    #[test]
    fn test_open_storage_backends() -> Result<()> {
        let temp_dir = TempDir::new()?;

        let mut config = Config::default();
        let file = config.open_storage(temp_dir.path())?;
        file.set("darkMode", "1")?;
        assert!(temp_dir.path().join("preferences.json").exists());

        config.storage.backend = StorageBackend::Sqlite;
        let sqlite = config.open_storage(temp_dir.path())?;
        sqlite.set("darkMode", "0")?;
        assert_eq!(sqlite.get("darkMode")?, Some("0".to_string()));
        assert!(temp_dir.path().join("preferences.db").exists());

        config.storage.backend = StorageBackend::Memory;
        let memory = config.open_storage(temp_dir.path())?;
        assert_eq!(memory.get("darkMode")?, None);
        Ok(())
    }
}
