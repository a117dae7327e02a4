use crate::{MemoryStorage, PreferenceKey, PreferenceStorage};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::str::FromStr;
use std::sync::Arc;

/// Non-throwing access to persisted preferences.
///
/// Reads return `None` for absent, unreadable or malformed values; writes
/// that fail are logged and dropped. Callers substitute defaults and the
/// next successful write replaces whatever was stored.
#[derive(Clone)]
pub struct Preferences {
    storage: Arc<dyn PreferenceStorage>,
}

impl Preferences {
    pub fn new(storage: Arc<dyn PreferenceStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn storage(&self) -> &Arc<dyn PreferenceStorage> {
        &self.storage
    }

    pub fn get(&self, key: &PreferenceKey) -> Option<String> {
        let key = key.as_key();
        match self.storage.get(&key) {
            Ok(value) => {
                tracing::debug!(key = %key, value = ?value, "Getting preference");
                value
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Failed to read preference");
                None
            }
        }
    }

    pub fn set(&self, key: &PreferenceKey, value: &str) {
        let key = key.as_key();
        tracing::debug!(key = %key, value = %value, "Setting preference");
        if let Err(err) = self.storage.set(&key, value) {
            tracing::warn!(key = %key, error = %err, "Failed to write preference");
        }
    }

    pub fn remove(&self, key: &PreferenceKey) {
        let key = key.as_key();
        tracing::debug!(key = %key, "Removing preference");
        if let Err(err) = self.storage.remove(&key) {
            tracing::warn!(key = %key, error = %err, "Failed to remove preference");
        }
    }

    /// Decode a JSON-valued preference; malformed JSON reads as absent.
    pub fn get_json<T: DeserializeOwned>(&self, key: &PreferenceKey) -> Option<T> {
        let raw = self.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(
                    key = %key,
                    raw = %raw,
                    error = %err,
                    "Ignoring malformed preference"
                );
                None
            }
        }
    }

    pub fn set_json<T: Serialize + ?Sized>(&self, key: &PreferenceKey, value: &T) {
        match serde_json::to_string(value) {
            Ok(encoded) => self.set(key, &encoded),
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Failed to encode preference");
            }
        }
    }

    /// Flags are stored as `"1"` / `"0"`; anything else reads as absent.
    pub fn get_flag(&self, key: &PreferenceKey) -> Option<bool> {
        match self.get(key)?.as_str() {
            "1" => Some(true),
            "0" => Some(false),
            other => {
                tracing::warn!(key = %key, raw = %other, "Ignoring malformed flag");
                None
            }
        }
    }

    pub fn set_flag(&self, key: &PreferenceKey, value: bool) {
        self.set(key, if value { "1" } else { "0" });
    }

    pub fn get_parsed<T: FromStr>(&self, key: &PreferenceKey) -> Option<T> {
        let raw = self.get(key)?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(key = %key, raw = %raw, "Ignoring unparsable preference");
                None
            }
        }
    }
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences").finish_non_exhaustive()
    }
}
