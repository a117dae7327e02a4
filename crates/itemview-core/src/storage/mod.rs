// Storage backends for preference records
// Every backend is a flat string -> string map with last-write-wins semantics

mod file;
mod memory;
mod sqlite;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::Result;

/// Durable per-client key-value storage.
///
/// Any medium that can get, set and remove string values by key can back
/// the view preferences: browser storage, a local file, a database.
pub trait PreferenceStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}
