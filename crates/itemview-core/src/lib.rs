//! Persistence layer for view preferences.
//!
//! Backends implement [`PreferenceStorage`]; the rest of the workspace talks to
//! them through [`Preferences`], which never fails: unreadable or malformed
//! values are read as absent and failed writes are logged.

pub mod error;
pub mod keys;
pub mod path;
pub mod preferences;
pub mod storage;

pub use error::{Error, Result};
pub use keys::PreferenceKey;
pub use path::{expand_tilde, resolve_data_path};
pub use preferences::Preferences;
pub use storage::{FileStorage, MemoryStorage, PreferenceStorage, SqliteStorage};
