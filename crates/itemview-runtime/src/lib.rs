//! View preferences for item warehouse tables.
//!
//! [`ViewPreferenceStore`] is the single entry point: it loads the warehouse
//! list through a [`WarehouseApi`](itemview_client::WarehouseApi), reconciles
//! persisted column order, visibility and sort state against each live
//! schema, and writes every user change straight back to storage.

pub mod config;
pub mod error;
pub mod notice;
pub mod page;
mod stores;
pub mod view;

pub use config::{ApiConfig, Config, StorageBackend, StorageConfig, ViewConfig};
pub use error::{Error, Result};
pub use notice::{Notice, NoticeLevel};
pub use page::{ErrorPanel, ItemPageView, PageOutcome};
pub use stores::PAGE_SIZES;
pub use view::ViewPreferenceStore;
