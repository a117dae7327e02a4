//! TestWorld pattern for view-store integration tests.

use crate::FakeWarehouseApi;
use crate::fixtures;
use itemview_core::{MemoryStorage, PreferenceStorage, Preferences};
use itemview_runtime::ViewPreferenceStore;
use itemview_types::{Item, Warehouse};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A fake API plus shared in-memory preference storage.
///
/// Every call to [`store`](Self::store) starts a new session over the same
/// storage, which is how tests observe what survives a reload.
///
/// # Example
/// ```no_run
/// use itemview_testing::TestWorld;
///
/// # async fn demo() -> anyhow::Result<()> {
/// let world = TestWorld::new().with_preference("pageSize", "20");
/// let store = world.loaded_store().await?;
/// assert_eq!(store.page_size(), 20);
/// # Ok(())
/// # }
/// ```
pub struct TestWorld {
    storage: Arc<MemoryStorage>,
    api: Arc<FakeWarehouseApi>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// `widgets` and `employees` with sample items, nothing stored yet.
    pub fn new() -> Self {
        Self::empty()
            .with_warehouse(fixtures::widgets(), fixtures::widget_items())
            .with_warehouse(fixtures::employees(), fixtures::employee_items())
    }

    /// No warehouses at all.
    pub fn empty() -> Self {
        crate::init_tracing();
        Self {
            storage: Arc::new(MemoryStorage::new()),
            api: Arc::new(FakeWarehouseApi::new()),
        }
    }

    pub fn with_warehouse(self, warehouse: Warehouse, items: Vec<Item>) -> Self {
        self.api.put_warehouse(warehouse, items);
        self
    }

    /// Seed a raw stored preference, as a previous session would have left it.
    pub fn with_preference(self, key: &str, value: &str) -> Self {
        self.storage
            .set(key, value)
            .expect("memory storage never fails");
        self
    }

    pub fn api(&self) -> &FakeWarehouseApi {
        &self.api
    }

    /// A fresh, unloaded session.
    pub fn store(&self) -> ViewPreferenceStore {
        ViewPreferenceStore::new(self.api.clone(), Preferences::new(self.storage.clone()))
    }

    /// A fresh session with the warehouse list already loaded.
    pub async fn loaded_store(&self) -> anyhow::Result<ViewPreferenceStore> {
        let store = self.store();
        store.load().await?;
        Ok(store)
    }

    pub fn preference(&self, key: &str) -> Option<String> {
        self.storage.snapshot().remove(key)
    }

    pub fn preferences(&self) -> BTreeMap<String, String> {
        self.storage.snapshot()
    }
}
