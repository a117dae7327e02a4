//! In-memory stand-in for the warehouse API.

use crate::fixtures::intrinsic_display;
use async_trait::async_trait;
use indexmap::IndexMap;
use itemview_client::{Error, Result, WarehouseApi};
use itemview_types::{
    DisplayAs, DisplayType, Item, ItemKey, ItemPage, ItemPageQuery, Warehouse,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

/// One recorded request.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    ListWarehouses,
    GetWarehouse(String),
    GetItems {
        warehouse: String,
        query: ItemPageQuery,
    },
    SetDisplayAs {
        warehouse: String,
        field: String,
        display_as: DisplayAs,
    },
    DeleteItem {
        warehouse: String,
        key: Vec<(String, String)>,
    },
}

impl ApiCall {
    fn endpoint(&self) -> &'static str {
        match self {
            ApiCall::ListWarehouses => "list_warehouses",
            ApiCall::GetWarehouse(_) => "get_warehouse",
            ApiCall::GetItems { .. } => "get_items",
            ApiCall::SetDisplayAs { .. } => "set_display_as",
            ApiCall::DeleteItem { .. } => "delete_item",
        }
    }
}

#[derive(Default)]
struct FakeState {
    warehouses: IndexMap<String, Warehouse>,
    items: HashMap<String, Vec<Item>>,
    calls: Vec<ApiCall>,
    failing: BTreeSet<&'static str>,
}

/// [`WarehouseApi`] backed by in-memory warehouses.
///
/// Every request is recorded. Endpoints named with [`fail`](Self::fail)
/// answer with a 500 until [`recover`](Self::recover) is called.
#[derive(Default)]
pub struct FakeWarehouseApi {
    state: Mutex<FakeState>,
}

impl FakeWarehouseApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_warehouse(self, warehouse: Warehouse, items: Vec<Item>) -> Self {
        self.put_warehouse(warehouse, items);
        self
    }

    /// Add or replace a warehouse, e.g. to simulate a schema migration.
    pub fn put_warehouse(&self, warehouse: Warehouse, items: Vec<Item>) {
        let mut state = self.lock();
        state.items.insert(warehouse.name.clone(), items);
        state.warehouses.insert(warehouse.name.clone(), warehouse);
    }

    pub fn warehouse(&self, name: &str) -> Option<Warehouse> {
        self.lock().warehouses.get(name).cloned()
    }

    pub fn items(&self, name: &str) -> Vec<Item> {
        self.lock().items.get(name).cloned().unwrap_or_default()
    }

    /// Make `endpoint` (a `WarehouseApi` method name) fail.
    pub fn fail(&self, endpoint: &'static str) {
        self.lock().failing.insert(endpoint);
    }

    pub fn recover(&self) {
        self.lock().failing.clear();
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Record `call` and fail it if its endpoint is marked failing.
    fn record(&self, call: ApiCall) -> Result<MutexGuard<'_, FakeState>> {
        let mut state = self.lock();
        let endpoint = call.endpoint();
        state.calls.push(call);
        if state.failing.contains(endpoint) {
            return Err(Error::status(500, format!("fake://{}", endpoint)));
        }
        Ok(state)
    }

    fn not_found(what: &str) -> Error {
        Error::status(404, format!("fake://{}", what))
    }
}

#[async_trait]
impl WarehouseApi for FakeWarehouseApi {
    async fn list_warehouses(&self) -> Result<Vec<Warehouse>> {
        let state = self.record(ApiCall::ListWarehouses)?;
        Ok(state.warehouses.values().cloned().collect())
    }

    async fn get_warehouse(&self, name: &str) -> Result<Warehouse> {
        let state = self.record(ApiCall::GetWarehouse(name.to_string()))?;
        state
            .warehouses
            .get(name)
            .cloned()
            .ok_or_else(|| Self::not_found(name))
    }

    async fn get_items(&self, warehouse: &str, query: &ItemPageQuery) -> Result<ItemPage> {
        let state = self.record(ApiCall::GetItems {
            warehouse: warehouse.to_string(),
            query: query.clone(),
        })?;
        let schema = state
            .warehouses
            .get(warehouse)
            .ok_or_else(|| Self::not_found(warehouse))?;
        let all = state.items.get(warehouse).cloned().unwrap_or_default();

        let page_size = query.page_size.max(1) as usize;
        let skip = (query.page.max(1) as usize - 1) * page_size;
        let items: Vec<Item> = all.iter().skip(skip).take(page_size).cloned().collect();
        let fields = query
            .include_fields
            .then(|| query.fields.clone().unwrap_or_else(|| schema.field_names()));

        Ok(ItemPage {
            count: items.len() as u64,
            page: u64::from(query.page),
            total: all.len() as u64,
            items,
            fields,
        })
    }

    async fn set_display_as(
        &self,
        warehouse: &str,
        field: &str,
        display_as: DisplayAs,
    ) -> Result<DisplayType> {
        let mut state = self.record(ApiCall::SetDisplayAs {
            warehouse: warehouse.to_string(),
            field: field.to_string(),
            display_as,
        })?;
        let definition = state
            .warehouses
            .get_mut(warehouse)
            .and_then(|schema| schema.item_schema.get_mut(field))
            .ok_or_else(|| Self::not_found(field))?;
        definition.display_as = match display_as {
            DisplayAs::Set(display) => display,
            DisplayAs::Reset => intrinsic_display(&definition.field_type),
        };
        Ok(definition.display_as)
    }

    async fn delete_item(&self, warehouse: &str, key: &ItemKey) -> Result<()> {
        let mut state = self.record(ApiCall::DeleteItem {
            warehouse: warehouse.to_string(),
            key: key.query_pairs(),
        })?;
        let items = state
            .items
            .get_mut(warehouse)
            .ok_or_else(|| Self::not_found(warehouse))?;
        let before = items.len();
        items.retain(|item| {
            !key
                .parts()
                .iter()
                .all(|(field, value)| item.get(field) == Some(value))
        });
        if items.len() == before {
            return Err(Self::not_found("item"));
        }
        Ok(())
    }
}
