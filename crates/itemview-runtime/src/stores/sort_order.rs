use itemview_core::{PreferenceKey, Preferences};
use itemview_engine::next_sort_order;
use itemview_types::{FieldOrder, SortOrder, Warehouse};
use std::collections::HashMap;

/// Requested server-side sort per warehouse.
pub(crate) struct SortOrderStore {
    prefs: Preferences,
    orders: HashMap<String, SortOrder>,
}

impl SortOrderStore {
    pub fn new(prefs: Preferences) -> Self {
        Self {
            prefs,
            orders: HashMap::new(),
        }
    }

    pub fn get(&mut self, warehouse: &str) -> SortOrder {
        let prefs = &self.prefs;
        self.orders
            .entry(warehouse.to_string())
            .or_insert_with(|| {
                prefs
                    .get_json::<FieldOrder>(&PreferenceKey::field_order(warehouse))
                    .map(SortOrder::from)
                    .unwrap_or_default()
            })
            .clone()
    }

    /// Advance the sort cycle for a header click and persist the result.
    pub fn click(&mut self, warehouse: &str, field: &str) -> SortOrder {
        let next = next_sort_order(&self.get(warehouse), field);
        self.set(warehouse, next.clone());
        next
    }

    pub fn set(&mut self, warehouse: &str, order: SortOrder) {
        let key = PreferenceKey::field_order(warehouse);
        if order.is_sorted() {
            self.prefs.set_json(&key, &FieldOrder::from(&order));
        } else {
            self.prefs.remove(&key);
        }
        self.orders.insert(warehouse.to_string(), order);
    }

    /// A sort on a field the schema dropped falls back to unsorted.
    pub fn prune(&mut self, warehouse: &Warehouse) {
        let current = self.get(&warehouse.name);
        if let Some(field) = current.field()
            && !warehouse.has_field(field)
        {
            tracing::info!(
                warehouse = %warehouse.name,
                field = %field,
                "Sort field missing from schema, clearing sort"
            );
            self.set(&warehouse.name, SortOrder::Unsorted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemview_core::MemoryStorage;
    use std::sync::Arc;

    #[test]
    fn test_click_cycle_is_persisted() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = SortOrderStore::new(Preferences::new(storage.clone()));

        assert_eq!(store.click("widgets", "id"), SortOrder::Ascending("id".to_string()));
        assert_eq!(
            storage.snapshot().get("widgetsFieldOrder").map(String::as_str),
            Some(r#"{"fieldName":"id","ascending":true}"#)
        );

        assert_eq!(store.click("widgets", "id"), SortOrder::Descending("id".to_string()));
        assert_eq!(
            storage.snapshot().get("widgetsFieldOrder").map(String::as_str),
            Some(r#"{"fieldName":"id","ascending":false}"#)
        );

        assert_eq!(store.click("widgets", "id"), SortOrder::Unsorted);
        assert!(!storage.snapshot().contains_key("widgetsFieldOrder"));
    }

    #[test]
    fn test_restores_from_storage() {
        let storage = Arc::new(MemoryStorage::with_entries([(
            "widgetsFieldOrder",
            r#"{"fieldName":"price","ascending":false}"#,
        )]));
        let mut store = SortOrderStore::new(Preferences::new(storage));
        assert_eq!(store.get("widgets"), SortOrder::Descending("price".to_string()));
        assert_eq!(store.get("gadgets"), SortOrder::Unsorted);
    }
}
