use itemview_core::{PreferenceKey, Preferences};
use itemview_engine::{alphabetical_order, move_by_id, reconcile};
use itemview_types::Warehouse;
use std::collections::HashMap;

/// Column order per warehouse. Only warehouses with a stored order have an
/// entry; the rest render in schema order.
pub(crate) struct ColumnOrderStore {
    prefs: Preferences,
    orders: HashMap<String, Vec<String>>,
}

impl ColumnOrderStore {
    pub fn new(prefs: Preferences) -> Self {
        Self {
            prefs,
            orders: HashMap::new(),
        }
    }

    /// Align the stored order of `warehouse` with its live schema, writing
    /// the healed order back when fields were added or removed.
    pub fn reconcile(&mut self, warehouse: &Warehouse) -> Vec<String> {
        let key = PreferenceKey::column_order(&warehouse.name);
        let stored: Option<Vec<String>> = self.prefs.get_json(&key);
        if stored.is_none() && self.prefs.get(&key).is_some() {
            tracing::info!(
                warehouse = %warehouse.name,
                "Removing unreadable column order"
            );
            self.prefs.remove(&key);
        }
        let result = reconcile(stored.as_deref(), &warehouse.field_names());

        if result.changed {
            tracing::info!(
                warehouse = %warehouse.name,
                stored = ?stored,
                order = ?result.order,
                "Column order drifted from schema, persisting reconciled order"
            );
            self.prefs.set_json(&key, &result.order);
        }

        if stored.is_some() {
            self.orders
                .insert(warehouse.name.clone(), result.order.clone());
        } else {
            self.orders.remove(&warehouse.name);
        }
        result.order
    }

    /// Effective order, falling back to the schema's declared order.
    pub fn get(&self, warehouse: &Warehouse) -> Vec<String> {
        self.orders
            .get(&warehouse.name)
            .cloned()
            .unwrap_or_else(|| warehouse.field_names())
    }

    /// The user's own order, if one was ever stored.
    pub fn stored(&self, warehouse: &str) -> Option<&Vec<String>> {
        self.orders.get(warehouse)
    }

    /// Move the column at `old_index` of `current` to `new_index`.
    ///
    /// `current` is what the user sees, which may omit hidden columns; the
    /// move is applied to the full order so hidden columns keep their place.
    /// Out-of-range indices and names outside the schema leave the order
    /// untouched.
    pub fn reorder(
        &mut self,
        warehouse: &Warehouse,
        old_index: usize,
        new_index: usize,
        current: &[String],
    ) -> Option<Vec<String>> {
        let (Some(from), Some(to)) = (current.get(old_index), current.get(new_index)) else {
            tracing::debug!(
                warehouse = %warehouse.name,
                old_index,
                new_index,
                len = current.len(),
                "Ignoring out-of-range column move"
            );
            return None;
        };
        self.reorder_by_id(warehouse, from, to)
    }

    /// Drop `from` onto `to`; names outside the schema leave the order untouched.
    pub fn reorder_by_id(&mut self, warehouse: &Warehouse, from: &str, to: &str) -> Option<Vec<String>> {
        let Some(moved) = move_by_id(&self.get(warehouse), from, to) else {
            tracing::debug!(
                warehouse = %warehouse.name,
                from,
                to,
                "Ignoring move of a column outside the schema"
            );
            return None;
        };
        let order = reconcile(Some(moved.as_slice()), &warehouse.field_names()).order;
        self.store(&warehouse.name, order.clone());
        Some(order)
    }

    /// Replace the order with the fields sorted by name.
    pub fn reset(&mut self, warehouse: &str, live_fields: &[String]) -> Vec<String> {
        let order = alphabetical_order(live_fields);
        self.store(warehouse, order.clone());
        order
    }

    fn store(&mut self, warehouse: &str, order: Vec<String>) {
        self.prefs
            .set_json(&PreferenceKey::column_order(warehouse), &order);
        self.orders.insert(warehouse.to_string(), order);
    }
}
