use indexmap::IndexMap;
use itemview_types::{DisplayType, Warehouse};
use std::collections::HashMap;

/// Display types the user picked explicitly, per warehouse and field.
///
/// Fields without an override render with the schema's `display_as`.
#[derive(Default)]
pub(crate) struct DisplayTypeStore {
    overrides: HashMap<String, HashMap<String, DisplayType>>,
}

impl DisplayTypeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when the field is not part of the warehouse schema.
    pub fn effective(&self, warehouse: &Warehouse, field: &str) -> Option<DisplayType> {
        let definition = warehouse.field(field)?;
        Some(
            self.overrides
                .get(&warehouse.name)
                .and_then(|fields| fields.get(field))
                .copied()
                .unwrap_or(definition.display_as),
        )
    }

    pub fn options(&self, warehouse: &Warehouse) -> IndexMap<String, DisplayType> {
        warehouse
            .item_schema
            .keys()
            .filter_map(|field| {
                self.effective(warehouse, field)
                    .map(|display| (field.clone(), display))
            })
            .collect()
    }

    pub fn set_override(&mut self, warehouse: &str, field: &str, display: DisplayType) {
        self.overrides
            .entry(warehouse.to_string())
            .or_default()
            .insert(field.to_string(), display);
    }

    pub fn clear_override(&mut self, warehouse: &str, field: &str) {
        if let Some(fields) = self.overrides.get_mut(warehouse) {
            fields.remove(field);
        }
    }

    /// Drop overrides for fields the schema no longer has.
    pub fn prune(&mut self, warehouse: &Warehouse) {
        if let Some(fields) = self.overrides.get_mut(&warehouse.name) {
            fields.retain(|field, _| warehouse.has_field(field));
        }
    }
}
