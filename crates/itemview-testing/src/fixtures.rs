//! Sample warehouses mirroring what the item warehouse API serves.

use indexmap::IndexMap;
use itemview_types::{DisplayType, FieldDefinition, FieldType, Item, Warehouse};
use serde_json::{Value, json};

/// Display type the server falls back to for a field kind.
pub fn intrinsic_display(field_type: &FieldType) -> DisplayType {
    match field_type {
        FieldType::Integer | FieldType::Float => DisplayType::Number,
        FieldType::Date => DisplayType::Date,
        FieldType::DateTime => DisplayType::DateTime,
        FieldType::Boolean => DisplayType::Boolean,
        FieldType::Json => DisplayType::Json,
        FieldType::String | FieldType::Text | FieldType::Other(_) => DisplayType::Text,
    }
}

fn field(field_type: FieldType) -> FieldDefinition {
    let display = intrinsic_display(&field_type);
    FieldDefinition::new(field_type, display)
}

/// Build a warehouse from `(name, type)` pairs; the first field is the primary key.
pub fn warehouse(name: &str, item_name: &str, fields: &[(&str, FieldType)]) -> Warehouse {
    let item_schema: IndexMap<String, FieldDefinition> = fields
        .iter()
        .enumerate()
        .map(|(i, (field_name, field_type))| {
            let definition = field(field_type.clone());
            let definition = if i == 0 {
                definition.primary_key()
            } else {
                definition
            };
            (field_name.to_string(), definition)
        })
        .collect();

    Warehouse {
        name: name.to_string(),
        item_name: item_name.to_string(),
        created_at: "2023-01-14T18:30:00".to_string(),
        item_schema,
    }
}

/// `widgets`: id, name, description, price, created_at.
pub fn widgets() -> Warehouse {
    warehouse(
        "widgets",
        "widget",
        &[
            ("id", FieldType::Integer),
            ("name", FieldType::String),
            ("description", FieldType::Text),
            ("price", FieldType::Float),
            ("created_at", FieldType::Float),
        ],
    )
    .with_display("created_at", DisplayType::DateTime)
}

/// `employees`: composite primary key (first_name, last_name).
pub fn employees() -> Warehouse {
    let mut employees = warehouse(
        "employees",
        "employee",
        &[
            ("first_name", FieldType::String),
            ("last_name", FieldType::String),
            ("hired", FieldType::Date),
            ("active", FieldType::Boolean),
            ("profile", FieldType::Json),
        ],
    );
    if let Some(last_name) = employees.item_schema.get_mut("last_name") {
        last_name.primary_key = true;
    }
    employees
}

pub fn widget_items() -> Vec<Item> {
    vec![
        item(json!({
            "id": 1,
            "name": "sprocket",
            "description": "A small toothed wheel",
            "price": 1234.5,
            "created_at": 1673721000.0
        })),
        item(json!({
            "id": 2,
            "name": "gear",
            "description": "A larger toothed wheel",
            "price": 99.99,
            "created_at": 1673807400.0
        })),
        item(json!({
            "id": 3,
            "name": "flange",
            "description": null,
            "price": 12,
            "created_at": 1673893800.0
        })),
    ]
}

pub fn employee_items() -> Vec<Item> {
    vec![
        item(json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "hired": "1843-09-01",
            "active": false,
            "profile": {"role": "analyst"}
        })),
        item(json!({
            "first_name": "Grace",
            "last_name": "Hopper",
            "hired": "1944-07-02",
            "active": true,
            "profile": {"role": "admiral"}
        })),
    ]
}

fn item(value: Value) -> Item {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => Item::new(),
    }
}

/// Fixture adjustments.
pub trait WarehouseExt {
    fn with_display(self, field: &str, display: DisplayType) -> Self;
    fn with_field(self, field: &str, field_type: FieldType) -> Self;
    fn without_field(self, field: &str) -> Self;
}

impl WarehouseExt for Warehouse {
    fn with_display(mut self, field: &str, display: DisplayType) -> Self {
        if let Some(definition) = self.item_schema.get_mut(field) {
            definition.display_as = display;
        }
        self
    }

    fn with_field(mut self, name: &str, field_type: FieldType) -> Self {
        self.item_schema.insert(name.to_string(), field(field_type));
        self
    }

    fn without_field(mut self, field: &str) -> Self {
        self.item_schema.shift_remove(field);
        self
    }
}
