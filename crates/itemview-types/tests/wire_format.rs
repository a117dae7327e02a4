use itemview_types::{DisplayType, FieldType, Item, ItemKey, ItemPage, WarehouseList};
use serde_json::json;

// Raw text so the declared field order survives into the IndexMap.
const LISTING: &str = r#"{
    "warehouses": [{
        "name": "employees",
        "item_name": "employee",
        "created_at": "2023-01-14T18:30:00",
        "item_schema": {
            "last_name": {"type": "string", "primary_key": true, "nullable": 0, "display_as": "text"},
            "first_name": {"type": "string", "primary_key": true, "nullable": false, "display_as": "text"},
            "hired": {"type": "date", "nullable": "maybe", "display_as": "date"},
            "salary": {"type": "decimal", "display_as": "number", "type_kwargs": {"scale": 2}}
        }
    }],
    "count": 1,
    "page": 1,
    "total": 1
}"#;

#[test]
fn test_warehouse_listing_keeps_declared_field_order() {
    let list: WarehouseList = serde_json::from_str(LISTING).unwrap();
    let employees = &list.warehouses[0];

    assert_eq!(
        employees.field_names(),
        vec!["last_name", "first_name", "hired", "salary"]
    );
    assert_eq!(employees.primary_keys(), vec!["last_name", "first_name"]);
    assert_eq!(employees.item_schema["last_name"].nullable, Some(false));
    assert_eq!(employees.item_schema["hired"].nullable, None);
    assert_eq!(
        employees.item_schema["salary"].field_type,
        FieldType::Other("decimal".to_string())
    );
    assert_eq!(employees.item_schema["salary"].display_as, DisplayType::Number);
}

#[test]
fn test_item_key_follows_schema_order() {
    let list: WarehouseList = serde_json::from_str(LISTING).unwrap();
    let item: Item = serde_json::from_value(json!({
        "first_name": "Grace",
        "last_name": "Hopper",
        "hired": "1944-07-02"
    }))
    .unwrap();

    let key = ItemKey::for_item(&list.warehouses[0], &item).unwrap();
    assert_eq!(
        key.query_pairs(),
        vec![
            ("last_name".to_string(), "Hopper".to_string()),
            ("first_name".to_string(), "Grace".to_string()),
        ]
    );
}

#[test]
fn test_item_page_without_fields() {
    let page: ItemPage = serde_json::from_value(json!({
        "items": [{"id": 1}],
        "count": 1,
        "page": 1,
        "total": 40
    }))
    .unwrap();
    assert_eq!(page.fields, None);
    assert_eq!(page.total, 40);
}
