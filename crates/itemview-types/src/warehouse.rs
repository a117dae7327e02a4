use crate::DisplayType;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Field name -> definition, in the order the server declared the fields.
pub type ItemSchema = IndexMap<String, FieldDefinition>;

/// Storage kind of a field as reported by the warehouse API.
///
/// Unknown kinds are kept verbatim so a newer server does not break decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Integer,
    String,
    Text,
    DateTime,
    Date,
    Boolean,
    Json,
    Float,
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Integer => "integer",
            FieldType::String => "string",
            FieldType::Text => "text",
            FieldType::DateTime => "datetime",
            FieldType::Date => "date",
            FieldType::Boolean => "boolean",
            FieldType::Json => "json",
            FieldType::Float => "float",
            FieldType::Other(raw) => raw,
        }
    }

    /// Numeric fields hold epoch seconds when displayed as dates.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Float)
    }
}

impl From<String> for FieldType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "integer" => FieldType::Integer,
            "string" => FieldType::String,
            "text" => FieldType::Text,
            "datetime" => FieldType::DateTime,
            "date" => FieldType::Date,
            "boolean" => FieldType::Boolean,
            "json" => FieldType::Json,
            "float" => FieldType::Float,
            _ => FieldType::Other(raw),
        }
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub nullable: Option<bool>,
    #[serde(default)]
    pub unique: Option<bool>,
    #[serde(default)]
    pub index: Option<bool>,
    #[serde(default)]
    pub default: Value,
    #[serde(default)]
    pub autoincrement: Value,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub type_kwargs: IndexMap<String, Value>,
    pub display_as: DisplayType,
}

impl FieldDefinition {
    pub fn new(field_type: FieldType, display_as: DisplayType) -> Self {
        Self {
            field_type,
            primary_key: false,
            nullable: None,
            unique: None,
            index: None,
            default: Value::Null,
            autoincrement: Value::Null,
            key: None,
            type_kwargs: IndexMap::new(),
            display_as,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

// The API has reported nullability as a bool, as 0/1, and as a sentinel string.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        _ => None,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub name: String,
    pub item_name: String,
    #[serde(default)]
    pub created_at: String,
    pub item_schema: ItemSchema,
}

impl Warehouse {
    /// Field names in server-declared order.
    pub fn field_names(&self) -> Vec<String> {
        self.item_schema.keys().cloned().collect()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.item_schema.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.item_schema.contains_key(name)
    }

    pub fn primary_keys(&self) -> Vec<String> {
        self.item_schema
            .iter()
            .filter(|(_, definition)| definition.primary_key)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// Response body of the warehouse listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseList {
    pub warehouses: Vec<Warehouse>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    const SAMPLE: &str = r#"{
        "name": "employees",
        "item_name": "employee",
        "created_at": "2023-11-04T12:00:00",
        "item_schema": {
            "name": {"type": "string", "primary_key": true, "nullable": 0, "display_as": "text"},
            "salary": {"type": "float", "nullable": true, "display_as": "number"},
            "hire_date": {"type": "date", "nullable": "NULL_UNSPECIFIED", "display_as": "date"},
            "meta": {"type": "geometry", "display_as": "json"}
        }
    }"#;

    #[test]
    fn test_schema_keeps_server_order() {
        let warehouse: Warehouse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(
            warehouse.field_names(),
            vec!["name", "salary", "hire_date", "meta"]
        );
    }

    #[test]
    fn test_field_definition_decoding() {
        let warehouse: Warehouse = serde_json::from_str(SAMPLE).unwrap();

        let name = warehouse.field("name").unwrap();
        assert!(name.primary_key);
        assert_eq!(name.nullable, Some(false));
        assert_eq!(name.field_type, FieldType::String);

        let hire_date = warehouse.field("hire_date").unwrap();
        assert_eq!(hire_date.nullable, None);
        assert_eq!(hire_date.display_as, DisplayType::Date);

        let meta = warehouse.field("meta").unwrap();
        assert_eq!(meta.field_type, FieldType::Other("geometry".to_string()));
        assert_eq!(meta.field_type.to_string(), "geometry");
    }

    #[test]
    fn test_primary_keys() {
        let warehouse: Warehouse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(warehouse.primary_keys(), vec!["name"]);
    }
}
