use serde::{Deserialize, Serialize};

/// Server-side sort requested for a warehouse's item pages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Unsorted,
    Ascending(String),
    Descending(String),
}

impl SortOrder {
    pub fn field(&self) -> Option<&str> {
        match self {
            SortOrder::Unsorted => None,
            SortOrder::Ascending(field) | SortOrder::Descending(field) => Some(field),
        }
    }

    pub fn ascending(&self) -> Option<bool> {
        match self {
            SortOrder::Unsorted => None,
            SortOrder::Ascending(_) => Some(true),
            SortOrder::Descending(_) => Some(false),
        }
    }

    pub fn is_sorted(&self) -> bool {
        !matches!(self, SortOrder::Unsorted)
    }
}

/// Persisted shape of a sort order: `{"fieldName": ..., "ascending": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOrder {
    #[serde(default)]
    pub field_name: Option<String>,
    #[serde(default)]
    pub ascending: Option<bool>,
}

impl From<&SortOrder> for FieldOrder {
    fn from(sort: &SortOrder) -> Self {
        Self {
            field_name: sort.field().map(str::to_string),
            ascending: sort.ascending(),
        }
    }
}

impl From<FieldOrder> for SortOrder {
    fn from(order: FieldOrder) -> Self {
        match (order.field_name, order.ascending) {
            (Some(field), Some(true)) => SortOrder::Ascending(field),
            (Some(field), Some(false)) => SortOrder::Descending(field),
            _ => SortOrder::Unsorted,
        }
    }
}
