use crate::{Error, Result, SortOrder, Warehouse};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type ItemValue = Value;

/// One schema-conforming record, keyed by field name.
pub type Item = IndexMap<String, ItemValue>;

/// One page of items as returned by the items endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub count: u64,
    pub page: u64,
    pub total: u64,
    /// Column list at response time; only present when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

/// Parameters of an item page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPageQuery {
    pub page_size: u32,
    pub page: u32,
    pub order_by: Option<String>,
    pub ascending: Option<bool>,
    pub include_fields: bool,
    pub fields: Option<Vec<String>>,
}

impl ItemPageQuery {
    pub fn new(page_size: u32, page: u32) -> Self {
        Self {
            page_size,
            page: page.max(1),
            order_by: None,
            ascending: None,
            include_fields: true,
            fields: None,
        }
    }

    pub fn sorted_by(mut self, sort: &SortOrder) -> Self {
        self.order_by = sort.field().map(str::to_string);
        self.ascending = sort.ascending();
        self
    }

    pub fn with_fields(mut self, fields: Option<Vec<String>>) -> Self {
        self.fields = fields;
        self
    }

    /// Query-string pairs; sort parameters are omitted while unsorted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page_size", self.page_size.to_string()),
            ("page", self.page.to_string()),
        ];
        if self.include_fields {
            pairs.push(("include_fields", "true".to_string()));
        }
        if let Some(order_by) = &self.order_by {
            pairs.push(("order_by", order_by.clone()));
        }
        if let Some(ascending) = self.ascending {
            pairs.push(("ascending", ascending.to_string()));
        }
        if let Some(fields) = &self.fields
            && !fields.is_empty()
        {
            pairs.push(("fields", fields.join(",")));
        }
        pairs
    }
}

/// The full primary-key tuple of an item, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemKey(Vec<(String, ItemValue)>);

impl ItemKey {
    pub fn for_item(warehouse: &Warehouse, item: &Item) -> Result<Self> {
        let mut parts = Vec::new();
        for field in warehouse.primary_keys() {
            let value = item
                .get(&field)
                .cloned()
                .ok_or_else(|| Error::MissingPrimaryKey(field.clone()))?;
            parts.push((field, value));
        }
        Ok(Self(parts))
    }

    pub fn parts(&self) -> &[(String, ItemValue)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Key values rendered as query parameters; strings go out unquoted.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(field, value)| {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (field.clone(), rendered)
            })
            .collect()
    }
}
