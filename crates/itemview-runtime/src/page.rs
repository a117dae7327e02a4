use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use itemview_engine::{FormattedCell, format_cell};
use itemview_types::{DisplayType, FieldType, ItemPage, SortOrder, Warehouse};
use serde::Serialize;
use serde_json::{Value, json};

/// Everything needed to render one page of a warehouse's items.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPageView {
    pub warehouse: Warehouse,
    pub page: ItemPage,
    /// Visible columns in display order.
    pub columns: Vec<String>,
    pub display: IndexMap<String, DisplayType>,
    pub primary_keys: Vec<String>,
    pub sort: SortOrder,
    pub show_actions_column: bool,
}

impl ItemPageView {
    /// Format every visible cell of the page, row by row.
    pub fn rows(&self, now: DateTime<Utc>) -> Vec<Vec<FormattedCell>> {
        self.page
            .items
            .iter()
            .map(|item| {
                self.columns
                    .iter()
                    .map(|column| {
                        let value = item.get(column).unwrap_or(&Value::Null);
                        let display = self
                            .display
                            .get(column)
                            .copied()
                            .unwrap_or(DisplayType::Text);
                        let field_type = self
                            .warehouse
                            .field(column)
                            .map(|definition| &definition.field_type)
                            .unwrap_or(&FieldType::Text);
                        format_cell(value, display, field_type, now)
                    })
                    .collect()
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.page.items.is_empty()
    }
}

/// Replacement content shown when an item page cannot be loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPanel {
    pub title: String,
    pub message: String,
    /// Error message and its source chain, for the "details" disclosure.
    pub diagnostic: Value,
}

impl ErrorPanel {
    pub fn new(warehouse: &str, err: &(dyn std::error::Error + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            title: format!("Unable to load {}", warehouse),
            message: "Something went wrong while fetching items. Try again later.".to_string(),
            diagnostic: json!({
                "warehouse": warehouse,
                "error": err.to_string(),
                "causes": causes,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Loaded(Box<ItemPageView>),
    Failed(ErrorPanel),
}

impl PageOutcome {
    pub fn view(&self) -> Option<&ItemPageView> {
        match self {
            PageOutcome::Loaded(view) => Some(view.as_ref()),
            PageOutcome::Failed(_) => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, PageOutcome::Loaded(_))
    }
}
