use std::fmt;

/// Names of persisted preference records.
///
/// Per-warehouse keys are the warehouse name followed by the preference kind,
/// e.g. `widgetsColumnOrder`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    PageSize,
    DarkMode,
    ShowTooltip,
    ShowActionsColumn,
    FieldOrder(String),
    ColumnOrder(String),
    ColumnExclusions(String),
}

impl PreferenceKey {
    pub fn field_order(warehouse: &str) -> Self {
        PreferenceKey::FieldOrder(warehouse.to_string())
    }

    pub fn column_order(warehouse: &str) -> Self {
        PreferenceKey::ColumnOrder(warehouse.to_string())
    }

    pub fn column_exclusions(warehouse: &str) -> Self {
        PreferenceKey::ColumnExclusions(warehouse.to_string())
    }

    pub fn as_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferenceKey::PageSize => f.write_str("pageSize"),
            PreferenceKey::DarkMode => f.write_str("darkMode"),
            PreferenceKey::ShowTooltip => f.write_str("showTooltip"),
            PreferenceKey::ShowActionsColumn => f.write_str("showActionsColumn"),
            PreferenceKey::FieldOrder(warehouse) => write!(f, "{}FieldOrder", warehouse),
            PreferenceKey::ColumnOrder(warehouse) => write!(f, "{}ColumnOrder", warehouse),
            PreferenceKey::ColumnExclusions(warehouse) => {
                write!(f, "{}ColumnExclusions", warehouse)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(PreferenceKey::PageSize.as_key(), "pageSize");
        assert_eq!(PreferenceKey::DarkMode.as_key(), "darkMode");
        assert_eq!(PreferenceKey::ShowTooltip.as_key(), "showTooltip");
        assert_eq!(PreferenceKey::ShowActionsColumn.as_key(), "showActionsColumn");
        assert_eq!(PreferenceKey::field_order("widgets").as_key(), "widgetsFieldOrder");
        assert_eq!(PreferenceKey::column_order("widgets").as_key(), "widgetsColumnOrder");
        assert_eq!(
            PreferenceKey::column_exclusions("widgets").as_key(),
            "widgetsColumnExclusions"
        );
    }
}
