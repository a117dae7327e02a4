use itemview_core::{PreferenceKey, Preferences};

/// Page sizes offered by the page-size picker.
pub const PAGE_SIZES: [u32; 7] = [5, 10, 20, 30, 40, 50, 100];

pub(crate) const DEFAULT_PAGE_SIZE: u32 = 10;

/// Global, warehouse-independent toggles.
pub(crate) struct SettingsStore {
    prefs: Preferences,
    default_page_size: u32,
    dark_mode: bool,
    show_tooltip: bool,
    show_actions_column: bool,
    use_fallback_actions_column: bool,
}

impl SettingsStore {
    pub fn new(prefs: Preferences, default_page_size: u32) -> Self {
        let flag = |key: PreferenceKey| prefs.get_flag(&key).unwrap_or(false);
        let dark_mode = flag(PreferenceKey::DarkMode);
        let show_tooltip = flag(PreferenceKey::ShowTooltip);
        let show_actions_column = flag(PreferenceKey::ShowActionsColumn);
        let default_page_size = if default_page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            default_page_size
        };

        Self {
            prefs,
            default_page_size,
            dark_mode,
            show_tooltip,
            show_actions_column,
            use_fallback_actions_column: true,
        }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, on: bool) {
        self.dark_mode = on;
        self.prefs.set_flag(&PreferenceKey::DarkMode, on);
    }

    pub fn show_tooltip(&self) -> bool {
        self.show_tooltip
    }

    pub fn set_show_tooltip(&mut self, on: bool) {
        self.show_tooltip = on;
        self.prefs.set_flag(&PreferenceKey::ShowTooltip, on);
    }

    pub fn show_actions_column(&self) -> bool {
        self.show_actions_column
    }

    /// The first explicit choice ends the fallback period for the session.
    pub fn set_show_actions_column(&mut self, on: bool) {
        self.show_actions_column = on;
        self.use_fallback_actions_column = false;
        self.prefs.set_flag(&PreferenceKey::ShowActionsColumn, on);
    }

    pub fn use_fallback_actions_column(&self) -> bool {
        self.use_fallback_actions_column
    }

    /// Stored page size; an absent, unparsable or zero value is replaced by
    /// the default, which is written back.
    pub fn page_size(&self) -> u32 {
        match self.prefs.get_parsed::<u32>(&PreferenceKey::PageSize) {
            Some(size) if size > 0 => size,
            _ => {
                self.prefs.set(
                    &PreferenceKey::PageSize,
                    &self.default_page_size.to_string(),
                );
                self.default_page_size
            }
        }
    }

    pub fn set_page_size(&mut self, size: u32) {
        let size = if size == 0 { self.default_page_size } else { size };
        self.prefs.set(&PreferenceKey::PageSize, &size.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemview_core::MemoryStorage;
    use std::sync::Arc;

    #[test]
    fn test_page_size_default_is_persisted() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SettingsStore::new(Preferences::new(storage.clone()), DEFAULT_PAGE_SIZE);

        assert_eq!(store.page_size(), 10);
        assert_eq!(
            storage.snapshot().get("pageSize").map(String::as_str),
            Some("10")
        );
    }

    #[test]
    fn test_malformed_page_size_falls_back() {
        let storage = Arc::new(MemoryStorage::with_entries([("pageSize", "lots")]));
        let mut store = SettingsStore::new(Preferences::new(storage.clone()), DEFAULT_PAGE_SIZE);

        assert_eq!(store.page_size(), 10);
        store.set_page_size(50);
        assert_eq!(store.page_size(), 50);
        assert_eq!(
            storage.snapshot().get("pageSize").map(String::as_str),
            Some("50")
        );
    }

    #[test]
    fn test_flags_load_and_persist() {
        let storage = Arc::new(MemoryStorage::with_entries([
            ("darkMode", "1"),
            ("showTooltip", "yes"),
        ]));
        let mut store = SettingsStore::new(Preferences::new(storage.clone()), DEFAULT_PAGE_SIZE);

        assert!(store.dark_mode());
        assert!(!store.show_tooltip());
        assert!(!store.show_actions_column());
        assert!(store.use_fallback_actions_column());

        store.set_show_actions_column(true);
        store.set_dark_mode(false);
        assert!(store.show_actions_column());
        assert!(!store.use_fallback_actions_column());

        let snapshot = storage.snapshot();
        assert_eq!(snapshot.get("darkMode").map(String::as_str), Some("0"));
        assert_eq!(snapshot.get("showActionsColumn").map(String::as_str), Some("1"));
    }
}
