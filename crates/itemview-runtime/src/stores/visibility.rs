use itemview_core::{PreferenceKey, Preferences};
use itemview_types::Warehouse;
use std::collections::{BTreeSet, HashMap};

/// Hidden columns per warehouse, loaded from storage on first use.
pub(crate) struct VisibilityStore {
    prefs: Preferences,
    hidden: HashMap<String, BTreeSet<String>>,
}

impl VisibilityStore {
    pub fn new(prefs: Preferences) -> Self {
        Self {
            prefs,
            hidden: HashMap::new(),
        }
    }

    fn entry(&mut self, warehouse: &str) -> &mut BTreeSet<String> {
        let prefs = &self.prefs;
        self.hidden
            .entry(warehouse.to_string())
            .or_insert_with(|| {
                prefs
                    .get_json::<Vec<String>>(&PreferenceKey::column_exclusions(warehouse))
                    .unwrap_or_default()
                    .into_iter()
                    .collect()
            })
    }

    pub fn hidden(&mut self, warehouse: &str) -> &BTreeSet<String> {
        self.entry(warehouse)
    }

    pub fn is_hidden(&mut self, warehouse: &str, field: &str) -> bool {
        self.entry(warehouse).contains(field)
    }

    /// Returns true if membership actually changed.
    pub fn toggle(&mut self, warehouse: &str, field: &str, hide: bool) -> bool {
        let set = self.entry(warehouse);
        let changed = if hide {
            set.insert(field.to_string())
        } else {
            set.remove(field)
        };
        if changed {
            self.persist(warehouse);
        }
        changed
    }

    pub fn reset_all(&mut self, warehouse: &str) {
        self.hidden.insert(warehouse.to_string(), BTreeSet::new());
        self.prefs
            .remove(&PreferenceKey::column_exclusions(warehouse));
    }

    /// Forget hidden fields the schema no longer has.
    pub fn prune(&mut self, warehouse: &Warehouse) {
        let set = self.entry(&warehouse.name);
        let before = set.len();
        set.retain(|field| warehouse.has_field(field));
        if set.len() != before {
            tracing::info!(
                warehouse = %warehouse.name,
                dropped = before - set.len(),
                "Dropping hidden columns missing from schema"
            );
            self.persist(&warehouse.name);
        }
    }

    fn persist(&mut self, warehouse: &str) {
        if let Some(set) = self.hidden.get(warehouse) {
            self.prefs
                .set_json(&PreferenceKey::column_exclusions(warehouse), set);
        }
    }
}
