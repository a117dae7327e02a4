use crate::config::Config;
use crate::notice::{Notice, NoticeLog};
use crate::page::{ErrorPanel, ItemPageView, PageOutcome};
use crate::stores::{
    ColumnOrderStore, DEFAULT_PAGE_SIZE, DisplayTypeStore, SettingsStore, SortOrderStore,
    VisibilityStore,
};
use crate::{Error, Result};
use indexmap::IndexMap;
use itemview_client::WarehouseApi;
use itemview_core::{Preferences, resolve_data_path};
use itemview_engine::effective_columns;
use itemview_types::{
    DisplayAs, DisplayType, Item, ItemKey, ItemPageQuery, SortOrder, Warehouse,
};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

struct ViewState {
    ready: bool,
    refresh_count: u64,
    warehouses: IndexMap<String, Warehouse>,
    columns: ColumnOrderStore,
    visibility: VisibilityStore,
    display: DisplayTypeStore,
    sort: SortOrderStore,
    settings: SettingsStore,
}

impl ViewState {
    fn new(prefs: &Preferences, default_page_size: u32) -> Self {
        Self {
            ready: false,
            refresh_count: 0,
            warehouses: IndexMap::new(),
            columns: ColumnOrderStore::new(prefs.clone()),
            visibility: VisibilityStore::new(prefs.clone()),
            display: DisplayTypeStore::new(),
            sort: SortOrderStore::new(prefs.clone()),
            settings: SettingsStore::new(prefs.clone(), default_page_size),
        }
    }

    fn bump(&mut self) {
        self.refresh_count += 1;
    }

    /// Reconcile every per-warehouse preference against a fresh schema and
    /// cache the schema.
    fn absorb(&mut self, warehouse: Warehouse) {
        self.columns.reconcile(&warehouse);
        self.visibility.prune(&warehouse);
        self.sort.prune(&warehouse);
        self.display.prune(&warehouse);
        self.warehouses.insert(warehouse.name.clone(), warehouse);
    }

    fn visible_columns(&mut self, name: &str) -> Option<Vec<String>> {
        let warehouse = self.warehouses.get(name)?;
        let order = self.columns.get(warehouse);
        Some(effective_columns(&order, self.visibility.hidden(name)))
    }

    /// Fields to request explicitly: the user's order minus hidden columns.
    /// `None` while the user has neither reordered nor hidden anything.
    fn requested_fields(&mut self, name: &str) -> Option<Vec<String>> {
        let stored = self.columns.stored(name).cloned();
        let hidden = self.visibility.hidden(name);
        match stored {
            Some(order) => Some(effective_columns(&order, hidden)),
            None if hidden.is_empty() => None,
            None => {
                let hidden = hidden.clone();
                let warehouse = self.warehouses.get(name)?;
                Some(effective_columns(&warehouse.field_names(), &hidden))
            }
        }
    }

    fn item_page_query(&mut self, name: &str, page: u32) -> ItemPageQuery {
        let sort = self.sort.get(name);
        ItemPageQuery::new(self.settings.page_size(), page)
            .sorted_by(&sort)
            .with_fields(self.requested_fields(name))
    }
}

/// Session-wide owner of every view preference.
///
/// Reads come from memory; every mutation updates memory, writes through
/// to [`Preferences`] and bumps [`refresh_count`](Self::refresh_count) when
/// rendered tables need to re-read. The state lock is never held across a
/// network call, so overlapping display-type requests resolve in response
/// order.
pub struct ViewPreferenceStore {
    api: Arc<dyn WarehouseApi>,
    state: Mutex<ViewState>,
    notices: NoticeLog,
}

impl ViewPreferenceStore {
    pub fn new(api: Arc<dyn WarehouseApi>, prefs: Preferences) -> Self {
        Self::with_default_page_size(api, prefs, DEFAULT_PAGE_SIZE)
    }

    pub fn with_default_page_size(
        api: Arc<dyn WarehouseApi>,
        prefs: Preferences,
        default_page_size: u32,
    ) -> Self {
        Self {
            api,
            state: Mutex::new(ViewState::new(&prefs, default_page_size)),
            notices: NoticeLog::default(),
        }
    }

    /// Build a store from a loaded [`Config`], opening storage under `data_dir`.
    pub fn from_config(config: &Config, data_dir: &Path) -> Result<Self> {
        let storage = config.open_storage(data_dir)?;
        let api = Arc::new(config.connect_api()?);
        Ok(Self::with_default_page_size(
            api,
            Preferences::new(storage),
            config.view.default_page_size,
        ))
    }

    /// Resolve the data directory, read `config.toml` from it and build the store.
    pub fn open(data_dir: Option<&str>) -> Result<Self> {
        let data_dir = resolve_data_path(data_dir)?;
        let config = Config::load_from(&data_dir.join("config.toml"))?;
        tracing::debug!(data_dir = %data_dir.display(), "Opening view preferences");
        Self::from_config(&config, &data_dir)
    }

    /// End the session, handing back notices nobody has displayed yet.
    pub fn close(self) -> Vec<Notice> {
        let pending = self.notices.drain();
        tracing::debug!(pending = pending.len(), "Closing view preferences");
        pending
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --- Warehouses ---

    /// Fetch the warehouse list and reconcile stored preferences. Only the
    /// first successful call does any work.
    pub async fn load(&self) -> Result<()> {
        if self.is_ready() {
            return Ok(());
        }
        self.fetch_warehouses().await
    }

    /// Re-fetch the warehouse list and reconcile again.
    pub async fn refresh_warehouses(&self) -> Result<()> {
        self.fetch_warehouses().await?;
        self.state().bump();
        Ok(())
    }

    async fn fetch_warehouses(&self) -> Result<()> {
        let warehouses = self.api.list_warehouses().await.map_err(|err| {
            tracing::error!(error = %err, "Failed to fetch warehouses");
            Error::from(err)
        })?;

        let mut state = self.state();
        state.warehouses.clear();
        let count = warehouses.len();
        for warehouse in warehouses {
            state.absorb(warehouse);
        }
        state.ready = true;
        tracing::info!(warehouses = count, "Loaded warehouses");
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.state().ready
    }

    pub fn warehouses(&self) -> Vec<Warehouse> {
        self.state().warehouses.values().cloned().collect()
    }

    pub fn warehouse(&self, name: &str) -> Option<Warehouse> {
        self.state().warehouses.get(name).cloned()
    }

    pub fn refresh_count(&self) -> u64 {
        self.state().refresh_count
    }

    // --- Global settings ---

    pub fn dark_mode(&self) -> bool {
        self.state().settings.dark_mode()
    }

    pub fn set_dark_mode(&self, on: bool) {
        self.state().settings.set_dark_mode(on);
    }

    pub fn show_tooltip(&self) -> bool {
        self.state().settings.show_tooltip()
    }

    pub fn set_show_tooltip(&self, on: bool) {
        self.state().settings.set_show_tooltip(on);
    }

    pub fn show_actions_column(&self) -> bool {
        self.state().settings.show_actions_column()
    }

    pub fn set_show_actions_column(&self, on: bool) {
        let mut state = self.state();
        state.settings.set_show_actions_column(on);
        state.bump();
    }

    /// True until the user toggles the actions column for the first time.
    pub fn use_fallback_actions_column(&self) -> bool {
        self.state().settings.use_fallback_actions_column()
    }

    pub fn page_size(&self) -> u32 {
        self.state().settings.page_size()
    }

    pub fn set_page_size(&self, size: u32) {
        let mut state = self.state();
        state.settings.set_page_size(size);
        state.bump();
    }

    // --- Column order ---

    /// `None` until the warehouse list is loaded or when `warehouse` is unknown.
    pub fn column_order(&self, warehouse: &str) -> Option<Vec<String>> {
        let state = self.state();
        if !state.ready {
            return None;
        }
        let schema = state.warehouses.get(warehouse)?;
        Some(state.columns.get(schema))
    }

    /// Move the column at `old_index` to `new_index` within `current`, the
    /// columns as displayed, and return the full stored order. Hidden columns
    /// keep their place. Out-of-range indices, unknown warehouses and columns
    /// outside the schema return `current` unchanged.
    pub fn reorder_columns(
        &self,
        warehouse: &str,
        old_index: usize,
        new_index: usize,
        current: &[String],
    ) -> Vec<String> {
        let mut state = self.state();
        let Some(schema) = state.warehouses.get(warehouse).cloned() else {
            return current.to_vec();
        };
        match state.columns.reorder(&schema, old_index, new_index, current) {
            Some(order) => {
                state.bump();
                order
            }
            None => current.to_vec(),
        }
    }

    /// Drag-and-drop reorder: drop column `from` onto column `to`.
    pub fn move_column(&self, warehouse: &str, from: &str, to: &str) -> Option<Vec<String>> {
        let mut state = self.state();
        let schema = state.warehouses.get(warehouse)?.clone();
        let order = state.columns.reorder_by_id(&schema, from, to)?;
        state.bump();
        Some(order)
    }

    pub fn reset_column_order(&self, warehouse: &str) -> Option<Vec<String>> {
        let mut state = self.state();
        let fields = state.warehouses.get(warehouse)?.field_names();
        let order = state.columns.reset(warehouse, &fields);
        state.bump();
        Some(order)
    }

    // --- Visibility ---

    pub fn is_hidden(&self, warehouse: &str, field: &str) -> bool {
        self.state().visibility.is_hidden(warehouse, field)
    }

    pub fn hidden_columns(&self, warehouse: &str) -> BTreeSet<String> {
        self.state().visibility.hidden(warehouse).clone()
    }

    pub fn set_column_hidden(&self, warehouse: &str, field: &str, hide: bool) {
        let mut state = self.state();
        if state.visibility.toggle(warehouse, field, hide) {
            state.bump();
        }
    }

    pub fn reset_hidden_columns(&self, warehouse: &str) {
        let mut state = self.state();
        state.visibility.reset_all(warehouse);
        state.bump();
    }

    // --- Display types ---

    pub fn display_type(&self, warehouse: &str, field: &str) -> Option<DisplayType> {
        let state = self.state();
        state
            .display
            .effective(state.warehouses.get(warehouse)?, field)
    }

    /// Effective display type of every field, in schema order.
    pub fn display_options(&self, warehouse: &str) -> Option<IndexMap<String, DisplayType>> {
        let state = self.state();
        Some(state.display.options(state.warehouses.get(warehouse)?))
    }

    /// Apply `display` locally, then ask the server to adopt it as the
    /// field's default. A failed request is reported as a notice and the
    /// local override stays. Returns whether the server accepted it.
    pub async fn set_display_type(&self, warehouse: &str, field: &str, display: DisplayType) -> bool {
        {
            let mut state = self.state();
            let known = state
                .warehouses
                .get(warehouse)
                .is_some_and(|schema| schema.has_field(field));
            if !known {
                drop(state);
                self.notices.push(Notice::error(
                    format!("Cannot change display type of {}.{}", warehouse, field),
                    "field is not part of the schema",
                ));
                return false;
            }
            state.display.set_override(warehouse, field, display);
            state.bump();
        }

        match self
            .api
            .set_display_as(warehouse, field, DisplayAs::Set(display))
            .await
        {
            Ok(_) => true,
            Err(err) => {
                self.notices.push(Notice::error(
                    format!("Failed to save display type of {}.{}", warehouse, field),
                    err,
                ));
                false
            }
        }
    }

    /// Ask the server to revert the field to its intrinsic display type and
    /// adopt whatever it reports. Nothing changes locally on failure.
    pub async fn reset_display_type(&self, warehouse: &str, field: &str) -> Option<DisplayType> {
        let display = match self
            .api
            .set_display_as(warehouse, field, DisplayAs::Reset)
            .await
        {
            Ok(display) => display,
            Err(err) => {
                self.notices.push(Notice::error(
                    format!("Failed to reset display type of {}.{}", warehouse, field),
                    err,
                ));
                return None;
            }
        };

        let mut state = self.state();
        if let Some(definition) = state
            .warehouses
            .get_mut(warehouse)
            .and_then(|schema| schema.item_schema.get_mut(field))
        {
            definition.display_as = display;
        }
        state.display.clear_override(warehouse, field);
        state.bump();
        Some(display)
    }

    // --- Sorting ---

    pub fn sort_order(&self, warehouse: &str) -> SortOrder {
        self.state().sort.get(warehouse)
    }

    /// Advance the header-click cycle for `field`; items must be re-fetched.
    pub fn click_header(&self, warehouse: &str, field: &str) -> SortOrder {
        let mut state = self.state();
        let order = state.sort.click(warehouse, field);
        state.bump();
        order
    }

    // --- Rendering ---

    /// Columns to render for `schema`: reconciled, ordered, minus hidden.
    /// `None` until the warehouse list has loaded or when `schema` describes
    /// another warehouse.
    pub fn effective_columns(&self, warehouse: &str, schema: &Warehouse) -> Option<Vec<String>> {
        let mut state = self.state();
        if !state.ready {
            return None;
        }
        if schema.name != warehouse {
            tracing::debug!(
                warehouse = %warehouse,
                schema = %schema.name,
                "Schema belongs to another warehouse"
            );
            return None;
        }
        if state.warehouses.get(warehouse) != Some(schema) {
            state.absorb(schema.clone());
        }
        state.visible_columns(warehouse)
    }

    /// [`effective_columns`](Self::effective_columns) for the cached schema.
    pub fn visible_columns(&self, warehouse: &str) -> Option<Vec<String>> {
        let mut state = self.state();
        if !state.ready {
            return None;
        }
        state.visible_columns(warehouse)
    }

    // --- Items ---

    pub fn item_page_query(&self, warehouse: &str, page: u32) -> ItemPageQuery {
        self.state().item_page_query(warehouse, page)
    }

    /// Fetch the warehouse schema and one page of its items. Failures are
    /// turned into an [`ErrorPanel`] rather than returned.
    pub async fn load_item_page(&self, warehouse: &str, page: u32) -> PageOutcome {
        let schema = match self.api.get_warehouse(warehouse).await {
            Ok(schema) => schema,
            Err(err) => return self.failed_page(warehouse, err),
        };

        let query = {
            let mut state = self.state();
            state.absorb(schema);
            state.item_page_query(warehouse, page)
        };
        tracing::debug!(warehouse = %warehouse, query = ?query, "Fetching items");

        let items = match self.api.get_items(warehouse, &query).await {
            Ok(items) => items,
            Err(err) => return self.failed_page(warehouse, err),
        };

        let mut state = self.state();
        let Some(schema) = state.warehouses.get(warehouse).cloned() else {
            return self.failed_page(warehouse, Error::UnknownWarehouse(warehouse.to_string()));
        };
        let mut columns = state.visible_columns(warehouse).unwrap_or_default();
        if columns.is_empty()
            && let Some(fields) = &items.fields
        {
            columns = fields.clone();
        }

        PageOutcome::Loaded(Box::new(ItemPageView {
            display: state.display.options(&schema),
            primary_keys: schema.primary_keys(),
            sort: state.sort.get(warehouse),
            show_actions_column: state.settings.show_actions_column(),
            page: items,
            columns,
            warehouse: schema,
        }))
    }

    fn failed_page(&self, warehouse: &str, err: impl Into<Error>) -> PageOutcome {
        let err = err.into();
        tracing::error!(warehouse = %warehouse, error = %err, "Failed to load item page");
        PageOutcome::Failed(ErrorPanel::new(warehouse, &err))
    }

    /// Delete one item by its primary-key tuple. Returns whether it was deleted.
    pub async fn delete_item(&self, warehouse: &str, item: &Item) -> bool {
        let key = {
            let state = self.state();
            state
                .warehouses
                .get(warehouse)
                .ok_or_else(|| Error::UnknownWarehouse(warehouse.to_string()))
                .and_then(|schema| {
                    ItemKey::for_item(schema, item)
                        .map_err(|err| Error::Api(itemview_client::Error::InvalidInput(err)))
                })
        };
        let key = match key {
            Ok(key) => key,
            Err(err) => {
                self.notices
                    .push(Notice::error(format!("Cannot delete item from {}", warehouse), err));
                return false;
            }
        };

        match self.api.delete_item(warehouse, &key).await {
            Ok(()) => {
                tracing::info!(warehouse = %warehouse, key = ?key.parts(), "Deleted item");
                self.state().bump();
                true
            }
            Err(err) => {
                self.notices
                    .push(Notice::error(format!("Failed to delete item from {}", warehouse), err));
                false
            }
        }
    }

    // --- Notices ---

    pub fn take_notices(&self) -> Vec<Notice> {
        self.notices.drain()
    }
}

impl std::fmt::Debug for ViewPreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("ViewPreferenceStore")
            .field("ready", &state.ready)
            .field("refresh_count", &state.refresh_count)
            .field("warehouses", &state.warehouses.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
