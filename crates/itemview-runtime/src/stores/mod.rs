// Per-warehouse preference stores
// Only ViewPreferenceStore holds these; every mutation goes through it

mod column_order;
mod display;
mod settings;
mod sort_order;
mod visibility;

pub(crate) use column_order::ColumnOrderStore;
pub(crate) use display::DisplayTypeStore;
pub(crate) use settings::{DEFAULT_PAGE_SIZE, SettingsStore};
pub(crate) use sort_order::SortOrderStore;
pub(crate) use visibility::VisibilityStore;

pub use settings::PAGE_SIZES;
