use crate::Result;
use async_trait::async_trait;
use itemview_types::{DisplayAs, DisplayType, ItemKey, ItemPage, ItemPageQuery, Warehouse};

#[async_trait]
pub trait WarehouseApi: Send + Sync {
    /// Every warehouse with its current schema.
    async fn list_warehouses(&self) -> Result<Vec<Warehouse>>;

    async fn get_warehouse(&self, name: &str) -> Result<Warehouse>;

    async fn get_items(&self, warehouse: &str, query: &ItemPageQuery) -> Result<ItemPage>;

    /// Change the server-side default display type of a field.
    ///
    /// Returns the display type now in effect: the requested one for
    /// [`DisplayAs::Set`], or whatever the server reverted to for
    /// [`DisplayAs::Reset`].
    async fn set_display_as(
        &self,
        warehouse: &str,
        field: &str,
        display_as: DisplayAs,
    ) -> Result<DisplayType>;

    async fn delete_item(&self, warehouse: &str, key: &ItemKey) -> Result<()>;
}
