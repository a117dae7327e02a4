pub mod display;
pub mod error;
pub mod ident;
pub mod item;
pub mod sort;
pub mod warehouse;

pub use display::{DisplayAs, DisplayType};
pub use error::{Error, Result};
pub use ident::{is_identifier, validate_identifier};
pub use item::{Item, ItemKey, ItemPage, ItemPageQuery, ItemValue};
pub use sort::{FieldOrder, SortOrder};
pub use warehouse::{FieldDefinition, FieldType, ItemSchema, Warehouse, WarehouseList};
