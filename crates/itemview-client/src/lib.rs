//! Remote contract of the item warehouse API.
//!
//! The view layer only depends on [`WarehouseApi`]; [`HttpWarehouseApi`] is the
//! HTTP/JSON implementation used in production.

mod api;
mod error;
mod http;

pub use api::WarehouseApi;
pub use error::{Error, Result};
pub use http::HttpWarehouseApi;
