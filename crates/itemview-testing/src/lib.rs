//! Testing infrastructure for itemview integration tests.
//!
//! - `TestWorld`: a fresh view store over in-memory storage and a fake API
//! - `FakeWarehouseApi`: scriptable in-memory `WarehouseApi`
//! - `fixtures`: sample warehouses and items

pub mod fake_api;
pub mod fixtures;
pub mod world;

pub use fake_api::{ApiCall, FakeWarehouseApi};
pub use world::TestWorld;

use std::sync::Once;

static INIT: Once = Once::new();

/// Install a `tracing` subscriber for test binaries. Safe to call multiple times.
///
/// Honours `RUST_LOG`; defaults to `warn`.
pub fn init_tracing() {
    INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
