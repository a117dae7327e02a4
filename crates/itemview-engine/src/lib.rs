// Engine module - pure view logic with no I/O
// Stores in the runtime layer call into these functions and persist the results

pub mod columns;
pub mod format;
pub mod reconcile;
pub mod sort;

pub use columns::{alphabetical_order, array_move, effective_columns, move_by_id};
pub use format::{FormattedCell, format_cell, time_since};
pub use reconcile::{Reconciliation, reconcile};
pub use sort::next_sort_order;
