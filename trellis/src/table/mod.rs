//! Table engine - sorting, pagination and selection over host rows.
//!
//! The engine provides:
//! - Field descriptors with typed accessors and optional cell renderers
//! - Stable single-key sorting (ascending ↔ descending)
//! - Page slicing of the sorted rows with clamped page indices
//! - Key-based row selection that survives sorting and paging
//! - Row click and row action events for the host
//!
//! Hosts keep a [`TableState`] beside their rows, send [`TableCommand`]s
//! through [`Table::update`], and call [`Table::sync`] whenever the rows
//! change underneath the state.

mod engine;
mod field;
mod page;
mod render;
mod sort;
mod state;

pub use engine::Table;
pub use field::{Alignment, Field, TableAction, TableRow};
pub use page::{PageWindow, clamp_page, page_count};
pub use render::{HeaderCell, RowView, SelectAll, TableView};
pub use sort::{Direction, Sort, sorted_indices};
pub use state::{DEFAULT_PAGE_SIZE, TableCommand, TableEvent, TableState};
