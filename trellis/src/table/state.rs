//! Table view state, commands and events.

use std::hash::Hash;

use crate::selection::{Selection, SelectionMode};

use super::sort::Sort;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Ephemeral view state for a table: sort, page and selection.
///
/// The rows themselves are not part of the state. They are passed in on
/// every update and render, so the host stays the only owner of its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState<K: Clone + Eq + Hash> {
    /// Active sort, or `None` for source order.
    pub sort: Option<Sort>,
    /// Zero-based page index.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Selected row keys.
    pub selection: Selection<K>,
}

impl<K: Clone + Eq + Hash> Default for TableState<K> {
    fn default() -> Self {
        Self::new(SelectionMode::None, DEFAULT_PAGE_SIZE)
    }
}

impl<K: Clone + Eq + Hash> TableState<K> {
    /// Create an unsorted state on the first page.
    pub fn new(mode: SelectionMode, page_size: usize) -> Self {
        Self {
            sort: None,
            page: 0,
            page_size: page_size.max(1),
            selection: Selection::with_mode(mode),
        }
    }

    /// Start from a given sort.
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }
}

/// A request to change table view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCommand<K> {
    /// Sort by a field; repeating the key flips the direction.
    Sort(String),
    /// Return to source order.
    ClearSort,
    /// Jump to a page (clamped).
    GoToPage(usize),
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    /// Change the page size; resets to the first page.
    SetPageSize(usize),
    /// Toggle one row's selection.
    ToggleRow(K),
    /// Select every row of the dataset, or clear if all are selected.
    ToggleAll,
    ClearSelection,
    /// A row was clicked.
    ClickRow(K),
    /// A row action was triggered.
    Invoke { action: String, key: K },
}

/// Something the host should know about after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent<K> {
    /// The selected keys, in dataset order.
    SelectionChanged(Vec<K>),
    SortChanged(Option<Sort>),
    PageChanged(usize),
    RowClicked(K),
    ActionInvoked { action: String, key: K },
}
