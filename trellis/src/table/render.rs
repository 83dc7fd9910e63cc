//! Render output of the table engine.

use super::field::{Alignment, TableAction};
use super::page::PageWindow;
use super::sort::Direction;

/// A rendered header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub width: Option<u16>,
    pub align: Alignment,
    /// Clickable for sorting.
    pub sortable: bool,
    /// Direction if this column is the active sort.
    pub sorted: Option<Direction>,
}

/// A rendered data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView<K> {
    pub key: K,
    /// Zero-based position in the sorted dataset.
    pub position: usize,
    /// One rendered string per field.
    pub cells: Vec<String>,
    pub selected: bool,
}

/// State of the select-all checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAll {
    None,
    Some,
    All,
}

impl SelectAll {
    /// Checkbox glyph for this state.
    pub fn indicator(self) -> &'static str {
        match self {
            SelectAll::None => "□",
            SelectAll::Some => "◩",
            SelectAll::All => "■",
        }
    }
}

/// Everything a renderer needs to draw one table frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView<K> {
    pub headers: Vec<HeaderCell>,
    /// Rows on the current page, in display order.
    pub rows: Vec<RowView<K>>,
    pub actions: Vec<TableAction>,
    /// Page window, or `None` when pagination is disabled.
    pub pagination: Option<PageWindow>,
    /// Select-all checkbox, or `None` outside multi-select.
    pub select_all: Option<SelectAll>,
    pub selected_count: usize,
    /// Row count of the whole dataset.
    pub total: usize,
}

impl<K> TableView<K> {
    /// Returns `true` when there are no rows to show at all.
    ///
    /// Renderers draw an empty state instead of a body in this case.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// "Showing 11-20 of 45" style summary.
    pub fn summary(&self) -> String {
        match &self.pagination {
            _ if self.total == 0 => "No results".to_string(),
            Some(window) => format!(
                "Showing {}-{} of {}",
                window.first(),
                window.last(),
                window.total
            ),
            None => format!("Showing all {}", self.total),
        }
    }
}
