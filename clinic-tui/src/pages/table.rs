//! A searchable table page over owned records.

use std::str::FromStr;

use clinic_lib::error::ExportError;
use clinic_lib::export::{ExportFormat, export_selected};
use clinic_lib::filter::{Searchable, search};
use serde::Serialize;
use trellis::SelectionMode;
use trellis::table::{Field, Table, TableAction, TableCommand, TableEvent, TableRow, TableState};

use crate::command::CommandError;
use crate::render::{Line, Span, Tone, table_lines};

/// Records a table page can list.
pub trait Listed: TableRow + Searchable + Serialize + Clone {
    /// Label matched by the status filter.
    fn status_label(&self) -> String;
}

/// Rows, filters and table state of one page.
///
/// The page owns the records; the table engine only sees the filtered rows.
pub struct TablePage<T: Listed> {
    title: &'static str,
    table: Table<T>,
    state: TableState<T::Key>,
    records: Vec<T>,
    rows: Vec<T>,
    query: String,
    status: Option<String>,
}

impl<T: Listed> TablePage<T>
where
    T::Key: FromStr,
{
    pub fn new(
        title: &'static str,
        fields: Vec<Field<T>>,
        actions: Vec<TableAction>,
        records: Vec<T>,
        page_size: usize,
    ) -> Self {
        let table = Table::new(fields)
            .actions(actions)
            .selection(SelectionMode::Multi)
            .page_size(page_size);
        Self {
            title,
            state: table.initial_state(),
            table,
            rows: records.clone(),
            records,
            query: String::new(),
            status: None,
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn state(&self) -> &TableState<T::Key> {
        &self.state
    }

    /// Find a row by key among the visible rows.
    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.rows.iter().find(|row| &row.key() == key)
    }

    /// Parse a typed row id.
    pub fn parse_key(&self, raw: &str) -> Result<T::Key, CommandError> {
        raw.parse()
            .map_err(|_| CommandError::InvalidKey(raw.to_string()))
    }

    /// Run a table command against the visible rows.
    pub fn update(&mut self, command: TableCommand<T::Key>) -> Vec<TableEvent<T::Key>> {
        let (state, events) = self.table.update(&self.state, &self.rows, command);
        self.state = state;
        events
    }

    /// Filter rows by a free-text query; empty clears.
    pub fn search(&mut self, query: &str) -> Vec<TableEvent<T::Key>> {
        self.query = query.trim().to_string();
        self.refresh()
    }

    /// Filter rows by status label; `None` clears.
    pub fn filter_status(&mut self, status: Option<String>) -> Vec<TableEvent<T::Key>> {
        self.status = status;
        self.refresh()
    }

    /// Remove a record from the page.
    pub fn remove(&mut self, key: &T::Key) -> (Option<T>, Vec<TableEvent<T::Key>>) {
        let removed = self
            .records
            .iter()
            .position(|record| &record.key() == key)
            .map(|index| self.records.remove(index));
        (removed, self.refresh())
    }

    /// Keys of the selected rows, in row order.
    pub fn selected(&self) -> Vec<T::Key> {
        let keys: Vec<T::Key> = self.rows.iter().map(|row| row.key()).collect();
        self.state.selection.ordered(&keys)
    }

    /// Export the selected rows.
    pub fn export(&self, format: ExportFormat) -> Result<String, ExportError> {
        export_selected(self.table.fields(), &self.rows, &self.selected(), format)
    }

    pub fn lines(&self) -> Vec<Line> {
        let mut title = vec![Span::new(self.title, Tone::Normal).bold()];
        if !self.query.is_empty() {
            title.push(Span::new(format!("  search: {}", self.query), Tone::Muted));
        }
        if let Some(status) = &self.status {
            title.push(Span::new(format!("  status: {}", status), Tone::Muted));
        }

        let mut lines = vec![Line::new(title)];
        lines.extend(table_lines(&self.table.render(&self.rows, &self.state)));
        lines
    }

    fn refresh(&mut self) -> Vec<TableEvent<T::Key>> {
        let mut rows = search(&self.records, &self.query);
        if let Some(status) = &self.status {
            rows.retain(|row| row.status_label().eq_ignore_ascii_case(status));
        }
        self.rows = rows;

        let (state, events) = self.table.sync(&self.state, &self.rows);
        self.state = state;
        events
    }
}
