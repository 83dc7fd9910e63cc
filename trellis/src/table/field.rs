//! TableRow trait, Field descriptors and row actions.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::value::Value;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Trait for rows that can be displayed in a table.
///
/// # Example
///
/// ```
/// use trellis::table::TableRow;
///
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// impl TableRow for User {
///     type Key = u32;
///
///     fn key(&self) -> u32 {
///         self.id
///     }
/// }
/// ```
pub trait TableRow {
    /// The key type used to identify this row.
    type Key: Clone + Eq + Hash + fmt::Debug + fmt::Display;

    /// Return a unique key for this row.
    fn key(&self) -> Self::Key;
}

type Accessor<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;
type CellRenderer<T> = Arc<dyn Fn(&Value, &T) -> String + Send + Sync>;

/// A column descriptor.
///
/// The accessor reads a typed [`Value`] out of the row; sorting compares
/// those values and the default cell renders them with `Display`. A custom
/// `cell` renderer only changes presentation, never sort order.
///
/// # Examples
///
/// ```
/// use trellis::table::{Alignment, Field};
///
/// struct Patient {
///     name: String,
///     age: u32,
/// }
///
/// let fields = vec![
///     Field::new("name", "Name", |p: &Patient| p.name.as_str().into()).sortable(),
///     Field::new("age", "Age", |p: &Patient| p.age.into())
///         .sortable()
///         .width(5)
///         .align(Alignment::Right),
/// ];
/// ```
pub struct Field<T> {
    /// Unique identifier used by sort commands.
    pub key: String,
    /// Column header text.
    pub header: String,
    /// Preferred width in terminal columns.
    pub width: Option<u16>,
    /// Horizontal alignment.
    pub align: Alignment,
    /// Whether clicking the header sorts by this field.
    pub sortable: bool,
    accessor: Accessor<T>,
    cell: Option<CellRenderer<T>>,
}

impl<T> Field<T> {
    /// Create a field with a key, header and value accessor.
    pub fn new(
        key: impl Into<String>,
        header: impl Into<String>,
        accessor: impl Fn(&T) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            width: None,
            align: Alignment::Left,
            sortable: false,
            accessor: Arc::new(accessor),
            cell: None,
        }
    }

    /// Make the field sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set a preferred width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Set a custom cell renderer.
    pub fn cell(mut self, render: impl Fn(&Value, &T) -> String + Send + Sync + 'static) -> Self {
        self.cell = Some(Arc::new(render));
        self
    }

    /// Read this field's value from a row.
    pub fn value(&self, row: &T) -> Value {
        (self.accessor)(row)
    }

    /// Render this field's cell text for a row.
    pub fn render(&self, row: &T) -> String {
        let value = self.value(row);
        match &self.cell {
            Some(render) => render(&value, row),
            None => value.to_string(),
        }
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            width: self.width,
            align: self.align,
            sortable: self.sortable,
            accessor: Arc::clone(&self.accessor),
            cell: self.cell.clone(),
        }
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("sortable", &self.sortable)
            .field("custom_cell", &self.cell.is_some())
            .finish()
    }
}

/// A per-row action offered by the table (view, edit, delete, ...).
///
/// The table never runs actions itself; invoking one produces a
/// [`TableEvent::ActionInvoked`](super::TableEvent::ActionInvoked) for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableAction {
    pub id: String,
    pub label: String,
    /// Destructive actions are styled differently by renderers.
    pub destructive: bool,
}

impl TableAction {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            destructive: false,
        }
    }

    pub fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }
}
