//! The table engine: props plus the pure update/sync/render functions.

use std::collections::HashSet;

use log::{debug, warn};

use crate::selection::SelectionMode;

use super::field::{Field, TableAction, TableRow};
use super::page::{PageWindow, clamp_page};
use super::render::{HeaderCell, RowView, SelectAll, TableView};
use super::sort::{Sort, sorted_indices};
use super::state::{DEFAULT_PAGE_SIZE, TableCommand, TableEvent, TableState};

/// A table definition: fields, row actions and feature switches.
///
/// `Table` holds no rows and no view state. Hosts keep a [`TableState`]
/// next to their data and feed both back in:
///
/// ```
/// use trellis::table::{Field, Table, TableCommand, TableRow};
/// use trellis::SelectionMode;
///
/// struct Row { id: u32, age: u32 }
///
/// impl TableRow for Row {
///     type Key = u32;
///     fn key(&self) -> u32 { self.id }
/// }
///
/// let table = Table::new(vec![Field::new("age", "Age", |r: &Row| r.age.into()).sortable()])
///     .selection(SelectionMode::Multi)
///     .page_size(2);
/// let rows = vec![Row { id: 1, age: 30 }, Row { id: 2, age: 25 }, Row { id: 3, age: 25 }];
///
/// let state = table.initial_state();
/// let (state, _events) = table.update(&state, &rows, TableCommand::Sort("age".into()));
/// let view = table.render(&rows, &state);
/// assert_eq!(view.rows.iter().map(|r| r.key).collect::<Vec<_>>(), vec![2, 3]);
/// ```
pub struct Table<T: TableRow> {
    fields: Vec<Field<T>>,
    actions: Vec<TableAction>,
    selection_mode: SelectionMode,
    enable_pagination: bool,
    page_size: usize,
}

impl<T: TableRow> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            actions: self.actions.clone(),
            selection_mode: self.selection_mode,
            enable_pagination: self.enable_pagination,
            page_size: self.page_size,
        }
    }
}

impl<T: TableRow> std::fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("fields", &self.fields)
            .field("actions", &self.actions)
            .field("selection_mode", &self.selection_mode)
            .field("enable_pagination", &self.enable_pagination)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl<T: TableRow> Table<T> {
    /// Create a table from field descriptors.
    ///
    /// Fields with an empty key, and later fields reusing an earlier key,
    /// are dropped with a warning.
    pub fn new(fields: Vec<Field<T>>) -> Self {
        let mut seen = HashSet::new();
        let fields = fields
            .into_iter()
            .filter(|field| {
                if field.key.is_empty() {
                    warn!("dropping field '{}' with an empty key", field.header);
                    return false;
                }
                if !seen.insert(field.key.clone()) {
                    warn!("dropping duplicate field key '{}'", field.key);
                    return false;
                }
                true
            })
            .collect();

        Self {
            fields,
            actions: Vec::new(),
            selection_mode: SelectionMode::None,
            enable_pagination: true,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the row actions.
    pub fn actions(mut self, actions: Vec<TableAction>) -> Self {
        self.actions = actions;
        self
    }

    /// Set the selection mode.
    pub fn selection(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Enable or disable pagination. Disabled shows all rows on one page.
    pub fn pagination(mut self, enabled: bool) -> Self {
        self.enable_pagination = enabled;
        self
    }

    /// Set the initial page size.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    /// The field descriptors.
    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    /// Look up a field by key.
    pub fn field(&self, key: &str) -> Option<&Field<T>> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// The row actions.
    pub fn row_actions(&self) -> &[TableAction] {
        &self.actions
    }

    /// Fresh view state for this table.
    pub fn initial_state(&self) -> TableState<T::Key> {
        TableState::new(self.selection_mode, self.page_size)
    }

    // -------------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------------

    /// Apply a command to the view state.
    ///
    /// Returns the next state and the events the host should react to. The
    /// input state and rows are left untouched.
    pub fn update(
        &self,
        state: &TableState<T::Key>,
        data: &[T],
        command: TableCommand<T::Key>,
    ) -> (TableState<T::Key>, Vec<TableEvent<T::Key>>) {
        let mut next = state.clone();
        let mut events = Vec::new();

        match command {
            TableCommand::Sort(key) => match self.field(&key) {
                Some(field) if field.sortable => {
                    let sort = match &next.sort {
                        Some(current) if current.key == key => Sort {
                            key,
                            direction: current.direction.toggled(),
                        },
                        _ => Sort::asc(key),
                    };
                    next.sort = Some(sort);
                    next.page = 0;
                    events.push(TableEvent::SortChanged(next.sort.clone()));
                }
                Some(_) => warn!("field '{}' is not sortable", key),
                None => warn!("unknown sort field '{}'", key),
            },
            TableCommand::ClearSort => {
                if next.sort.take().is_some() {
                    next.page = 0;
                    events.push(TableEvent::SortChanged(None));
                }
            }
            TableCommand::GoToPage(page) => self.go_to(&mut next, &mut events, data.len(), page),
            TableCommand::NextPage => {
                let page = next.page.saturating_add(1);
                self.go_to(&mut next, &mut events, data.len(), page);
            }
            TableCommand::PrevPage => {
                let page = next.page.saturating_sub(1);
                self.go_to(&mut next, &mut events, data.len(), page);
            }
            TableCommand::FirstPage => self.go_to(&mut next, &mut events, data.len(), 0),
            TableCommand::LastPage => self.go_to(&mut next, &mut events, data.len(), usize::MAX),
            TableCommand::SetPageSize(size) => {
                let size = size.max(1);
                if size != next.page_size {
                    next.page_size = size;
                    next.page = 0;
                    events.push(TableEvent::PageChanged(0));
                }
            }
            TableCommand::ToggleRow(key) => {
                if !contains_key(data, &key) {
                    debug!("ignoring selection toggle for unknown row {}", key);
                } else if next.selection.toggle(key) {
                    events.push(selection_changed(&next, data));
                }
            }
            TableCommand::ToggleAll => {
                if next.selection.mode != SelectionMode::Multi {
                    debug!("select-all ignored outside multi-select mode");
                } else {
                    let keys: Vec<_> = data.iter().map(|row| row.key()).collect();
                    let all_selected =
                        !keys.is_empty() && keys.iter().all(|k| next.selection.is_selected(k));
                    let changed = if all_selected {
                        next.selection.clear()
                    } else {
                        next.selection.select_all(&keys) > 0
                    };
                    if changed {
                        events.push(selection_changed(&next, data));
                    }
                }
            }
            TableCommand::ClearSelection => {
                if next.selection.clear() {
                    events.push(selection_changed(&next, data));
                }
            }
            TableCommand::ClickRow(key) => {
                if contains_key(data, &key) {
                    events.push(TableEvent::RowClicked(key));
                } else {
                    debug!("ignoring click on unknown row {}", key);
                }
            }
            TableCommand::Invoke { action, key } => {
                if !self.actions.iter().any(|a| a.id == action) {
                    warn!("unknown table action '{}'", action);
                } else if !contains_key(data, &key) {
                    debug!("ignoring action '{}' on unknown row {}", action, key);
                } else {
                    events.push(TableEvent::ActionInvoked { action, key });
                }
            }
        }

        (next, events)
    }

    fn go_to(
        &self,
        state: &mut TableState<T::Key>,
        events: &mut Vec<TableEvent<T::Key>>,
        total: usize,
        page: usize,
    ) {
        if !self.enable_pagination {
            return;
        }
        let page = clamp_page(page, total, state.page_size);
        if page != state.page {
            state.page = page;
            events.push(TableEvent::PageChanged(page));
        }
    }

    /// Reconcile view state with changed host data.
    ///
    /// Drops selected keys that no longer exist and clamps the page so it
    /// never points past the end. Call after every host-side change to the
    /// rows (filtering, create, delete).
    pub fn sync(
        &self,
        state: &TableState<T::Key>,
        data: &[T],
    ) -> (TableState<T::Key>, Vec<TableEvent<T::Key>>) {
        let mut next = state.clone();
        let mut events = Vec::new();

        let keys: HashSet<_> = data.iter().map(|row| row.key()).collect();
        let dropped = next.selection.retain(|key| keys.contains(key));
        if dropped > 0 {
            debug!("dropped {} stale selected rows", dropped);
            events.push(selection_changed(&next, data));
        }

        let page = if self.enable_pagination {
            clamp_page(next.page, data.len(), next.page_size)
        } else {
            0
        };
        if page != next.page {
            next.page = page;
            events.push(TableEvent::PageChanged(page));
        }

        (next, events)
    }

    // -------------------------------------------------------------------------
    // Render
    // -------------------------------------------------------------------------

    /// Source indices of `data` in display order.
    pub fn ordered(&self, data: &[T], state: &TableState<T::Key>) -> Vec<usize> {
        let field = state
            .sort
            .as_ref()
            .and_then(|sort| self.field(&sort.key).filter(|f| f.sortable).map(|f| (f, sort)));

        match field {
            Some((field, sort)) => sorted_indices(data, field, sort.direction),
            None => (0..data.len()).collect(),
        }
    }

    /// The page window for `total` rows under `state`.
    pub fn window(&self, total: usize, state: &TableState<T::Key>) -> PageWindow {
        if self.enable_pagination {
            PageWindow::new(state.page, total, state.page_size)
        } else {
            PageWindow::all(total)
        }
    }

    /// Render a view of `data` under `state`.
    ///
    /// Pure: the same rows and state always produce the same view.
    pub fn render(&self, data: &[T], state: &TableState<T::Key>) -> TableView<T::Key> {
        let order = self.ordered(data, state);
        let window = self.window(order.len(), state);

        let headers = self
            .fields
            .iter()
            .map(|field| HeaderCell {
                key: field.key.clone(),
                label: field.header.clone(),
                width: field.width,
                align: field.align,
                sortable: field.sortable,
                sorted: state
                    .sort
                    .as_ref()
                    .filter(|sort| sort.key == field.key && field.sortable)
                    .map(|sort| sort.direction),
            })
            .collect();

        let rows = order[window.range.clone()]
            .iter()
            .enumerate()
            .map(|(offset, &source)| {
                let row = &data[source];
                let key = row.key();
                RowView {
                    position: window.range.start + offset,
                    selected: state.selection.is_selected(&key),
                    cells: self.fields.iter().map(|field| field.render(row)).collect(),
                    key,
                }
            })
            .collect();

        let selected_count = data
            .iter()
            .filter(|row| state.selection.is_selected(&row.key()))
            .count();
        let select_all = match state.selection.mode {
            SelectionMode::Multi => Some(match selected_count {
                0 => SelectAll::None,
                n if n == data.len() => SelectAll::All,
                _ => SelectAll::Some,
            }),
            _ => None,
        };

        TableView {
            headers,
            rows,
            actions: self.actions.clone(),
            pagination: self.enable_pagination.then(|| window.clone()),
            select_all,
            selected_count,
            total: data.len(),
        }
    }
}

fn contains_key<T: TableRow>(data: &[T], key: &T::Key) -> bool {
    data.iter().any(|row| &row.key() == key)
}

fn selection_changed<T: TableRow>(state: &TableState<T::Key>, data: &[T]) -> TableEvent<T::Key> {
    let keys: Vec<_> = data.iter().map(|row| row.key()).collect();
    TableEvent::SelectionChanged(state.selection.ordered(&keys))
}
