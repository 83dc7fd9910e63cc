use trellis::SelectionMode;
use trellis::table::{
    Direction, Field, SelectAll, Sort, Table, TableAction, TableCommand, TableEvent, TableRow,
    TableState,
};

#[derive(Debug, Clone)]
struct Person {
    id: u32,
    name: &'static str,
    age: u32,
}

impl TableRow for Person {
    type Key = u32;

    fn key(&self) -> u32 {
        self.id
    }
}

fn person(id: u32, name: &'static str, age: u32) -> Person {
    Person { id, name, age }
}

fn table() -> Table<Person> {
    Table::new(vec![
        Field::new("name", "Name", |p: &Person| p.name.into()).sortable(),
        Field::new("age", "Age", |p: &Person| p.age.into()).sortable(),
        Field::new("note", "Note", |_: &Person| "-".into()),
    ])
    .actions(vec![
        TableAction::new("view", "View"),
        TableAction::new("delete", "Delete").destructive(),
    ])
    .selection(SelectionMode::Multi)
    .page_size(2)
}

fn people() -> Vec<Person> {
    vec![
        person(1, "Carol", 30),
        person(2, "alice", 25),
        person(3, "Bob", 25),
        person(4, "Dave", 41),
        person(5, "Erin", 19),
    ]
}

fn apply(
    table: &Table<Person>,
    state: TableState<u32>,
    data: &[Person],
    commands: impl IntoIterator<Item = TableCommand<u32>>,
) -> TableState<u32> {
    commands
        .into_iter()
        .fold(state, |state, command| table.update(&state, data, command).0)
}

fn display_ids(table: &Table<Person>, data: &[Person], state: &TableState<u32>) -> Vec<u32> {
    table.ordered(data, state).into_iter().map(|i| data[i].id).collect()
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_sort_ties_keep_source_order() {
    let table = table();
    let data = vec![person(1, "a", 30), person(2, "b", 25), person(3, "c", 25)];

    let state = apply(&table, table.initial_state(), &data, [TableCommand::Sort("age".into())]);

    assert_eq!(display_ids(&table, &data, &state), vec![2, 3, 1]);
}

#[test]
fn test_sort_desc_is_reverse_without_ties() {
    let table = table();
    let data = people();

    let asc = apply(&table, table.initial_state(), &data, [TableCommand::Sort("name".into())]);
    let desc = apply(&table, asc.clone(), &data, [TableCommand::Sort("name".into())]);

    let mut reversed = display_ids(&table, &data, &asc);
    reversed.reverse();
    assert_eq!(desc.sort, Some(Sort::desc("name")));
    assert_eq!(display_ids(&table, &data, &desc), reversed);
}

#[test]
fn test_sort_desc_keeps_ties_in_source_order() {
    let table = table();
    let data = people();

    let state = table.initial_state().with_sort(Sort::desc("age"));

    assert_eq!(display_ids(&table, &data, &state), vec![4, 1, 2, 3, 5]);
}

#[test]
fn test_string_sort_is_not_locale_folded() {
    let table = table();
    let data = people();

    let state = table.initial_state().with_sort(Sort::asc("name"));

    // Uppercase sorts before lowercase byte-wise
    assert_eq!(display_ids(&table, &data, &state), vec![3, 1, 4, 5, 2]);
}

#[test]
fn test_sort_toggles_between_two_directions() {
    let table = table();
    let data = people();
    let sort = || TableCommand::Sort("age".into());

    let state = apply(&table, table.initial_state(), &data, [sort()]);
    assert_eq!(state.sort.as_ref().map(|s| s.direction), Some(Direction::Asc));

    let state = apply(&table, state, &data, [sort()]);
    assert_eq!(state.sort.as_ref().map(|s| s.direction), Some(Direction::Desc));

    let state = apply(&table, state, &data, [sort()]);
    assert_eq!(state.sort.as_ref().map(|s| s.direction), Some(Direction::Asc));

    let state = apply(&table, state, &data, [TableCommand::Sort("name".into())]);
    assert_eq!(state.sort, Some(Sort::asc("name")), "new key starts ascending");

    let state = apply(&table, state, &data, [TableCommand::ClearSort]);
    assert_eq!(display_ids(&table, &data, &state), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_non_sortable_and_unknown_keys_are_ignored() {
    let table = table();
    let data = people();
    let initial = table.initial_state();

    let (state, events) = table.update(&initial, &data, TableCommand::Sort("note".into()));
    assert_eq!(state, initial);
    assert!(events.is_empty());

    let (state, events) = table.update(&initial, &data, TableCommand::Sort("missing".into()));
    assert_eq!(state, initial);
    assert!(events.is_empty());
}

#[test]
fn test_update_does_not_mutate_input_state() {
    let table = table();
    let data = people();
    let initial = table.initial_state();

    let (next, events) = table.update(&initial, &data, TableCommand::Sort("age".into()));

    assert_eq!(initial.sort, None);
    assert_eq!(next.sort, Some(Sort::asc("age")));
    assert_eq!(events, vec![TableEvent::SortChanged(Some(Sort::asc("age")))]);
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn test_pages_partition_the_dataset() {
    let table = table();
    let data = people();
    let mut state = table.initial_state().with_sort(Sort::asc("age"));

    let mut seen = Vec::new();
    let mut pages = 0;
    loop {
        let view = table.render(&data, &state);
        let window = view.pagination.clone().unwrap();
        assert_eq!(window.page, pages);
        seen.extend(view.rows.iter().map(|r| r.key));
        pages += 1;
        if !window.has_next() {
            break;
        }
        state = apply(&table, state, &data, [TableCommand::NextPage]);
    }

    assert_eq!(pages, data.len().div_ceil(2));
    let mut sorted = seen.clone();
    sorted.sort();
    assert_eq!(sorted, vec![1, 2, 3, 4, 5], "every row exactly once");
    assert_eq!(seen, display_ids(&table, &data, &state), "pages slice the sorted rows");
}

#[test]
fn test_five_rows_in_pages_of_two() {
    let table = table();
    let data = people();
    let page_keys = |state: &TableState<u32>| -> Vec<u32> {
        table.render(&data, state).rows.iter().map(|r| r.key).collect()
    };

    let state = table.initial_state();
    assert_eq!(page_keys(&state), vec![1, 2]);
    let state = apply(&table, state, &data, [TableCommand::NextPage]);
    assert_eq!(page_keys(&state), vec![3, 4]);
    let state = apply(&table, state, &data, [TableCommand::NextPage]);
    assert_eq!(page_keys(&state), vec![5]);
}

#[test]
fn test_page_requests_are_clamped() {
    let table = table();
    let data = people();

    let state = apply(&table, table.initial_state(), &data, [TableCommand::GoToPage(5)]);
    assert_eq!(state.page, 2);

    let view = table.render(&data, &state);
    assert_eq!(view.rows.iter().map(|r| r.key).collect::<Vec<_>>(), vec![5]);
    assert_eq!(view.summary(), "Showing 5-5 of 5");

    let state = apply(&table, state, &data, [TableCommand::NextPage]);
    assert_eq!(state.page, 2);

    let state = apply(&table, state, &data, [TableCommand::FirstPage, TableCommand::PrevPage]);
    assert_eq!(state.page, 0);

    let state = apply(&table, state, &data, [TableCommand::LastPage]);
    assert_eq!(state.page, 2);
}

#[test]
fn test_page_size_change_resets_page() {
    let table = table();
    let data = people();

    let state = apply(
        &table,
        table.initial_state(),
        &data,
        [TableCommand::GoToPage(2), TableCommand::SetPageSize(0)],
    );
    assert_eq!(state.page_size, 1, "zero page size is clamped");
    assert_eq!(state.page, 0);
    assert_eq!(table.render(&data, &state).pagination.unwrap().page_count, 5);
}

#[test]
fn test_disabled_pagination_shows_everything() {
    let table = table().pagination(false);
    let data = people();

    let state = apply(&table, table.initial_state(), &data, [TableCommand::GoToPage(3)]);
    let view = table.render(&data, &state);

    assert_eq!(state.page, 0);
    assert_eq!(view.rows.len(), 5);
    assert!(view.pagination.is_none());
    assert_eq!(view.summary(), "Showing all 5");
}

#[test]
fn test_sync_clamps_page_after_shrink() {
    let table = table();
    let data = people();
    let state = apply(&table, table.initial_state(), &data, [TableCommand::LastPage]);

    let shrunk = &data[..3];
    let (state, events) = table.sync(&state, shrunk);

    assert_eq!(state.page, 1);
    assert_eq!(events, vec![TableEvent::PageChanged(1)]);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_select_all_spans_pages() {
    let table = table();
    let data = people();

    let (state, events) = table.update(&table.initial_state(), &data, TableCommand::ToggleAll);
    assert_eq!(events, vec![TableEvent::SelectionChanged(vec![1, 2, 3, 4, 5])]);

    let state = apply(&table, state, &data, [TableCommand::NextPage]);
    let page_key = table.render(&data, &state).rows[0].key;
    let (state, _) = table.update(&state, &data, TableCommand::ToggleRow(page_key));

    assert_eq!(state.selection.len(), 4);
    assert!(!state.selection.is_selected(&page_key));
    assert!(state.selection.is_selected(&1), "off-page selection kept");
}

#[test]
fn test_toggle_all_clears_when_everything_selected() {
    let table = table();
    let data = people();

    let state = apply(&table, table.initial_state(), &data, [TableCommand::ToggleAll]);
    assert_eq!(table.render(&data, &state).select_all, Some(SelectAll::All));

    let state = apply(&table, state, &data, [TableCommand::ToggleRow(3)]);
    assert_eq!(table.render(&data, &state).select_all, Some(SelectAll::Some));

    let state = apply(&table, state, &data, [TableCommand::ToggleAll]);
    assert_eq!(state.selection.len(), 5, "partial selection completes first");

    let state = apply(&table, state, &data, [TableCommand::ToggleAll]);
    assert!(state.selection.is_empty());
    assert_eq!(table.render(&data, &state).select_all, Some(SelectAll::None));
}

#[test]
fn test_unknown_row_toggle_is_ignored() {
    let table = table();
    let data = people();

    let (state, events) = table.update(&table.initial_state(), &data, TableCommand::ToggleRow(99));

    assert!(state.selection.is_empty());
    assert!(events.is_empty());
}

#[test]
fn test_sync_drops_dangling_selection() {
    let table = table();
    let data = people();
    let state = apply(
        &table,
        table.initial_state(),
        &data,
        [TableCommand::ToggleRow(2), TableCommand::ToggleRow(4)],
    );

    let remaining: Vec<Person> = data.into_iter().filter(|p| p.id != 4).collect();
    let (state, events) = table.sync(&state, &remaining);

    assert_eq!(events, vec![TableEvent::SelectionChanged(vec![2])]);
    assert!(!state.selection.is_selected(&4));
}

#[test]
fn test_selection_disabled() {
    let table = table().selection(SelectionMode::None);
    let data = people();

    let state = apply(
        &table,
        table.initial_state(),
        &data,
        [TableCommand::ToggleRow(1), TableCommand::ToggleAll],
    );

    assert!(state.selection.is_empty());
    assert_eq!(table.render(&data, &state).select_all, None);
}

// ============================================================================
// Events and rendering
// ============================================================================

#[test]
fn test_row_click_and_actions_only_emit_events() {
    let table = table();
    let data = people();
    let initial = table.initial_state();

    let (state, events) = table.update(&initial, &data, TableCommand::ClickRow(3));
    assert_eq!(state, initial);
    assert_eq!(events, vec![TableEvent::RowClicked(3)]);

    let invoke = |action: &str| TableCommand::Invoke {
        action: action.to_string(),
        key: 2,
    };
    let (_, events) = table.update(&initial, &data, invoke("delete"));
    assert_eq!(
        events,
        vec![TableEvent::ActionInvoked {
            action: "delete".to_string(),
            key: 2
        }]
    );

    let (_, events) = table.update(&initial, &data, invoke("archive"));
    assert!(events.is_empty());
}

#[test]
fn test_render_headers_and_cells() {
    let table = table();
    let data = people();
    let state = table.initial_state().with_sort(Sort::desc("age"));

    let view = table.render(&data, &state);

    let sorted: Vec<_> = view.headers.iter().map(|h| h.sorted).collect();
    assert_eq!(sorted, vec![None, Some(Direction::Desc), None]);
    assert_eq!(view.rows[0].cells, vec!["Dave", "41", "-"]);
    assert_eq!(view.rows[0].position, 0);
    assert_eq!(view.actions.len(), 2);
}

#[test]
fn test_empty_data_and_empty_fields() {
    let table: Table<Person> = Table::new(Vec::new()).page_size(2);
    let data = people();
    let view = table.render(&data, &table.initial_state());
    assert!(view.headers.is_empty());
    assert_eq!(view.rows.len(), 2);
    assert!(view.rows.iter().all(|r| r.cells.is_empty()));
    assert_eq!(view.pagination.unwrap().page_count, 3);

    let empty: Vec<Person> = Vec::new();
    let view = table.render(&empty, &table.initial_state());
    assert!(view.is_empty());
    assert_eq!(view.summary(), "No results");
}

#[test]
fn test_malformed_fields_are_dropped() {
    let table = Table::new(vec![
        Field::new("", "Blank", |p: &Person| p.id.into()),
        Field::new("name", "Name", |p: &Person| p.name.into()),
        Field::new("name", "Name again", |p: &Person| p.age.into()),
    ]);

    assert_eq!(table.fields().len(), 1);
    assert_eq!(table.fields()[0].header, "Name");
}

#[test]
fn test_custom_cell_renderer() {
    let table = Table::new(vec![
        Field::new("age", "Age", |p: &Person| p.age.into())
            .cell(|value, row: &Person| format!("{} ({})", value, row.name)),
    ]);
    let data = vec![person(1, "Zoe", 7)];

    let view = table.render(&data, &table.initial_state());
    assert_eq!(view.rows[0].cells, vec!["7 (Zoe)"]);
}
