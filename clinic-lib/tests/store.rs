use chrono::{NaiveDate, NaiveDateTime};
use clinic_lib::error::StoreError;
use clinic_lib::model::{self, appointment_calendar};
use clinic_lib::{Applied, EventStore, mock};
use trellis::calendar::{CalendarCommand, EventDraft, EventId, EventPatch};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
}

fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, day)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn store() -> EventStore {
    EventStore::new(model::categories(), model::tags()).with_events(mock::appointments(today()))
}

#[test]
fn test_seeded_store() {
    let store = store();
    assert_eq!(store.len(), 14);
    assert!(store.get(&EventId::from("appt-01")).is_some());
}

#[test]
fn test_create_then_delete_restores_events() {
    let mut store = store();
    let before = store.events().to_vec();

    let draft = EventDraft::new("Walk-in", at(12, 15, 0), at(12, 15, 30)).with_category("Emergency");
    let id = store.create(draft).unwrap();
    assert_eq!(store.len(), before.len() + 1);
    assert_eq!(store.get(&id).unwrap().color, "#dc2626");

    let removed = store.delete(&id).unwrap();
    assert_eq!(removed.title, "Walk-in");
    assert_eq!(store.events(), before.as_slice());
}

#[test]
fn test_created_ids_are_unique() {
    let mut store = store();
    let draft = EventDraft::new("Checkup", at(13, 9, 0), at(13, 9, 30)).with_category("Follow-up");

    let a = store.create(draft.clone()).unwrap();
    let b = store.create(draft).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_invalid_draft_is_rejected_with_all_fields() {
    let mut store = store();
    let draft = EventDraft::new("  ", at(12, 10, 0), at(12, 9, 0))
        .with_category("Dentistry")
        .with_tags(["vip"]);

    let err = store.create(draft).unwrap_err();
    let StoreError::Invalid(invalid) = err else {
        panic!("expected a validation error");
    };
    for field in ["title", "end", "category", "tags"] {
        assert!(invalid.has_field(field), "missing {field} error");
    }
    assert_eq!(store.len(), 14, "nothing inserted");
}

#[test]
fn test_failed_update_leaves_event_unchanged() {
    let mut store = store();
    let id = EventId::from("appt-01");
    let before = store.get(&id).unwrap().clone();

    let patch = EventPatch {
        end: Some(before.start),
        ..EventPatch::default()
    };
    assert!(store.update(&id, &patch).is_err());
    assert_eq!(store.get(&id), Some(&before));
}

#[test]
fn test_category_change_recolors() {
    let mut store = store();
    let id = EventId::from("appt-01");
    let patch = EventPatch {
        category: Some("Procedure".into()),
        ..EventPatch::default()
    };

    store.update(&id, &patch).unwrap();
    assert_eq!(store.get(&id).unwrap().color, "#9333ea");
}

#[test]
fn test_unknown_ids_are_not_found() {
    let mut store = store();
    let missing = EventId::from("nope");

    assert_eq!(store.delete(&missing), Err(StoreError::NotFound(missing.clone())));
    assert_eq!(
        store.update(&missing, &EventPatch::default()),
        Err(StoreError::NotFound(missing))
    );
}

#[test]
fn test_engine_intents_round_trip_through_store() {
    let calendar = appointment_calendar();
    let mut store = store();
    let state = calendar.initial_state(today());

    // Drag appt-01 (Monday 9:00) to Tuesday 10:00
    let (state, _) = calendar.update(&state, store.events(), CalendarCommand::BeginDrag("appt-01".into()));
    let (state, _) = calendar.update(
        &state,
        store.events(),
        CalendarCommand::DragTo { minutes: 60, days: 1 },
    );
    let (_, intents) = calendar.update(&state, store.events(), CalendarCommand::Drop);
    assert_eq!(intents.len(), 1);

    for intent in intents {
        assert_eq!(
            store.apply(intent).unwrap(),
            Applied::Updated(EventId::from("appt-01"))
        );
    }
    let moved = store.get(&EventId::from("appt-01")).unwrap();
    assert_eq!((moved.start, moved.end), (at(11, 10, 0), at(11, 10, 30)));

    // Click an empty slot, then delete the new appointment
    let (_, intents) = calendar.update(
        &state,
        store.events(),
        CalendarCommand::ClickSlot {
            date: at(14, 0, 0).date(),
            minute: 15 * 60,
        },
    );
    let Applied::Created(id) = store.apply(intents[0].clone()).unwrap() else {
        panic!("expected a created event");
    };
    let (_, intents) = calendar.update(&state, store.events(), CalendarCommand::Delete(id.clone()));
    assert!(matches!(store.apply(intents[0].clone()), Ok(Applied::Deleted(e)) if e.id == id));
    assert_eq!(store.len(), 14);
}
