//! The calendar engine: props, commands and the pure update/render pair.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use log::{debug, warn};

use super::drag::{DEFAULT_SNAP_MINUTES, DragState, snap};
use super::event::{CalendarEvent, CalendarIntent, EventDraft, EventId, EventPatch};
use super::layout::{DayLayout, GridScale, layout_range};
use super::month::{DEFAULT_EVENTS_PER_CELL, MonthGrid, month_grid};
use super::view::{CalendarState, CalendarView, DateRange};

/// Default length of an event created by clicking an empty slot.
pub const DEFAULT_EVENT_MINUTES: i64 = 30;

/// A user interaction with the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCommand {
    SetView(CalendarView),
    Next,
    Prev,
    /// Jump to the given "today".
    Today(NaiveDate),
    GoTo(NaiveDate),
    /// Show or hide one category.
    ToggleCategory(String),
    BeginDrag(EventId),
    /// Pointer offset from where the drag began.
    DragTo { minutes: i64, days: i64 },
    Drop,
    CancelDrag,
    /// Click on an empty part of the grid.
    ClickSlot { date: NaiveDate, minute: u32 },
    /// Submit of the create sheet.
    Create(EventDraft),
    /// Submit of the edit sheet.
    Edit { id: EventId, patch: EventPatch },
    Delete(EventId),
}

/// Where a dragged event would land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPreview {
    pub id: EventId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// One rendered calendar frame.
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarFrame {
    /// Day and week views: a time grid per visible day.
    Grid {
        range: DateRange,
        days: Vec<DayLayout>,
        preview: Option<DragPreview>,
    },
    /// Month view.
    Month(MonthGrid),
}

/// Calendar definition: categories, tags and grid settings.
///
/// Like the table engine, `Calendar` keeps no events. The host passes its
/// event list to every call and applies the returned [`CalendarIntent`]s.
#[derive(Debug, Clone)]
pub struct Calendar {
    categories: Vec<String>,
    available_tags: Vec<String>,
    default_view: CalendarView,
    week_start: Weekday,
    scale: GridScale,
    snap_minutes: u32,
    events_per_cell: usize,
}

impl Calendar {
    pub fn new(categories: Vec<String>, available_tags: Vec<String>) -> Self {
        Self {
            categories,
            available_tags,
            default_view: CalendarView::default(),
            week_start: Weekday::Sun,
            scale: GridScale::default(),
            snap_minutes: DEFAULT_SNAP_MINUTES,
            events_per_cell: DEFAULT_EVENTS_PER_CELL,
        }
    }

    pub fn default_view(mut self, view: CalendarView) -> Self {
        self.default_view = view;
        self
    }

    pub fn week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn scale(mut self, scale: GridScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn snap_minutes(mut self, minutes: u32) -> Self {
        self.snap_minutes = minutes.max(1);
        self
    }

    pub fn events_per_cell(mut self, count: usize) -> Self {
        self.events_per_cell = count;
        self
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn available_tags(&self) -> &[String] {
        &self.available_tags
    }

    pub fn grid_scale(&self) -> &GridScale {
        &self.scale
    }

    /// Fresh navigation state anchored on `today`.
    pub fn initial_state(&self, today: NaiveDate) -> CalendarState {
        CalendarState::new(self.default_view, today).with_week_start(self.week_start)
    }

    // -------------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------------

    /// Apply a command.
    ///
    /// Returns the next navigation state and the mutations the host should
    /// perform on its event list. `events` is only read.
    pub fn update(
        &self,
        state: &CalendarState,
        events: &[CalendarEvent],
        command: CalendarCommand,
    ) -> (CalendarState, Vec<CalendarIntent>) {
        let mut next = state.clone();
        let mut intents = Vec::new();

        match command {
            CalendarCommand::SetView(view) => next.view = view,
            CalendarCommand::Next => next.anchor = next.shifted(1),
            CalendarCommand::Prev => next.anchor = next.shifted(-1),
            CalendarCommand::Today(date) | CalendarCommand::GoTo(date) => next.anchor = date,
            CalendarCommand::ToggleCategory(category) => {
                if !self.categories.contains(&category) {
                    warn!("toggling unknown category '{}'", category);
                }
                if !next.hidden_categories.remove(&category) {
                    next.hidden_categories.insert(category);
                }
            }
            CalendarCommand::BeginDrag(id) => match find(events, &id) {
                Some(event) => next.drag = Some(DragState::begin(event, self.snap_minutes)),
                None => warn!("cannot drag unknown event {}", id),
            },
            CalendarCommand::DragTo { minutes, days } => match next.drag.as_mut() {
                Some(drag) => drag.move_to(minutes, days),
                None => debug!("pointer move without an active drag"),
            },
            CalendarCommand::Drop => {
                if let Some(drag) = next.drag.take() {
                    if find(events, &drag.id).is_some() {
                        intents.extend(drag.finish());
                    } else {
                        warn!("dragged event {} disappeared before drop", drag.id);
                    }
                }
            }
            CalendarCommand::CancelDrag => next.drag = None,
            CalendarCommand::ClickSlot { date, minute } => match self.slot_draft(date, minute) {
                Some(draft) => intents.push(CalendarIntent::Create(draft)),
                None => warn!("slot {} +{}min is out of range", date, minute),
            },
            CalendarCommand::Create(draft) => intents.push(CalendarIntent::Create(draft)),
            CalendarCommand::Edit { id, patch } => {
                if find(events, &id).is_none() {
                    warn!("cannot edit unknown event {}", id);
                } else if !patch.is_empty() {
                    intents.push(CalendarIntent::Update { id, patch });
                }
            }
            CalendarCommand::Delete(id) => {
                if find(events, &id).is_none() {
                    warn!("cannot delete unknown event {}", id);
                } else {
                    if next.drag.as_ref().is_some_and(|drag| drag.id == id) {
                        next.drag = None;
                    }
                    intents.push(CalendarIntent::Delete(id));
                }
            }
        }

        (next, intents)
    }

    /// Draft for a click on an empty slot, snapped to the grid.
    ///
    /// `None` when the snapped slot leaves the representable range.
    fn slot_draft(&self, date: NaiveDate, minute: u32) -> Option<EventDraft> {
        let clicked = date
            .and_time(NaiveTime::MIN)
            .checked_add_signed(TimeDelta::try_minutes(i64::from(minute))?)?;
        let start = snap(clicked, self.snap_minutes)?;
        let end = start.checked_add_signed(TimeDelta::try_minutes(DEFAULT_EVENT_MINUTES)?)?;
        let mut draft = EventDraft::new("New appointment", start, end);
        if let Some(category) = self.categories.first() {
            draft.category = category.clone();
        }
        Some(draft)
    }

    // -------------------------------------------------------------------------
    // Render
    // -------------------------------------------------------------------------

    /// Lay out `events` for the current view.
    pub fn render(&self, state: &CalendarState, events: &[CalendarEvent]) -> CalendarFrame {
        let range = state.visible_range();
        let shown = |event: &CalendarEvent| !state.hidden_categories.contains(&event.category);

        match state.view {
            CalendarView::Day | CalendarView::Week => {
                let preview = state.drag.as_ref().and_then(|drag| {
                    let (start, end) = drag.preview()?;
                    Some(DragPreview {
                        id: drag.id.clone(),
                        start,
                        end,
                    })
                });
                CalendarFrame::Grid {
                    range,
                    days: layout_range(events, range, &self.scale, shown),
                    preview,
                }
            }
            CalendarView::Month => CalendarFrame::Month(month_grid(
                state.anchor,
                range,
                events.iter().filter(|event| shown(*event)),
                self.events_per_cell,
            )),
        }
    }
}

fn find<'a>(events: &'a [CalendarEvent], id: &EventId) -> Option<&'a CalendarEvent> {
    events.iter().find(|event| &event.id == id)
}
