//! Calendar engine - time grids with overlap layout and drag-to-reschedule.
//!
//! The engine provides:
//! - Day, week and month views with navigation
//! - Side-by-side placement of overlapping events ([`layout`])
//! - Month cells with "+N more" overflow
//! - Drag-to-reschedule snapped to a fixed interval
//! - Create/update/delete requests reported as [`CalendarIntent`]s
//!
//! The calendar never holds the authoritative event list. Hosts pass their
//! events into [`Calendar::update`] and [`Calendar::render`] and apply the
//! returned intents themselves.

mod drag;
mod engine;
mod event;
pub mod layout;
mod month;
mod view;

pub use drag::{DEFAULT_SNAP_MINUTES, DragState, snap};
pub use engine::{Calendar, CalendarCommand, CalendarFrame, DEFAULT_EVENT_MINUTES, DragPreview};
pub use event::{CalendarEvent, CalendarIntent, EventDraft, EventId, EventPatch, MIN_EVENT_MINUTES};
pub use layout::{DayLayout, EventBlock, GridScale, layout_day, layout_range};
pub use month::{DEFAULT_EVENTS_PER_CELL, MonthCell, MonthGrid, month_grid};
pub use view::{CalendarState, CalendarView, DateRange, ParseViewError, week_start_of};
