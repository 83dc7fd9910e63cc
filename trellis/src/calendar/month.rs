//! Month grid: whole weeks of day cells with per-cell event lists.

use chrono::{Datelike, NaiveDate};

use super::event::{CalendarEvent, EventId};
use super::view::DateRange;

/// Default number of events listed in one month cell before "+N more".
pub const DEFAULT_EVENTS_PER_CELL: usize = 3;

/// One day of the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCell {
    pub date: NaiveDate,
    /// False for leading/trailing days of neighbouring months.
    pub in_month: bool,
    /// Events shown in the cell, earliest first.
    pub events: Vec<EventId>,
    /// Events that did not fit.
    pub overflow: usize,
}

/// A month as rows of seven cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: u32,
    pub year: i32,
    pub weeks: Vec<Vec<MonthCell>>,
}

impl MonthGrid {
    /// Iterate over every cell, week by week.
    pub fn cells(&self) -> impl Iterator<Item = &MonthCell> {
        self.weeks.iter().flatten()
    }

    /// The cell for `date`, if it is on the grid.
    pub fn cell(&self, date: NaiveDate) -> Option<&MonthCell> {
        self.cells().find(|cell| cell.date == date)
    }
}

/// Build the month grid for `anchor`'s month over `range`.
///
/// `range` is the month view's visible range (whole weeks). Each cell lists
/// the events starting that day, ordered by start then end, truncated to
/// `per_cell` entries with the remainder counted in `overflow`.
pub fn month_grid<'a>(
    anchor: NaiveDate,
    range: DateRange,
    events: impl IntoIterator<Item = &'a CalendarEvent>,
    per_cell: usize,
) -> MonthGrid {
    let mut in_range: Vec<&CalendarEvent> = events
        .into_iter()
        .filter(|event| range.contains(event.date()))
        .collect();
    in_range.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(a.effective_end().cmp(&b.effective_end()))
    });

    let cells: Vec<MonthCell> = range
        .days()
        .map(|date| {
            let day: Vec<&&CalendarEvent> =
                in_range.iter().filter(|event| event.date() == date).collect();
            MonthCell {
                date,
                in_month: date.month() == anchor.month() && date.year() == anchor.year(),
                events: day.iter().take(per_cell).map(|event| event.id.clone()).collect(),
                overflow: day.len().saturating_sub(per_cell),
            }
        })
        .collect();

    MonthGrid {
        month: anchor.month(),
        year: anchor.year(),
        weeks: cells.chunks(7).map(<[MonthCell]>::to_vec).collect(),
    }
}
